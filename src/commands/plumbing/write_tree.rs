use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::TreeBuilder;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn write_tree(&mut self) -> anyhow::Result<()> {
        let tree_id = match self.store_tree(None)? {
            Some(tree_id) => tree_id,
            // an empty workspace still gets a (empty) root tree
            None => self.database().store(&TreeBuilder::default(), false)?,
        };

        writeln!(self.writer(), "{tree_id}")?;

        Ok(())
    }

    /// Store `dir` bottom-up; `None` when it holds nothing worth tracking
    fn store_tree(&self, dir: Option<&Path>) -> anyhow::Result<Option<ObjectId>> {
        let mut tree = TreeBuilder::default();

        for entry in self.workspace().list_dir(dir)? {
            let oid = if entry.is_dir() {
                match self.store_tree(Some(&entry.path))? {
                    Some(oid) => oid,
                    None => continue,
                }
            } else {
                let data = self.workspace().read_file(&entry.path)?;
                self.database()
                    .store(&Object::new(ObjectType::Blob, data), false)
                    .with_context(|| format!("Unable to store {}", entry.path.display()))?
            };

            tree.add_entry(entry.mode, entry.name, oid)?;
        }

        if tree.is_empty() {
            return Ok(None);
        }

        let tree_id = self.database().store(&tree, false)?;
        tracing::debug!(oid = %tree_id, entries = tree.len(), "stored tree");

        Ok(Some(tree_id))
    }
}
