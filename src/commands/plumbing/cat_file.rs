use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

/// What `cat-file` reports about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Content, with trees rendered one entry per line
    Pretty,
    Type,
    Size,
}

impl Repository {
    pub fn cat_file(&mut self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id)?;
        let object = self
            .database()
            .load(&oid)
            .with_context(|| format!("Unable to read object {oid}"))?;

        match mode {
            CatFileMode::Type => writeln!(self.writer(), "{}", object.object_type())?,
            CatFileMode::Size => writeln!(self.writer(), "{}", object.size())?,
            CatFileMode::Pretty => match &object {
                Object::Blob(content) | Object::Commit(content) => {
                    self.writer().write_all(content)?
                }
                Object::Tree(content) => {
                    let entries = self
                        .database()
                        .parse_tree_entries(content)
                        .with_context(|| format!("Unable to parse tree {oid}"))?;
                    for entry in entries {
                        writeln!(self.writer(), "{entry}")?;
                    }
                }
            },
        }

        Ok(())
    }
}
