use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn ls_tree(&mut self, object_sha: &str, name_only: bool) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_sha)?;

        let entries = self
            .database()
            .parse_object_as_tree(&oid)
            .with_context(|| format!("Unable to read tree {oid}"))?
            .with_context(|| format!("Not a tree object: {oid}"))?;

        for entry in entries {
            if name_only {
                let mut writer = self.writer();
                writer.write_all(entry.name())?;
                writer.write_all(b"\n")?;
            } else {
                writeln!(self.writer(), "{entry}")?;
            }
        }

        Ok(())
    }
}
