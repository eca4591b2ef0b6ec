use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    pub fn commit_tree(
        &mut self,
        tree_sha: &str,
        parent_sha: Option<&str>,
        message: &str,
    ) -> anyhow::Result<()> {
        let tree_id = self.expect_object(tree_sha, ObjectType::Tree)?;
        let parent_id = parent_sha
            .map(|sha| self.expect_object(sha, ObjectType::Commit))
            .transpose()?;

        let author = Author::load_from_env()?;
        let commit = Commit::new(tree_id, parent_id, author, message.to_string());
        let commit_id = self.database().store(&commit, false)?;

        writeln!(self.writer(), "{commit_id}")?;

        Ok(())
    }

    fn expect_object(&self, sha: &str, expected: ObjectType) -> anyhow::Result<ObjectId> {
        let oid = ObjectId::try_parse(sha)?;
        let actual = self.database().load_type(&oid)?;
        if actual != expected {
            anyhow::bail!("{oid} is a {actual} object, expected a {expected}");
        }

        Ok(oid)
    }
}
