use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&mut self, object_path: &Path, write: bool) -> anyhow::Result<()> {
        // read object file
        let object_data = self.workspace().read_file(object_path)?;
        let object = Object::new(ObjectType::Blob, object_data);

        // hash, and write as compressed object file only when asked to
        let object_id = self.database().store(&object, !write)?;

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
