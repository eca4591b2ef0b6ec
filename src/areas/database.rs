use crate::artifacts::core::error::{ObjectError, ObjectResult};
use crate::artifacts::database::compression;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{TreeEntries, TreeEntry};
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Loose-object database rooted at an objects directory
///
/// Every call is a plain function of the arguments and what is on disk:
/// nothing is cached and nothing is retried.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// `<root>/<first two hex chars>/<remaining 38>`
    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Frame, hash and (unless `dry_run`) persist an object
    ///
    /// The id is the SHA-1 of the uncompressed frame. Storing the same
    /// content again returns the same id and leaves the existing file alone.
    pub fn store(&self, object: &impl Packable, dry_run: bool) -> ObjectResult<ObjectId> {
        let frame = object.serialize();
        let object_id = ObjectId::digest(&frame);

        if dry_run {
            tracing::debug!(
                oid = %object_id,
                kind = %object.object_type(),
                "hashed object without writing"
            );
            return Ok(object_id);
        }

        let object_path = self.object_path(&object_id);
        // write the object to disk unless it already exists
        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| ObjectError::io(&object_path, std::io::ErrorKind::NotFound.into()))?;
        std::fs::create_dir_all(object_dir).map_err(|e| ObjectError::io(object_dir, e))?;

        self.write_object(&object_path, &compression::compress(&frame)?)?;
        tracing::debug!(
            oid = %object_id,
            kind = %object.object_type(),
            size = frame.len(),
            "stored object"
        );

        Ok(object_id)
    }

    /// Read, inflate and decode the object stored under `object_id`
    pub fn load(&self, object_id: &ObjectId) -> ObjectResult<Object> {
        let object_path = self.object_path(object_id);
        let compressed = match std::fs::read(&object_path) {
            Ok(compressed) => compressed,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ObjectError::NotFound {
                    oid: *object_id,
                    path: object_path,
                });
            }
            Err(e) => return Err(ObjectError::io(object_path, e)),
        };

        let object = Self::parse_frame(&compressed).map_err(|e| ObjectError::Load {
            oid: *object_id,
            source: Box::new(e),
        })?;
        tracing::trace!(
            oid = %object_id,
            kind = %object.object_type(),
            size = object.size(),
            "loaded object"
        );

        Ok(object)
    }

    pub fn load_type(&self, object_id: &ObjectId) -> ObjectResult<ObjectType> {
        self.load(object_id).map(|object| object.object_type())
    }

    /// Decode tree content, classifying every child by loading it
    ///
    /// Entries come back in buffer order, without sorting or deduplication.
    pub fn parse_tree_entries(&self, content: &[u8]) -> ObjectResult<Vec<TreeEntry>> {
        let entries = TreeEntries::new(content)
            .map(|entry| {
                let entry = entry?;
                let object_type = self
                    .load_type(&entry.oid)
                    .map_err(|e| ObjectError::Entry {
                        name: String::from_utf8_lossy(entry.name).into_owned(),
                        source: Box::new(e),
                    })?;

                Ok(TreeEntry::new(
                    entry.mode,
                    Bytes::copy_from_slice(entry.name),
                    entry.oid,
                    object_type,
                ))
            })
            .collect::<ObjectResult<Vec<_>>>()?;
        tracing::trace!(count = entries.len(), "parsed tree entries");

        Ok(entries)
    }

    /// Entries of the tree stored under `object_id`, or `None` for other kinds
    pub fn parse_object_as_tree(
        &self,
        object_id: &ObjectId,
    ) -> ObjectResult<Option<Vec<TreeEntry>>> {
        match self.load(object_id)? {
            Object::Tree(content) => self.parse_tree_entries(&content).map(Some),
            _ => Ok(None),
        }
    }

    fn parse_frame(compressed: &[u8]) -> ObjectResult<Object> {
        let frame = compression::decompress(compressed)?;
        let (object, remainder) = Object::decode_with_remainder(frame)?;

        // loose objects are framed exactly, extra bytes mean the header lies
        if !remainder.is_empty() {
            return Err(ObjectError::MalformedHeader(format!(
                "declared size {} but {} bytes follow the header",
                object.size(),
                object.size() + remainder.len()
            )));
        }

        Ok(object)
    }

    fn write_object(&self, object_path: &Path, object_content: &Bytes) -> ObjectResult<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| ObjectError::io(object_path, std::io::ErrorKind::NotFound.into()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .map_err(|e| ObjectError::io(&temp_object_path, e))?;

        file.write_all(object_content)
            .map_err(|e| ObjectError::io(&temp_object_path, e))?;
        drop(file);

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_object_path);
            ObjectError::io(object_path, e)
        })
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
