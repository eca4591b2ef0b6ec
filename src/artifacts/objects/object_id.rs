//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 20 raw bytes, rendered everywhere except inside tree
//! content as 40 lowercase hexadecimal characters.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3")
//! - Short: First 7 characters (e.g., "a94a8fe")
//! - Raw: 20 bytes, used verbatim in tree entries
//!
//! ## Storage
//!
//! Objects are stored in `<objects>/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::core::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::{OBJECT_ID_BYTES, OBJECT_ID_LENGTH};
use sha1::{Digest, Sha1};
use std::path::PathBuf;
use std::str::FromStr;

/// Object identifier (SHA-1 hash)
///
/// Immutable value type compared by byte equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_BYTES]);

impl ObjectId {
    pub fn new(bytes: [u8; OBJECT_ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse and validate an object ID from its hex form
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string (either case)
    ///
    /// # Returns
    ///
    /// Validated ObjectId or `InvalidFormat` if the length or characters are wrong
    pub fn try_parse(id: impl AsRef<str>) -> ObjectResult<Self> {
        let id = id.as_ref();
        if id.len() != OBJECT_ID_LENGTH {
            return Err(ObjectError::InvalidFormat {
                input: id.to_string(),
                reason: format!("expected {OBJECT_ID_LENGTH} characters, got {}", id.len()),
            });
        }

        let mut bytes = [0; OBJECT_ID_BYTES];
        hex::decode_to_slice(id, &mut bytes).map_err(|e| ObjectError::InvalidFormat {
            input: id.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self(bytes))
    }

    /// Build an object ID from raw digest bytes (tree entry encoding)
    pub fn from_raw(raw: &[u8]) -> ObjectResult<Self> {
        let bytes: [u8; OBJECT_ID_BYTES] =
            raw.try_into().map_err(|_| ObjectError::InvalidFormat {
                input: hex::encode(raw),
                reason: format!("expected {OBJECT_ID_BYTES} raw bytes, got {}", raw.len()),
            })?;

        Ok(Self(bytes))
    }

    /// SHA-1 of the exact bytes given
    ///
    /// Callers pass the uncompressed frame (`<type> <size>\0<content>`),
    /// never the compressed file or the bare content.
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);

        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_BYTES] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let hex40 = self.to_hex();
        let (dir, file) = hex40.split_at(2);
        PathBuf::from(dir).join(file)
    }
}

impl FromStr for ObjectId {
    type Err = ObjectError;

    fn from_str(s: &str) -> ObjectResult<Self> {
        Self::try_parse(s)
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}
