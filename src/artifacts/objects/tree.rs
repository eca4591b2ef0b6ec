//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<octal-mode> <name>\0<20-byte-sha1>`, with nothing between
//! consecutive entries.
//!
//! The object id inside an entry is raw digest bytes, not hex.
//!
//! Parsing here is purely syntactic (`TreeEntries`). Classifying each child
//! as blob or tree needs the object database, see `Database::parse_tree_entries`.

use crate::artifacts::core::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::OBJECT_ID_BYTES;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;

/// File mode of a tree entry (type and permission bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryMode(u32);

impl EntryMode {
    pub const REGULAR: EntryMode = EntryMode(0o100644);
    pub const EXECUTABLE: EntryMode = EntryMode(0o100755);
    pub const DIRECTORY: EntryMode = EntryMode(0o40000);

    const TYPE_MASK: u32 = 0o170000;

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn is_tree(&self) -> bool {
        self.0 & Self::TYPE_MASK == Self::DIRECTORY.0
    }

    /// Parse the octal token used in tree content (`100644`, `40000`)
    pub fn from_octal_str(token: &str) -> Option<Self> {
        if token.is_empty() || !token.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return None;
        }

        u32::from_str_radix(token, 8).ok().map(EntryMode)
    }

    /// Parse the mode field of stored tree content
    ///
    /// Octal when every digit allows it, decimal otherwise; anything that is
    /// not a run of ASCII digits is rejected.
    pub fn parse_token(token: &[u8]) -> Option<Self> {
        let token = std::str::from_utf8(token).ok()?;
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Self::from_octal_str(token).or_else(|| token.parse().ok().map(EntryMode))
    }

    /// Unpadded octal, as written into tree content
    pub fn to_octal_token(&self) -> String {
        format!("{:o}", self.0)
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}

/// One entry as it appears in tree content, borrowing the name from the buffer
///
/// Names are raw bytes; git puts no encoding on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntryRef<'t> {
    pub mode: EntryMode,
    pub name: &'t [u8],
    pub oid: ObjectId,
}

/// A tree entry whose child has been looked up in the database
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    mode: EntryMode,
    name: Bytes,
    oid: ObjectId,
    object_type: ObjectType,
}

impl TreeEntry {
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }
}

impl std::fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}\t{}",
            self.mode,
            self.object_type,
            self.oid,
            String::from_utf8_lossy(&self.name)
        )
    }
}

/// Iterator over the entries of raw tree content, in buffer order
///
/// Yields an error at most once; iteration stops after the first failure.
pub struct TreeEntries<'t> {
    content: &'t [u8],
    offset: usize,
    failed: bool,
}

impl<'t> TreeEntries<'t> {
    pub fn new(content: &'t [u8]) -> Self {
        TreeEntries {
            content,
            offset: 0,
            failed: false,
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> ObjectError {
        ObjectError::MalformedEntry {
            offset: self.offset,
            reason: reason.into(),
        }
    }

    /// Take bytes up to (excluding) `delimiter` and step past it
    fn read_until(&mut self, delimiter: u8, field: &str) -> ObjectResult<&'t [u8]> {
        let content = self.content;
        let rest = &content[self.offset..];
        let end = rest
            .iter()
            .position(|&b| b == delimiter)
            .ok_or_else(|| self.malformed(format!("unexpected end of buffer in {field}")))?;

        self.offset += end + 1;
        Ok(&rest[..end])
    }

    fn parse_entry(&mut self) -> ObjectResult<TreeEntryRef<'t>> {
        let start = self.offset;

        let mode_bytes = self.read_until(b' ', "mode")?;
        let mode = EntryMode::parse_token(mode_bytes).ok_or_else(|| ObjectError::MalformedEntry {
            offset: start,
            reason: format!("invalid mode {:?}", String::from_utf8_lossy(mode_bytes)),
        })?;

        let name = self.read_until(b'\0', "name")?;

        let content = self.content;
        let oid_end = self.offset + OBJECT_ID_BYTES;
        if oid_end > content.len() {
            return Err(self.malformed(format!(
                "unexpected end of buffer in object id of {:?}",
                String::from_utf8_lossy(name)
            )));
        }
        let oid = ObjectId::from_raw(&content[self.offset..oid_end])?;
        self.offset = oid_end;

        Ok(TreeEntryRef { mode, name, oid })
    }
}

impl<'t> Iterator for TreeEntries<'t> {
    type Item = ObjectResult<TreeEntryRef<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        // running out exactly at an entry boundary is the clean end
        if self.failed || self.offset == self.content.len() {
            return None;
        }

        let entry = self.parse_entry();
        self.failed = entry.is_err();
        Some(entry)
    }
}

/// Builds tree content from entries in the order they are added
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    entries: Vec<(EntryMode, String, ObjectId)>,
}

impl TreeBuilder {
    pub fn add_entry(
        &mut self,
        mode: EntryMode,
        name: impl Into<String>,
        oid: ObjectId,
    ) -> ObjectResult<()> {
        let name = name.into();
        if name.is_empty() || name.contains('\0') {
            return Err(ObjectError::MalformedEntry {
                offset: self.content_len(),
                reason: format!("invalid entry name {name:?}"),
            });
        }

        self.entries.push((mode, name, oid));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn content_len(&self) -> usize {
        self.entries
            .iter()
            .map(|(mode, name, _)| mode.to_octal_token().len() + name.len() + 2 + OBJECT_ID_BYTES)
            .sum()
    }
}

impl Packable for TreeBuilder {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn content(&self) -> Bytes {
        let mut content = BytesMut::with_capacity(self.content_len());
        for (mode, name, oid) in &self.entries {
            content.put_slice(mode.to_octal_token().as_bytes());
            content.put_u8(b' ');
            content.put_slice(name.as_bytes());
            content.put_u8(b'\0');
            content.put_slice(oid.as_bytes());
        }

        content.freeze()
    }
}
