use crate::artifacts::core::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::{BufMut, Bytes, BytesMut};

/// Anything that can be framed as a loose object
pub trait Packable {
    fn object_type(&self) -> ObjectType;

    /// Payload without the header
    fn content(&self) -> Bytes;

    /// Encoded frame: `<type> <size>\0<content>`
    fn serialize(&self) -> Bytes {
        encode(self.object_type(), &self.content())
    }

    // the id is always taken over the uncompressed frame
    fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.serialize())
    }
}

/// A decoded loose object
///
/// The size of an object is always the length of its content; decoding
/// rejects frames whose header disagrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Bytes),
    Tree(Bytes),
    Commit(Bytes),
}

impl Object {
    pub fn new(object_type: ObjectType, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        match object_type {
            ObjectType::Blob => Object::Blob(content),
            ObjectType::Tree => Object::Tree(content),
            ObjectType::Commit => Object::Commit(content),
        }
    }

    pub fn data(&self) -> &Bytes {
        match self {
            Object::Blob(content) | Object::Tree(content) | Object::Commit(content) => content,
        }
    }

    pub fn size(&self) -> usize {
        self.data().len()
    }

    /// Parse a frame, ignoring anything past the declared content
    pub fn decode(frame: Bytes) -> ObjectResult<Self> {
        Self::decode_with_remainder(frame).map(|(object, _)| object)
    }

    /// Parse a frame and hand back whatever follows the declared content
    ///
    /// The header must be `<type> <size>\0` where `<size>` is a plain base-10
    /// integer: no sign, no whitespace, no empty token.
    pub fn decode_with_remainder(frame: Bytes) -> ObjectResult<(Self, Bytes)> {
        let space = frame
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| ObjectError::MalformedHeader("missing space after type".to_string()))?;
        let object_type = ObjectType::parse_token(&frame[..space])?;

        let size_start = space + 1;
        let nul = frame[size_start..]
            .iter()
            .position(|&b| b == b'\0')
            .map(|offset| size_start + offset)
            .ok_or_else(|| {
                ObjectError::MalformedHeader("missing NUL after size".to_string())
            })?;
        let size = parse_size(&frame[size_start..nul])?;

        let content_start = nul + 1;
        let available = frame.len() - content_start;
        if available < size {
            return Err(ObjectError::TruncatedContent {
                expected: size,
                actual: available,
            });
        }

        let content = frame.slice(content_start..content_start + size);
        let remainder = frame.slice(content_start + size..);

        Ok((Self::new(object_type, content), remainder))
    }
}

impl Packable for Object {
    fn object_type(&self) -> ObjectType {
        match self {
            Object::Blob(_) => ObjectType::Blob,
            Object::Tree(_) => ObjectType::Tree,
            Object::Commit(_) => ObjectType::Commit,
        }
    }

    fn content(&self) -> Bytes {
        self.data().clone()
    }
}

/// Frame `content` as `<type> <size>\0<content>`
pub fn encode(object_type: ObjectType, content: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), content.len());

    let mut frame = BytesMut::with_capacity(header.len() + content.len());
    frame.put_slice(header.as_bytes());
    frame.put_slice(content);

    frame.freeze()
}

fn parse_size(token: &[u8]) -> ObjectResult<usize> {
    if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
        return Err(ObjectError::MalformedHeader(format!(
            "invalid size {:?}",
            String::from_utf8_lossy(token)
        )));
    }

    // digits only, so the str conversion cannot fail
    std::str::from_utf8(token)
        .ok()
        .and_then(|digits| digits.parse::<usize>().ok())
        .ok_or_else(|| {
            ObjectError::MalformedHeader(format!(
                "size {} out of range",
                String::from_utf8_lossy(token)
            ))
        })
}
