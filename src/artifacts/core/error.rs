//! Error taxonomy for the object store
//!
//! Every failure the object pipeline can produce is one of these variants.
//! Layers add context by wrapping (`Load`, `Entry`) rather than by turning
//! the error into a string, so callers can still match on the root cause.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// A hash string that is not exactly 40 hex characters
    #[error("invalid object id {input:?}: {reason}")]
    InvalidFormat { input: String, reason: String },

    #[error("unsupported object type {0:?}")]
    UnsupportedKind(String),

    #[error("malformed object header: {0}")]
    MalformedHeader(String),

    #[error("truncated object content: header declares {expected} bytes, found {actual}")]
    TruncatedContent { expected: usize, actual: usize },

    #[error("malformed tree entry at byte {offset}: {reason}")]
    MalformedEntry { offset: usize, reason: String },

    #[error("corrupt compressed stream: {0}")]
    CorruptStream(String),

    #[error("object {oid} not found at {}", path.display())]
    NotFound { oid: ObjectId, path: PathBuf },

    #[error("I/O failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to load object {oid}")]
    Load {
        oid: ObjectId,
        #[source]
        source: Box<ObjectError>,
    },

    #[error("unable to resolve tree entry {name:?}")]
    Entry {
        name: String,
        #[source]
        source: Box<ObjectError>,
    },
}

impl ObjectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ObjectError::Io {
            path: path.into(),
            source,
        }
    }

    /// Strip the context wrappers and return the error that started it all.
    pub fn root_cause(&self) -> &ObjectError {
        match self {
            ObjectError::Load { source, .. } | ObjectError::Entry { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

pub type ObjectResult<T> = Result<T, ObjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_unwraps_nested_context() {
        let error = ObjectError::Entry {
            name: "hello.txt".to_string(),
            source: Box::new(ObjectError::Load {
                oid: ObjectId::default(),
                source: Box::new(ObjectError::CorruptStream("bad header".to_string())),
            }),
        };

        assert!(matches!(
            error.root_cause(),
            ObjectError::CorruptStream(reason) if reason == "bad header"
        ));
    }

    #[test]
    fn root_cause_of_unwrapped_error_is_itself() {
        let error = ObjectError::UnsupportedKind("tag".to_string());

        assert!(matches!(error.root_cause(), ObjectError::UnsupportedKind(_)));
    }

    #[test]
    fn io_failure_message_names_the_path() {
        let error = ObjectError::io(
            "/tmp/objects/ab/cdef",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        assert_eq!(
            error.to_string(),
            "I/O failure at /tmp/objects/ab/cdef: denied"
        );
    }
}
