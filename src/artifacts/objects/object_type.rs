use crate::artifacts::core::error::{ObjectError, ObjectResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Parse the kind token of an object header, as raw bytes
    pub fn parse_token(token: &[u8]) -> ObjectResult<ObjectType> {
        match token {
            b"blob" => Ok(ObjectType::Blob),
            b"tree" => Ok(ObjectType::Tree),
            b"commit" => Ok(ObjectType::Commit),
            _ => Err(ObjectError::UnsupportedKind(
                String::from_utf8_lossy(token).into_owned(),
            )),
        }
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = ObjectError;

    fn try_from(value: &str) -> ObjectResult<Self> {
        Self::parse_token(value.as_bytes())
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("blob", ObjectType::Blob)]
    #[case("tree", ObjectType::Tree)]
    #[case("commit", ObjectType::Commit)]
    fn test_known_kinds_round_trip(#[case] token: &str, #[case] expected: ObjectType) {
        let object_type = ObjectType::try_from(token).unwrap();

        assert_eq!(object_type, expected);
        assert_eq!(object_type.to_string(), token);
    }

    #[rstest]
    #[case("tag")]
    #[case("Blob")]
    #[case("")]
    #[case("blob ")]
    fn test_unknown_kinds_are_rejected(#[case] token: &str) {
        assert!(matches!(
            ObjectType::try_from(token),
            Err(ObjectError::UnsupportedKind(_))
        ));
    }
}
