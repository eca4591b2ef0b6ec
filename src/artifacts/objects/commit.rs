//! Commit object
//!
//! Commits tie a tree snapshot to its history and authorship.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The `parent` line is omitted for a root commit.

use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;

/// Author or committer information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author with the current timestamp
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Format complete author info including timestamp
    ///
    /// # Returns
    ///
    /// String in format "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Load author information from environment variables
    ///
    /// Reads GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL, and optionally GIT_AUTHOR_DATE
    /// (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`). If no date is provided, uses
    /// current time.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("GIT_AUTHOR_NAME").context("GIT_AUTHOR_NAME not set")?;
        let email = std::env::var("GIT_AUTHOR_EMAIL").context("GIT_AUTHOR_EMAIL not set")?;
        let timestamp = std::env::var("GIT_AUTHOR_DATE").ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Ok(Author::new_with_timestamp(name, email, ts)),
            None => Ok(Author::new(name, email)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Commit {
    tree: ObjectId,
    parent: Option<ObjectId>,
    author: Author,
    message: String,
}

impl Packable for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn content(&self) -> Bytes {
        let mut lines = vec![format!("tree {}", self.tree)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        // committer is always the author here
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.author.display()));
        lines.push(String::new());
        lines.push(self.message.clone());

        let mut content = lines.join("\n");
        if !content.ends_with('\n') {
            content.push('\n');
        }

        Bytes::from(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_author() -> Author {
        let timestamp =
            chrono::DateTime::parse_from_str("2023-01-01 12:00:00 +0200", "%Y-%m-%d %H:%M:%S %z")
                .unwrap();
        Author::new_with_timestamp(
            "fake_user".to_string(),
            "fake_email@email.com".to_string(),
            timestamp,
        )
    }

    #[test]
    fn test_root_commit_has_no_parent_line() {
        let tree = ObjectId::digest(b"tree");
        let commit = Commit::new(tree, None, fixed_author(), "Initial commit".to_string());

        let expected = format!(
            "tree {tree}\n\
             author fake_user <fake_email@email.com> 1672567200 +0200\n\
             committer fake_user <fake_email@email.com> 1672567200 +0200\n\
             \n\
             Initial commit\n"
        );
        assert_eq!(String::from_utf8(commit.content().to_vec()).unwrap(), expected);
    }

    #[test]
    fn test_parent_line_names_the_parent() {
        let tree = ObjectId::digest(b"tree");
        let parent = ObjectId::digest(b"parent");
        let commit = Commit::new(tree, Some(parent), fixed_author(), "Second\n".to_string());

        let content = String::from_utf8(commit.content().to_vec()).unwrap();

        assert!(content.contains(&format!("\nparent {parent}\n")));
        assert!(content.ends_with("\n\nSecond\n"));
        assert!(!content.ends_with("\n\n\n"));
    }

    #[test]
    fn test_commit_is_framed_as_commit() {
        let commit = Commit::new(ObjectId::default(), None, fixed_author(), "m".to_string());

        assert!(commit.serialize().starts_with(b"commit "));
    }
}
