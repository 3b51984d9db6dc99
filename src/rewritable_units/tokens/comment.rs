use crate::errors::{CommentTextError, TokenParseError};
use crate::rewritable_units::Serialize;
use memchr::memmem;

/// A comment: `<!-- comment -->`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    content: String,
    serialized: String,
}

#[inline]
fn validate_content(content: &str) -> Result<(), CommentTextError> {
    if memmem::find(content.as_bytes(), b"--").is_some() {
        Err(CommentTextError::DoubleHyphen)
    } else if content.ends_with('-') {
        Err(CommentTextError::TrailingHyphen)
    } else {
        Ok(())
    }
}

impl Comment {
    pub fn new(content: &str) -> Result<Self, CommentTextError> {
        validate_content(content)?;

        let mut comment = Comment {
            content: content.to_string(),
            serialized: String::new(),
        };

        comment.reserialize();

        Ok(comment)
    }

    pub(crate) fn from_raw(raw: &str) -> Result<Self, TokenParseError> {
        let content = raw
            .strip_prefix("<!--")
            .and_then(|r| r.strip_suffix("-->"))
            .ok_or_else(|| TokenParseError::UnexpectedMarkup {
                kind: "comment",
                markup: raw.to_string(),
            })?;

        Ok(Comment {
            content: content.to_string(),
            serialized: raw.to_string(),
        })
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the comment content.
    ///
    /// Content with a double hyphen or a trailing hyphen is rejected, since
    /// the resulting markup would no longer read back as one comment.
    pub fn set_content(&mut self, content: &str) -> Result<(), CommentTextError> {
        if self.content != content {
            validate_content(content)?;

            self.content = content.to_string();
            self.reserialize();
        }

        Ok(())
    }

    fn reserialize(&mut self) {
        self.serialized = format!("<!--{}-->", self.content);

        trace!(@reserialize self.serialized);
    }
}

impl Serialize for Comment {
    #[inline]
    fn serialized(&self) -> &str {
        &self.serialized
    }
}
