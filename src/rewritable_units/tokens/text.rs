use crate::errors::TextError;
use crate::rewritable_units::Serialize;
use memchr::memchr;

#[inline]
fn validate_text(text: &str) -> Result<(), TextError> {
    match memchr(b'<', text.as_bytes()) {
        Some(_) => Err(TextError::MarkupOpening),
        None => Ok(()),
    }
}

/// A run of text not containing `<`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    text: String,
}

impl Text {
    pub fn new(text: &str) -> Result<Self, TextError> {
        validate_text(text)?;

        Ok(Text::from_raw(text))
    }

    #[inline]
    pub(crate) fn from_raw(raw: &str) -> Self {
        Text {
            text: raw.to_string(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Replaces the text. Markup characters must already be escaped.
    pub fn set_text(&mut self, text: &str) -> Result<(), TextError> {
        if self.text != text {
            validate_text(text)?;
            self.text = text.to_string();
            trace!(@reserialize self.text);
        }

        Ok(())
    }

    /// Returns `true` if the text is non-empty and consists of whitespace only.
    pub fn is_whitespace(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_whitespace)
    }
}

impl Serialize for Text {
    #[inline]
    fn serialized(&self) -> &str {
        &self.text
    }
}
