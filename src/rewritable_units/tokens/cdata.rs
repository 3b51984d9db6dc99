use super::Text;
use crate::errors::{CdataTextError, TokenParseError};
use crate::rewritable_units::Serialize;
use memchr::memmem;

/// A CDATA section: `<![CDATA[ literal <markup/> ]]>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cdata {
    content: String,
    serialized: String,
}

#[inline]
fn validate_content(content: &str) -> Result<(), CdataTextError> {
    match memmem::find(content.as_bytes(), b"]]>") {
        Some(_) => Err(CdataTextError::CdataClosingSequence),
        None => Ok(()),
    }
}

impl Cdata {
    pub fn new(content: &str) -> Result<Self, CdataTextError> {
        validate_content(content)?;

        let mut cdata = Cdata {
            content: content.to_string(),
            serialized: String::new(),
        };

        cdata.reserialize();

        Ok(cdata)
    }

    pub(crate) fn from_raw(raw: &str) -> Result<Self, TokenParseError> {
        let content = raw
            .strip_prefix("<![CDATA[")
            .and_then(|r| r.strip_suffix("]]>"))
            .ok_or_else(|| TokenParseError::UnexpectedMarkup {
                kind: "CDATA section",
                markup: raw.to_string(),
            })?;

        Ok(Cdata {
            content: content.to_string(),
            serialized: raw.to_string(),
        })
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: &str) -> Result<(), CdataTextError> {
        if self.content != content {
            validate_content(content)?;

            self.content = content.to_string();
            self.reserialize();
        }

        Ok(())
    }

    /// The content with `&` and `<` escaped, as it would appear in text.
    pub fn escaped_content(&self) -> String {
        self.content.replace('&', "&amp;").replace('<', "&lt;")
    }

    /// Drops the section delimiters, returning the escaped content as text.
    #[inline]
    pub fn to_text_token(&self) -> Text {
        Text::from_raw(&self.escaped_content())
    }

    fn reserialize(&mut self) {
        self.serialized = format!("<![CDATA[{}]]>", self.content);

        trace!(@reserialize self.serialized);
    }
}

impl Serialize for Cdata {
    #[inline]
    fn serialized(&self) -> &str {
        &self.serialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content() {
        let mut cdata: Cdata = "<![CDATA[a]b <c> & d]]>".parse().unwrap();

        assert_eq!(cdata.content(), "a]b <c> & d");
        assert_eq!(cdata.escaped_content(), "a]b &lt;c> &amp; d");
        assert_eq!(cdata.to_text_token().serialized(), "a]b &lt;c> &amp; d");

        cdata.set_content("x]]").unwrap();

        assert_eq!(cdata.serialized(), "<![CDATA[x]]]]>");
    }

    #[test]
    fn closing_sequence_in_content() {
        let mut cdata = Cdata::new("").unwrap();

        assert_eq!(cdata.serialized(), "<![CDATA[]]>");
        assert_eq!(
            cdata.set_content("a ]]> b"),
            Err(CdataTextError::CdataClosingSequence)
        );
    }
}
