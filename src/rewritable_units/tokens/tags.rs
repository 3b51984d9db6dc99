use crate::errors::{AttributeNameError, TagError, TagNameError, TokenParseError};
use crate::grammar::{is_name, ELEMENT_TAG_REGEX};
use crate::rewritable_units::{AttributedTag, Attributes, Serialize, Tag};

fn validate_tag_name(name: &str) -> Result<(), TagNameError> {
    if name.is_empty() {
        Err(TagNameError::Empty)
    } else if !is_name(name) {
        Err(TagNameError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

fn parse_element_tag(
    raw: &str,
    kind: &'static str,
) -> Result<(String, Attributes), TokenParseError> {
    let unexpected = || TokenParseError::UnexpectedMarkup {
        kind,
        markup: raw.to_string(),
    };

    let captures = ELEMENT_TAG_REGEX.captures(raw).ok_or_else(unexpected)?;
    let name = captures.name("name").ok_or_else(unexpected)?.as_str();
    let attributes = captures
        .name("attributes")
        .map_or_else(Attributes::default, |run| Attributes::parse(run.as_str()));

    Ok((name.to_string(), attributes))
}

macro_rules! impl_element_tag {
    ($Tag:ident, $kind:expr, $closing:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $Tag {
            name: String,
            attributes: Attributes,
            serialized: String,
        }

        impl $Tag {
            /// Creates the tag from its parts. Names are validated, and the
            /// first occurrence of a repeated attribute name keeps its position.
            pub fn new(name: &str, attributes: &[(&str, &str)]) -> Result<Self, TagError> {
                validate_tag_name(name)?;

                let mut tag = $Tag {
                    name: name.to_string(),
                    attributes: Attributes::default(),
                    serialized: String::new(),
                };

                for (name, value) in attributes {
                    tag.attributes.set(name, value)?;
                }

                tag.reserialize();

                Ok(tag)
            }

            pub(crate) fn from_raw(raw: &str) -> Result<Self, TokenParseError> {
                let (name, attributes) = parse_element_tag(raw, $kind)?;

                Ok($Tag {
                    name,
                    attributes,
                    serialized: raw.to_string(),
                })
            }

            fn reserialize(&mut self) {
                let mut serialized = String::with_capacity(self.serialized.len().max(16));

                serialized.push('<');
                serialized.push_str(&self.name);
                self.attributes.to_xml(&mut serialized);
                serialized.push_str($closing);

                trace!(@reserialize serialized);

                self.serialized = serialized;
            }
        }

        impl Serialize for $Tag {
            #[inline]
            fn serialized(&self) -> &str {
                &self.serialized
            }
        }

        impl Tag for $Tag {
            #[inline]
            fn name(&self) -> &str {
                &self.name
            }

            fn set_name(&mut self, name: &str) -> Result<(), TagNameError> {
                if self.name != name {
                    validate_tag_name(name)?;
                    self.name = name.to_string();
                    self.reserialize();
                }

                Ok(())
            }
        }

        impl AttributedTag for $Tag {
            #[inline]
            fn attributes(&self) -> &Attributes {
                &self.attributes
            }

            fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), AttributeNameError> {
                if self.attributes.set(name, value)? {
                    self.reserialize();
                }

                Ok(())
            }

            fn remove_attribute(&mut self, name: &str) {
                if self.attributes.remove(name) {
                    self.reserialize();
                }
            }

            fn set_attribute_order(&mut self, order: &[&str], sort: bool) {
                if self.attributes.reorder(order, sort) {
                    self.reserialize();
                }
            }
        }
    };
}

impl_element_tag!(StartTag, "start tag", ">", "A start tag: `<tag>` or `<tag att=\"val\">`.");
impl_element_tag!(EmptyTag, "empty tag", "/>", "An empty tag: `<tag/>` or `<tag att=\"val\"/>`.");

impl EmptyTag {
    /// Splits the tag into an equivalent start and end tag pair.
    pub fn into_start_and_end(self) -> (StartTag, EndTag) {
        let end = EndTag::from_name(self.name.clone());
        let mut start = StartTag {
            name: self.name,
            attributes: self.attributes,
            serialized: String::new(),
        };

        start.reserialize();

        (start, end)
    }
}

/// An end tag: `</tag>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndTag {
    name: String,
    serialized: String,
}

impl EndTag {
    pub fn new(name: &str) -> Result<Self, TagNameError> {
        validate_tag_name(name)?;

        Ok(EndTag::from_name(name.to_string()))
    }

    fn from_name(name: String) -> Self {
        let mut tag = EndTag {
            name,
            serialized: String::new(),
        };

        tag.reserialize();
        tag
    }

    pub(crate) fn from_raw(raw: &str) -> Result<Self, TokenParseError> {
        let name = raw
            .strip_prefix("</")
            .and_then(|r| r.strip_suffix('>'))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| TokenParseError::UnexpectedMarkup {
                kind: "end tag",
                markup: raw.to_string(),
            })?;

        Ok(EndTag {
            name: name.to_string(),
            serialized: raw.to_string(),
        })
    }

    fn reserialize(&mut self) {
        self.serialized = format!("</{}>", self.name);

        trace!(@reserialize self.serialized);
    }
}

impl Serialize for EndTag {
    #[inline]
    fn serialized(&self) -> &str {
        &self.serialized
    }
}

impl Tag for EndTag {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) -> Result<(), TagNameError> {
        if self.name != name {
            validate_tag_name(name)?;
            self.name = name.to_string();
            self.reserialize();
        }

        Ok(())
    }
}
