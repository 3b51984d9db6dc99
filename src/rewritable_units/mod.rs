//! Live, editable tokens.
//!
//! Every token keeps its serialized text next to the structured fields it
//! was decomposed into. A freshly parsed token serializes to exactly the
//! source text it came from. Every setter that changes a field recomputes
//! the serialized text before returning, so the two never disagree.

use crate::errors::{AttributeNameError, Error, TagNameError, TokenParseError};
use bitflags::bitflags;
use std::fmt::{self, Display};
use std::str::FromStr;

pub use self::attributes::{Attribute, Attributes};
pub use self::pseudo_attributes::PseudoAttributes;
pub use self::tokens::*;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenKinds: u16 {
        const TEXT = 0b0000_0000_0001;
        const START_TAGS = 0b0000_0000_0010;
        const EMPTY_TAGS = 0b0000_0000_0100;
        const END_TAGS = 0b0000_0000_1000;
        const COMMENTS = 0b0000_0001_0000;
        const PROCESSING_INSTRUCTIONS = 0b0000_0010_0000;
        const XML_DECLARATIONS = 0b0000_0100_0000;
        const DOCTYPES = 0b0000_1000_0000;
        const CDATA = 0b0001_0000_0000;
        const ERRORS = 0b0010_0000_0000;

        const START_OR_EMPTY_TAGS = Self::START_TAGS.bits() | Self::EMPTY_TAGS.bits();
        const TAGS = Self::START_OR_EMPTY_TAGS.bits() | Self::END_TAGS.bits();
        const ANY_PROCESSING_INSTRUCTIONS =
            Self::PROCESSING_INSTRUCTIONS.bits() | Self::XML_DECLARATIONS.bits();
    }
}

/// Access to the text a token currently stands for.
pub trait Serialize {
    fn serialized(&self) -> &str;
}

/// Tokens that carry a tag name: start, empty and end tags.
///
/// Namespace handling is purely syntactic: the prefix is whatever precedes
/// the first `:` of the name.
pub trait Tag: Serialize {
    fn name(&self) -> &str;

    /// Renames the tag. The name must be a valid XML name.
    fn set_name(&mut self, name: &str) -> Result<(), TagNameError>;

    fn ns_prefix(&self) -> &str {
        self.name().split_once(':').map_or("", |(prefix, _)| prefix)
    }

    fn local_name(&self) -> &str {
        let name = self.name();

        name.split_once(':').map_or(name, |(_, local_name)| local_name)
    }

    /// Replaces the namespace prefix; an empty `prefix` removes it.
    fn set_ns_prefix(&mut self, prefix: &str) -> Result<(), TagNameError> {
        if self.ns_prefix() == prefix {
            return Ok(());
        }

        let name = if prefix.is_empty() {
            self.local_name().to_string()
        } else {
            format!("{}:{}", prefix, self.local_name())
        };

        self.set_name(&name)
    }
}

/// Tags that carry attributes: start and empty tags.
pub trait AttributedTag: Tag {
    fn attributes(&self) -> &Attributes;

    /// Sets the attribute, appending it if it's new and replacing its
    /// value in place otherwise.
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), AttributeNameError>;

    /// Removes the attribute. Does nothing if it's absent.
    fn remove_attribute(&mut self, name: &str);

    /// Moves the attributes listed in `order` to the front, in that order.
    /// The remaining ones follow in their current order, or sorted
    /// case-insensitively if `sort` is set.
    fn set_attribute_order(&mut self, order: &[&str], sort: bool);

    #[inline]
    fn attribute(&self, name: &str) -> &str {
        self.attributes().get(name)
    }

    #[inline]
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes().contains(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(Text),
    StartTag(StartTag),
    EmptyTag(EmptyTag),
    EndTag(EndTag),
    Comment(Comment),
    ProcessingInstruction(ProcessingInstruction),
    XmlDeclaration(XmlDeclaration),
    Doctype(Doctype),
    Cdata(Cdata),
    Error(ErrorToken),
}

macro_rules! dispatch {
    ($self:ident, $token:ident => $expr:expr) => {
        match $self {
            Token::Text($token) => $expr,
            Token::StartTag($token) => $expr,
            Token::EmptyTag($token) => $expr,
            Token::EndTag($token) => $expr,
            Token::Comment($token) => $expr,
            Token::ProcessingInstruction($token) => $expr,
            Token::XmlDeclaration($token) => $expr,
            Token::Doctype($token) => $expr,
            Token::Cdata($token) => $expr,
            Token::Error($token) => $expr,
        }
    };
}

impl Token {
    /// Classifies a string holding exactly one token.
    pub fn from_markup(markup: &str) -> Result<Token, TokenParseError> {
        crate::tokenizer::classify_single(markup)
    }

    pub fn kind(&self) -> TokenKinds {
        match self {
            Token::Text(_) => TokenKinds::TEXT,
            Token::StartTag(_) => TokenKinds::START_TAGS,
            Token::EmptyTag(_) => TokenKinds::EMPTY_TAGS,
            Token::EndTag(_) => TokenKinds::END_TAGS,
            Token::Comment(_) => TokenKinds::COMMENTS,
            Token::ProcessingInstruction(_) => TokenKinds::PROCESSING_INSTRUCTIONS,
            Token::XmlDeclaration(_) => TokenKinds::XML_DECLARATIONS,
            Token::Doctype(_) => TokenKinds::DOCTYPES,
            Token::Cdata(_) => TokenKinds::CDATA,
            Token::Error(_) => TokenKinds::ERRORS,
        }
    }

    /// Returns `true` if the token is of one of the given kinds.
    #[inline]
    pub fn is_a(&self, kinds: TokenKinds) -> bool {
        kinds.intersects(self.kind())
    }

    /// Returns `true` if the token is of one of the given kinds and its
    /// name (tag name, or target for processing instructions) is one of
    /// `names`.
    pub fn is_named(&self, kinds: TokenKinds, names: &[&str]) -> bool {
        self.is_a(kinds) && self.name().is_some_and(|name| names.contains(&name))
    }

    /// Tag name of tags, target of processing instructions.
    pub fn name(&self) -> Option<&str> {
        match self {
            Token::StartTag(t) => Some(t.name()),
            Token::EmptyTag(t) => Some(t.name()),
            Token::EndTag(t) => Some(t.name()),
            Token::ProcessingInstruction(t) => Some(t.target()),
            Token::XmlDeclaration(t) => Some(t.target()),
            _ => None,
        }
    }
}

impl Serialize for Token {
    #[inline]
    fn serialized(&self) -> &str {
        dispatch!(self, t => t.serialized())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.serialized())
    }
}

impl FromStr for Token {
    type Err = TokenParseError;

    #[inline]
    fn from_str(markup: &str) -> Result<Self, Self::Err> {
        Token::from_markup(markup)
    }
}

macro_rules! impl_from {
    ($($Type:ident),+) => {
        $(
            impl From<$Type> for Token {
                #[inline]
                fn from(token: $Type) -> Self {
                    Token::$Type(token)
                }
            }
        )+
    };
}

impl_from!(
    Text,
    StartTag,
    EmptyTag,
    EndTag,
    Comment,
    ProcessingInstruction,
    XmlDeclaration,
    Doctype,
    Cdata
);

impl From<ErrorToken> for Token {
    #[inline]
    fn from(token: ErrorToken) -> Self {
        Token::Error(token)
    }
}

macro_rules! impl_from_str {
    ($($Type:ident => $kind:expr),+) => {
        $(
            impl FromStr for $Type {
                type Err = TokenParseError;

                fn from_str(markup: &str) -> Result<Self, Self::Err> {
                    match Token::from_markup(markup)? {
                        Token::$Type(token) => Ok(token),
                        _ => Err(TokenParseError::UnexpectedMarkup {
                            kind: $kind,
                            markup: markup.to_string(),
                        }),
                    }
                }
            }
        )+
    };
}

impl_from_str!(
    Text => "text",
    StartTag => "start tag",
    EmptyTag => "empty tag",
    EndTag => "end tag",
    Comment => "comment",
    ProcessingInstruction => "processing instruction",
    XmlDeclaration => "XML declaration",
    Doctype => "DOCTYPE",
    Cdata => "CDATA section"
);

/// Items accepted by the token stream consumers: plain tokens, or the
/// results produced by the tokenizer and the filters.
pub trait IntoTokenResult {
    fn into_token_result(self) -> Result<Token, Error>;
}

impl IntoTokenResult for Token {
    #[inline]
    fn into_token_result(self) -> Result<Token, Error> {
        Ok(self)
    }
}

impl<E: Into<Error>> IntoTokenResult for Result<Token, E> {
    #[inline]
    fn into_token_result(self) -> Result<Token, Error> {
        self.map_err(Into::into)
    }
}

mod attributes;
mod pseudo_attributes;
mod tokens;
