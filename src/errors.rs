//! Error types.

use thiserror::Error;

/// A literal string could not be turned into the requested token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenParseError {
    /// The string is not exactly one piece of markup of the expected kind.
    #[error("Expected {kind} markup, found: \"{markup}\"")]
    UnexpectedMarkup { kind: &'static str, markup: String },

    /// The DOCTYPE matched the shallow grammar, but its fields can't be extracted.
    #[error("Secondary parsing error: \"unexpected DOCTYPE found: {0}\"")]
    Doctype(String),
}

/// Malformed markup reached a consumer that treats it as fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Syntax error in markup: \"{markup}\"")]
pub struct MarkupError {
    /// The malformed markup followed by the text of the token after it.
    pub markup: String,
}

/// Tags don't nest correctly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WellformednessError {
    #[error("Wellformedness error: \"Extra end tag found: \"{0}\"\"")]
    ExtraEndTag(String),

    #[error("Wellformedness error: \"\"{start}\" matched by \"{end}\"\"")]
    MismatchedEndTag { start: String, end: String },

    #[error("Wellformedness error: \"Unclosed elements at the end of input: {}\"", .0.join(", "))]
    UnclosedElements(Vec<String>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeNameError {
    #[error("Attribute name can't be empty.")]
    Empty,

    #[error("`{0}` is not a valid attribute name.")]
    InvalidName(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagNameError {
    #[error("Tag name can't be empty.")]
    Empty,

    #[error("`{0}` is not a valid tag name.")]
    InvalidName(String),
}

/// A tag couldn't be built from its parts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error(transparent)]
    TagName(#[from] TagNameError),

    #[error(transparent)]
    AttributeName(#[from] AttributeNameError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessingInstructionError {
    #[error("`{0}` is not a valid processing instruction target.")]
    InvalidTarget(String),

    #[error("The `xml` target is reserved for the XML declaration.")]
    ReservedTarget,

    #[error("Processing instruction text shouldn't contain the closing sequence (`?>`).")]
    ClosingSequence,

    #[error(transparent)]
    AttributeName(#[from] AttributeNameError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    #[error("Text shouldn't contain a markup opening character (`<`).")]
    MarkupOpening,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctypeLiteralError {
    #[error("DOCTYPE literal can't contain both single and double quotes.")]
    MixedQuotes,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTextError {
    #[error("Comment text shouldn't contain a double hyphen (`--`).")]
    DoubleHyphen,

    #[error("Comment text shouldn't end with a hyphen.")]
    TrailingHyphen,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CdataTextError {
    #[error("CDATA section content shouldn't contain CDATA closing sequence (`]]>`).")]
    CdataClosingSequence,
}

/// Any error a token stream or one of its filters can produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    TokenParse(#[from] TokenParseError),

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error(transparent)]
    Wellformedness(#[from] WellformednessError),
}
