//! Shallow XML parsing with live, rewritable tokens.
//!
//! The input is split into tokens by a single regular expression (REX) that
//! recognizes text runs and markup items without building a tree. Each token
//! keeps its serialized text alongside its decomposed fields; editing a field
//! updates the serialized text right away. Concatenating the tokens of an
//! untouched stream reproduces the input exactly.
//!
//! ```
//! use rex_shallow::{concat_tokens, tokenize, AttributedTag, Token};
//!
//! let output = concat_tokens(tokenize(r#"<a href="x">link</a>"#).map(|token| {
//!     token.and_then(|mut token| {
//!         if let Token::StartTag(tag) = &mut token {
//!             tag.set_attribute("rel", "nofollow").unwrap();
//!         }
//!
//!         Ok(token)
//!     })
//! }))
//! .unwrap();
//!
//! assert_eq!(output, r#"<a href="x" rel="nofollow">link</a>"#);
//! ```
//!
//! Malformed markup doesn't stop tokenization: it's yielded as an
//! [`ErrorToken`]. Filters such as [`wellformedness_check`] decide whether
//! that is fatal.

#[macro_use]
mod base;

mod filters;
mod grammar;
mod rewritable_units;
mod tokenizer;

pub mod errors;

pub use self::base::{ErrorDiagnostic, Span, DEFAULT_CONTEXT_SIZE};
pub use self::filters::*;
pub use self::grammar::{is_name, shallow_iterparse, shallow_parse, XML_SPE};
pub use self::rewritable_units::{
    Attribute, AttributedTag, Attributes, Cdata, Comment, Doctype, DoctypeIdType, EmptyTag,
    EndTag, ErrorToken, IntoTokenResult, ProcessingInstruction, PseudoAttributes, Serialize,
    StartTag, Tag, Text, Token, TokenKinds, XmlDeclaration,
};
pub use self::tokenizer::{tokenize, DocumentMetadata, Tokenizer};
