use crate::base::Span;
use crate::errors::TokenParseError;
use crate::grammar::leading_match;
use crate::rewritable_units::{
    Cdata, Comment, Doctype, EmptyTag, EndTag, ErrorToken, ProcessingInstruction, StartTag, Text,
    Token, XmlDeclaration,
};

/// Turns one grammar match into a token.
///
/// Markup that doesn't end with `>` never reached its closing delimiter and
/// becomes an error token. Everything else is classified by its opening
/// characters.
pub(crate) fn classify(raw: &str, span: Span) -> Result<Token, TokenParseError> {
    if !raw.starts_with('<') {
        return Ok(Text::from_raw(raw).into());
    }

    if !raw.ends_with('>') {
        return Ok(ErrorToken::new(raw, span).into());
    }

    let token = match raw.as_bytes().get(1) {
        Some(b'/') => EndTag::from_raw(raw)?.into(),
        Some(b'!') => {
            if raw.starts_with("<!--") {
                Comment::from_raw(raw)?.into()
            } else if raw.starts_with("<![CDATA[") {
                Cdata::from_raw(raw)?.into()
            } else {
                Doctype::from_raw(raw)?.into()
            }
        }
        Some(b'?') => {
            if raw.starts_with("<?xml ") {
                XmlDeclaration::from_raw(raw)?.into()
            } else {
                ProcessingInstruction::from_raw(raw)?.into()
            }
        }
        _ if raw.as_bytes()[raw.len() - 2] == b'/' => EmptyTag::from_raw(raw)?.into(),
        _ => StartTag::from_raw(raw)?.into(),
    };

    Ok(token)
}

/// Classifies a string that must consist of exactly one grammar match.
pub(crate) fn classify_single(markup: &str) -> Result<Token, TokenParseError> {
    match leading_match(markup) {
        Some(m) if m.end() == markup.len() => classify(markup, Span::from(m.range())),
        _ => Err(TokenParseError::UnexpectedMarkup {
            kind: "single token",
            markup: markup.to_string(),
        }),
    }
}
