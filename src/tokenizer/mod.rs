//! Lazy classification of grammar matches into tokens.

mod classifier;
mod metadata;

use crate::base::{ErrorDiagnostic, Span};
use crate::errors::Error;
use crate::grammar::shallow_iterparse;
use crate::rewritable_units::{ErrorToken, Token};
use regex::Matches;
use std::iter::{FusedIterator, Peekable};

pub(crate) use self::classifier::{classify, classify_single};
pub use self::metadata::DocumentMetadata;

type ErrorSink<'i> = Box<dyn FnMut(&ErrorDiagnostic) + 'i>;

/// A forward-only stream of the tokens of `input`.
///
/// Malformed markup doesn't stop the stream: it's emitted as an error token
/// and tokenization resumes right after it. The stream only yields `Err`
/// for a DOCTYPE that the grammar accepts but whose fields can't be
/// extracted.
pub struct Tokenizer<'i> {
    input: &'i str,
    matches: Peekable<Matches<'static, 'i>>,
    metadata: DocumentMetadata,
    error_sink: Option<ErrorSink<'i>>,
}

impl<'i> Tokenizer<'i> {
    pub fn new(input: &'i str) -> Self {
        Tokenizer {
            input,
            matches: shallow_iterparse(input).peekable(),
            metadata: DocumentMetadata::default(),
            error_sink: None,
        }
    }

    /// Sets a handler that receives a diagnostic for every error token
    /// before the token is yielded.
    pub fn with_error_sink(mut self, sink: impl FnMut(&ErrorDiagnostic) + 'i) -> Self {
        self.error_sink = Some(Box::new(sink));
        self
    }

    /// Metadata of the XML declaration seen so far, if any.
    #[inline]
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    #[inline]
    pub fn input(&self) -> &'i str {
        self.input
    }

    fn emit_error(&mut self, mut span: Span) -> Token {
        // NOTE: the text run that follows unterminated markup is the rest of
        // the malformed construct (e.g. `b="1` in `<a b="1`).
        if let Some(text) = self.matches.next_if(|m| !m.as_str().starts_with('<')) {
            span.end = text.end();
        }

        let raw = &self.input[span.range()];

        trace!(@error span, raw);

        let token = ErrorToken::new(raw, span);

        if let Some(sink) = self.error_sink.as_mut() {
            sink(&token.diagnostic(self.input));
        }

        token.into()
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.matches.next()?;
        let raw = m.as_str();
        let span = Span::from(m.range());

        if raw.starts_with('<') && !raw.ends_with('>') {
            return Some(Ok(self.emit_error(span)));
        }

        let token = match classify(raw, span) {
            Ok(token) => token,
            Err(e) => return Some(Err(e.into())),
        };

        if let Token::XmlDeclaration(declaration) = &token {
            self.metadata = DocumentMetadata::from_instruction(declaration.instruction());
        }

        trace!(@token token);

        Some(Ok(token))
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Tokenizes `input`.
///
/// ```
/// use rex_shallow::{tokenize, Serialize};
///
/// let tokens = tokenize("<p>some text</p>")
///     .map(|t| t.map(|t| t.serialized().to_string()))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
///
/// assert_eq!(tokens, vec!["<p>", "some text", "</p>"]);
/// ```
#[inline]
pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer::new(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TokenParseError;
    use crate::rewritable_units::{Serialize, TokenKinds};
    use encoding_rs::WINDOWS_1252;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).collect::<Result<_, _>>().unwrap()
    }

    fn serialized(input: &str) -> Vec<String> {
        tokens(input)
            .iter()
            .map(|t| t.serialized().to_string())
            .collect()
    }

    #[test]
    fn round_trip() {
        let input = concat!(
            "<?xml version='1.0' encoding='utf-8'?>\n",
            "<!DOCTYPE doc SYSTEM 'doc.dtd' [<!ENTITY e \"x\">]>\n",
            "<doc a = \"1\">\n",
            "  <!-- a <comment> -->\n",
            "  <?pi some data?>\n",
            "  <![CDATA[ <not> ]] markup ]]>\n",
            "  <x:empty\tb='2'/>\n",
            "</doc >\n"
        );

        assert_eq!(serialized(input).concat(), input);
    }

    #[test]
    fn token_kinds() {
        let kinds = tokens("<a><!--c--><b/>t</a>")
            .iter()
            .map(Token::kind)
            .collect::<Vec<_>>();

        assert_eq!(
            kinds,
            vec![
                TokenKinds::START_TAGS,
                TokenKinds::COMMENTS,
                TokenKinds::EMPTY_TAGS,
                TokenKinds::TEXT,
                TokenKinds::END_TAGS
            ]
        );
    }

    #[test]
    fn unterminated_markup_is_a_single_error_token() {
        let tokens = tokens(r#"<a b="1"#);

        assert_eq!(tokens.len(), 1);

        match &tokens[0] {
            Token::Error(error) => {
                assert_eq!(error.raw(), r#"<a b="1"#);
                assert_eq!(error.span(), Span::new(0, 7));
            }
            t => panic!("expected an error token, got {t:?}"),
        }
    }

    #[test]
    fn tokenization_resumes_after_error() {
        assert_eq!(
            serialized(r#"<p><a b="1 <b/>text</p>"#),
            vec!["<p>", r#"<a b="1 "#, "<b/>", "text", "</p>"]
        );
    }

    #[test]
    fn error_absorbing_text_that_ends_with_gt() {
        let tokens = tokens(r#"<a b="1 >"#);

        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_a(TokenKinds::ERRORS));
        assert_eq!(tokens[0].serialized(), r#"<a b="1 >"#);
    }

    #[test]
    fn error_sink() {
        let mut reports = Vec::new();

        let count = tokenize("text <a b")
            .with_error_sink(|diagnostic| reports.push(diagnostic.to_string()))
            .count();

        assert_eq!(count, 2);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("Syntax error in markup"));
    }

    #[test]
    fn undecomposable_doctype_yields_err_and_continues() {
        let mut tokenizer = tokenize("<!DOCTYPE a b><a/>");

        assert_eq!(
            tokenizer.next(),
            Some(Err(TokenParseError::Doctype("<!DOCTYPE a b>".into()).into()))
        );
        assert!(tokenizer.next().is_some_and(|t| t.is_ok()));
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn metadata() {
        let mut tokenizer = tokenize("<?xml version='1.0' encoding='latin1'?><a/>");

        assert_eq!(tokenizer.metadata(), &DocumentMetadata::default());

        let declaration = tokenizer.next();

        assert_eq!(tokenizer.metadata().version.as_deref(), Some("1.0"));
        assert_eq!(tokenizer.metadata().encoding, Some(WINDOWS_1252));

        match declaration {
            Some(Ok(Token::XmlDeclaration(declaration))) => {
                assert_eq!(declaration.metadata(), *tokenizer.metadata());
            }
            t => panic!("expected an XML declaration, got {t:?}"),
        }
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").next().is_none());
    }
}
