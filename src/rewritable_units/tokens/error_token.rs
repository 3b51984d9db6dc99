use crate::base::{ErrorDiagnostic, Span, DEFAULT_CONTEXT_SIZE};
use crate::rewritable_units::Serialize;

const DIAGNOSTIC_MESSAGE: &str = "Syntax error in markup";

/// Markup that starts with `<` but never reaches its closing `>`.
///
/// The token is opaque and can't be edited. It keeps the offending text, so
/// concatenating a token stream still reproduces its source, and the
/// position of that text in the source for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorToken {
    raw: String,
    span: Span,
}

impl ErrorToken {
    #[inline]
    pub(crate) fn new(raw: &str, span: Span) -> Self {
        ErrorToken {
            raw: raw.to_string(),
            span,
        }
    }

    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Position of the malformed markup in the tokenized source.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Describes the error with the surrounding text of `source`, which must
    /// be the text this token was produced from.
    #[inline]
    pub fn diagnostic(&self, source: &str) -> ErrorDiagnostic {
        self.diagnostic_with_context_size(source, DEFAULT_CONTEXT_SIZE)
    }

    pub fn diagnostic_with_context_size(
        &self,
        source: &str,
        context_size: usize,
    ) -> ErrorDiagnostic {
        ErrorDiagnostic::new(DIAGNOSTIC_MESSAGE, source, self.span.end, context_size)
    }
}

impl Serialize for ErrorToken {
    #[inline]
    fn serialized(&self) -> &str {
        &self.raw
    }
}
