use std::fmt::{self, Display};

pub const DEFAULT_CONTEXT_SIZE: usize = 30;

const ELLIPSIS: &str = "...";

/// Human-readable report pointing at a position in the source text.
///
/// The report shows a bounded window of the source before and after the
/// position, with an ellipsis on each side that was cut off. It is advisory:
/// nothing in the crate parses it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDiagnostic {
    message: String,
    before: String,
    after: String,
}

#[inline]
fn floor_char_boundary(s: &str, mut pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }

    while !s.is_char_boundary(pos) {
        pos -= 1;
    }

    pos
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
}

impl ErrorDiagnostic {
    /// Builds a report for the position `end` in `source`, showing up to
    /// `context_size` bytes on each side of it.
    pub fn new(message: impl Into<String>, source: &str, end: usize, context_size: usize) -> Self {
        let end = floor_char_boundary(source, end);

        let (start, start_ellipsis) = if end >= context_size {
            let start = floor_char_boundary(source, end - context_size);

            (start, if start > 0 { ELLIPSIS } else { "" })
        } else {
            (0, "")
        };

        let after_end = floor_char_boundary(source, end.saturating_add(context_size));
        let end_ellipsis = if after_end < source.len() {
            ELLIPSIS
        } else {
            ""
        };

        let mut before = String::from(start_ellipsis);

        before.push('"');
        escape_into(&mut before, &source[start..end]);

        let mut after = String::new();

        escape_into(&mut after, &source[end..after_end]);
        after.push('"');
        after.push_str(end_ellipsis);

        ErrorDiagnostic {
            message: message.into(),
            before,
            after,
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source text preceding the reported position, prefixed with the marker quote.
    #[inline]
    pub fn before(&self) -> &str {
        &self.before
    }

    /// Source text following the reported position, suffixed with the marker quote.
    #[inline]
    pub fn after(&self) -> &str {
        &self.after
    }
}

impl Display for ErrorDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = " ".repeat(self.before.chars().count());

        write!(
            f,
            "\n    {}:\n    {}\n    {}{}\n",
            self.message, self.before, indent, self.after
        )
    }
}
