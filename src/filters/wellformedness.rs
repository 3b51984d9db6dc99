use super::OpenElementStack;
use crate::errors::{Error, MarkupError, WellformednessError};
use crate::rewritable_units::{IntoTokenResult, Serialize, Token};

/// Validating pass-through that checks that tags nest correctly.
///
/// Tokens are yielded unchanged until the first violation, which is yielded
/// as an `Err` and ends the stream. Malformed markup is a violation too.
pub struct WellformednessCheck<I> {
    tokens: I,
    open_elements: OpenElementStack,
    require_closed_elements: bool,
    finished: bool,
}

impl<I> WellformednessCheck<I>
where
    I: Iterator,
    I::Item: IntoTokenResult,
{
    pub fn new(tokens: I) -> Self {
        WellformednessCheck {
            tokens,
            open_elements: OpenElementStack::default(),
            require_closed_elements: false,
            finished: false,
        }
    }

    /// Reports elements still open at the end of the stream as
    /// [`WellformednessError::UnclosedElements`]. Off by default, which
    /// allows checking document fragments.
    pub fn require_closed_elements(mut self, require: bool) -> Self {
        self.require_closed_elements = require;
        self
    }

    fn check(&mut self, token: &Token) -> Result<(), Error> {
        match token {
            Token::StartTag(start_tag) => self.open_elements.push(start_tag),
            Token::EndTag(end_tag) => self.open_elements.pop_matching(end_tag)?,
            Token::Error(error) => {
                let mut markup = error.raw().to_string();

                if let Some(Ok(next)) = self.tokens.next().map(IntoTokenResult::into_token_result) {
                    markup.push_str(next.serialized());
                }

                return Err(MarkupError { markup }.into());
            }
            _ => (),
        }

        Ok(())
    }

    fn check_end(&mut self) -> Option<Error> {
        if self.require_closed_elements && !self.open_elements.is_empty() {
            let names = self.open_elements.names().map(str::to_string).collect();

            Some(WellformednessError::UnclosedElements(names).into())
        } else {
            None
        }
    }
}

impl<I> Iterator for WellformednessCheck<I>
where
    I: Iterator,
    I::Item: IntoTokenResult,
{
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = match self.tokens.next() {
            Some(item) => item.into_token_result(),
            None => {
                self.finished = true;

                return self.check_end().map(Err);
            }
        };

        let result = item.and_then(|token| {
            self.check(&token)?;

            trace!(@filter "wellformedness", token);

            Ok(token)
        });

        if result.is_err() {
            self.finished = true;
        }

        Some(result)
    }
}

/// Wraps `tokens` in a [`WellformednessCheck`].
///
/// ```
/// use rex_shallow::{tokenize, wellformedness_check};
///
/// assert!(wellformedness_check(tokenize("<a><b></b></a>")).all(|t| t.is_ok()));
/// assert!(wellformedness_check(tokenize("<a><b></a></b>")).any(|t| t.is_err()));
/// ```
#[inline]
pub fn wellformedness_check<I>(tokens: I) -> WellformednessCheck<I::IntoIter>
where
    I: IntoIterator,
    I::Item: IntoTokenResult,
{
    WellformednessCheck::new(tokens.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn check(input: &str) -> Result<Vec<Token>, Error> {
        wellformedness_check(tokenize(input)).collect()
    }

    #[test]
    fn nested_tags() {
        let tokens = check("<a><b></b><c/>text</a>").unwrap();

        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn mismatched_end_tag() {
        assert_eq!(
            check("<a><b></a></b>"),
            Err(WellformednessError::MismatchedEndTag {
                start: "<b>".into(),
                end: "</a>".into()
            }
            .into())
        );
    }

    #[test]
    fn extra_end_tag() {
        assert_eq!(
            check("</a>"),
            Err(WellformednessError::ExtraEndTag("</a>".into()).into())
        );
    }

    #[test]
    fn malformed_markup_includes_next_token() {
        assert_eq!(
            check("<a><b c='1 <d>"),
            Err(MarkupError {
                markup: "<b c='1 <d>".into()
            }
            .into())
        );
    }

    #[test]
    fn stream_ends_after_first_error() {
        let mut items = wellformedness_check(tokenize("</a><b>"));

        assert!(items.next().is_some_and(|i| i.is_err()));
        assert!(items.next().is_none());
    }

    #[test]
    fn unclosed_elements() {
        assert!(check("<a><b>").is_ok());

        let items = wellformedness_check(tokenize("<a><b>"))
            .require_closed_elements(true)
            .collect::<Vec<_>>();

        assert_eq!(items.len(), 3);
        assert_eq!(
            items[2],
            Err(WellformednessError::UnclosedElements(vec!["a".into(), "b".into()]).into())
        );
    }

    #[test]
    fn accepts_plain_tokens() {
        let tokens = vec![
            Token::from_markup("<a>").unwrap(),
            Token::from_markup("</a>").unwrap(),
        ];

        assert_eq!(wellformedness_check(tokens).count(), 2);
    }
}
