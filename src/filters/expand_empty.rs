use crate::errors::Error;
use crate::rewritable_units::{IntoTokenResult, Tag, Token};
use hashbrown::HashSet;

/// Rewrites every empty tag `<a/>` into the pair `<a></a>`, except for the
/// tags named in the keep-set.
pub struct ExpandEmptyTags<I> {
    tokens: I,
    keep_minimized: HashSet<String>,
    pending_end_tag: Option<Token>,
}

impl<I> ExpandEmptyTags<I>
where
    I: Iterator,
    I::Item: IntoTokenResult,
{
    pub fn new(tokens: I, keep_minimized: &[&str]) -> Self {
        ExpandEmptyTags {
            tokens,
            keep_minimized: keep_minimized.iter().map(|name| name.to_string()).collect(),
            pending_end_tag: None,
        }
    }
}

impl<I> Iterator for ExpandEmptyTags<I>
where
    I: Iterator,
    I::Item: IntoTokenResult,
{
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(end_tag) = self.pending_end_tag.take() {
            return Some(Ok(end_tag));
        }

        let token = match self.tokens.next()?.into_token_result() {
            Ok(Token::EmptyTag(tag)) if !self.keep_minimized.contains(tag.name()) => {
                let (start_tag, end_tag) = tag.into_start_and_end();

                trace!(@filter "expand empty tags", start_tag);

                self.pending_end_tag = Some(end_tag.into());

                start_tag.into()
            }
            item => return Some(item),
        };

        Some(Ok(token))
    }
}

/// Wraps `tokens` in an [`ExpandEmptyTags`] filter.
///
/// ```
/// use rex_shallow::{concat_tokens, expand_empty_tags, tokenize};
///
/// let expanded = concat_tokens(expand_empty_tags(tokenize("<a/><br/>"), &["br"])).unwrap();
///
/// assert_eq!(expanded, "<a></a><br/>");
/// ```
#[inline]
pub fn expand_empty_tags<I>(tokens: I, keep_minimized: &[&str]) -> ExpandEmptyTags<I::IntoIter>
where
    I: IntoIterator,
    I::Item: IntoTokenResult,
{
    ExpandEmptyTags::new(tokens.into_iter(), keep_minimized)
}
