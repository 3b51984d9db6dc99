use super::OpenElementStack;
use crate::errors::Error;
use crate::rewritable_units::{IntoTokenResult, Token};
use hashbrown::HashSet;

/// Collects the distinct element paths of a token stream, in the order
/// they first occur.
///
/// A path is the `/`-joined list of names of the open elements. Malformed
/// markup is skipped. Tag nesting isn't checked beyond the end tag needing
/// an open element to close.
///
/// ```
/// use rex_shallow::{find_all_contexts, tokenize};
///
/// assert_eq!(
///     find_all_contexts(tokenize("<a><b/><c></c></a>")).unwrap(),
///     vec!["a", "a/b", "a/c"]
/// );
/// ```
pub fn find_all_contexts<I>(tokens: I) -> Result<Vec<String>, Error>
where
    I: IntoIterator,
    I::Item: IntoTokenResult,
{
    let mut open_elements = OpenElementStack::default();
    let mut seen = HashSet::new();
    let mut contexts = Vec::new();

    let mut record = |open_elements: &OpenElementStack| {
        let path = open_elements.path();

        if seen.insert(path.clone()) {
            contexts.push(path);
        }
    };

    for item in tokens {
        match item.into_token_result()? {
            Token::StartTag(start_tag) => {
                open_elements.push(&start_tag);
                record(&open_elements);
            }
            Token::EmptyTag(empty_tag) => {
                open_elements.push(&empty_tag);
                record(&open_elements);
                open_elements.pop_innermost();
            }
            Token::EndTag(end_tag) => open_elements.pop(&end_tag)?,
            _ => (),
        }
    }

    Ok(contexts)
}
