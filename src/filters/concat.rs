use crate::errors::Error;
use crate::rewritable_units::{IntoTokenResult, Serialize, TokenKinds};

/// Concatenates the serialized text of `tokens`.
///
/// Items may be plain tokens or results, so a tokenizer or a filter chain can
/// be passed directly. The first `Err` item is returned as is. A string is not
/// a token sequence and is rejected at compile time:
///
/// ```compile_fail
/// rex_shallow::concat_tokens("<a/>");
/// ```
#[inline]
pub fn concat_tokens<I>(tokens: I) -> Result<String, Error>
where
    I: IntoIterator,
    I::Item: IntoTokenResult,
{
    concat_tokens_of(tokens, TokenKinds::all())
}

/// Like [`concat_tokens`], but skips tokens that aren't of one of `kinds`.
///
/// ```
/// use rex_shallow::{concat_tokens_of, tokenize, TokenKinds};
///
/// let text = concat_tokens_of(tokenize("<p>some <b>bold</b> text</p>"), TokenKinds::TEXT);
///
/// assert_eq!(text.unwrap(), "some bold text");
/// ```
pub fn concat_tokens_of<I>(tokens: I, kinds: TokenKinds) -> Result<String, Error>
where
    I: IntoIterator,
    I::Item: IntoTokenResult,
{
    let mut output = String::new();

    for item in tokens {
        let token = item.into_token_result()?;

        if token.is_a(kinds) {
            output.push_str(token.serialized());
        }
    }

    Ok(output)
}
