//! The shallow parsing expression.
//!
//! The grammar is a single regular expression with exactly two top-level
//! alternatives: a run of text not containing `<`, or one markup item
//! starting with `<`. It is the REX expression described in Robert D.
//! Cameron, "REX: XML Shallow Parsing with Regular Expressions", Technical
//! Report TR 1998-17, School of Computing Science, Simon Fraser University,
//! November 1998.
//!
//! Several markup productions end with an optional closing delimiter. This
//! lets the expression match markup that never reaches its closing `>`, and
//! such a match is how the tokenizer recognizes malformed markup.
//!
//! The pieces are composed at compile time with `concat!`. Names follow the
//! paper: `_se` is a scanning expression, `_ce` a continuation expression
//! (what follows the markup opener).

use once_cell::sync::Lazy;
use regex::{Match, Matches, Regex};

macro_rules! text_se {
    () => {
        r"[^<]+"
    };
}

macro_rules! until_hyphen {
    () => {
        r"[^-]*-"
    };
}

macro_rules! until_2_hyphens {
    () => {
        concat!(until_hyphen!(), r"(?:[^-]", until_hyphen!(), r")*-")
    };
}

macro_rules! comment_ce {
    () => {
        concat!(until_2_hyphens!(), r">?")
    };
}

macro_rules! until_rsbs {
    () => {
        r"[^\]]*\](?:[^\]]+\])*\]+"
    };
}

macro_rules! cdata_ce {
    () => {
        concat!(until_rsbs!(), r"(?:[^\]>]", until_rsbs!(), r")*>")
    };
}

macro_rules! s {
    () => {
        r"[ \n\t\r]+"
    };
}

macro_rules! name_start {
    () => {
        r"[A-Za-z_:]|[^\x00-\x7F]"
    };
}

macro_rules! name_char {
    () => {
        r"[A-Za-z0-9_:.-]|[^\x00-\x7F]"
    };
}

macro_rules! name {
    () => {
        concat!(r"(?:", name_start!(), r")(?:", name_char!(), r")*")
    };
}

macro_rules! quote_se {
    () => {
        r#""[^"]*"|'[^']*'"#
    };
}

macro_rules! dt_ident_se {
    () => {
        concat!(
            s!(),
            name!(),
            r"(?:",
            s!(),
            r"(?:",
            name!(),
            r"|",
            quote_se!(),
            r"))*"
        )
    };
}

macro_rules! markup_decl_ce {
    () => {
        concat!(r#"(?:[^\]"'><]+|"#, quote_se!(), r")*>")
    };
}

macro_rules! s1 {
    () => {
        r"[\n\r\t ]"
    };
}

macro_rules! until_qms {
    () => {
        r"[^?]*\?+"
    };
}

macro_rules! pi_tail {
    () => {
        concat!(
            r"\?>|",
            s1!(),
            until_qms!(),
            r"(?:[^>?]",
            until_qms!(),
            r")*>"
        )
    };
}

macro_rules! dt_item_se {
    () => {
        concat!(
            r"<(?:!(?:--",
            until_2_hyphens!(),
            r">|[^-]",
            markup_decl_ce!(),
            r")|\?",
            name!(),
            r"(?:",
            pi_tail!(),
            r"))|%",
            name!(),
            r";|",
            s!()
        )
    };
}

macro_rules! doctype_ce {
    () => {
        concat!(
            dt_ident_se!(),
            r"(?:",
            s!(),
            r")?(?:\[(?:",
            dt_item_se!(),
            r")*\](?:",
            s!(),
            r")?)?>?"
        )
    };
}

macro_rules! decl_ce {
    () => {
        concat!(
            r"--(?:",
            comment_ce!(),
            r")?|\[CDATA\[(?:",
            cdata_ce!(),
            r")?|DOCTYPE(?:",
            doctype_ce!(),
            r")?"
        )
    };
}

macro_rules! pi_ce {
    () => {
        concat!(name!(), r"(?:", pi_tail!(), r")?")
    };
}

macro_rules! end_tag_ce {
    () => {
        concat!(name!(), r"(?:", s!(), r")?>?")
    };
}

macro_rules! att_val_se {
    () => {
        r#""[^<"]*"|'[^<']*'"#
    };
}

macro_rules! attributes_se {
    () => {
        concat!(
            r"(?:",
            s!(),
            name!(),
            r"(?:",
            s!(),
            r")?=(?:",
            s!(),
            r")?(?:",
            att_val_se!(),
            r"))*"
        )
    };
}

macro_rules! elem_tag_ce {
    () => {
        concat!(name!(), attributes_se!(), r"(?:", s!(), r")?/?>?")
    };
}

macro_rules! markup_spe {
    () => {
        concat!(
            r"<(?:!(?:",
            decl_ce!(),
            r")?|\?(?:",
            pi_ce!(),
            r")?|/(?:",
            end_tag_ce!(),
            r")?|(?:",
            elem_tag_ce!(),
            r")?)"
        )
    };
}

/// The XML shallow parsing expression.
pub const XML_SPE: &str = concat!(text_se!(), r"|", markup_spe!());

/// Expression decomposing a complete start or empty tag into its name and
/// the attribute run.
const ELEMENT_TAG_RE: &str = concat!(
    r"^<(?P<name>",
    name!(),
    r")(?P<attributes>",
    attributes_se!(),
    r")(?:",
    s!(),
    r")?/?>$"
);

/// Expression matching one attribute together with its leading whitespace.
const ATTRIBUTE_RE: &str = concat!(
    r"(?P<attribute>",
    s!(),
    r"(?P<attribute_name>",
    name!(),
    r")(?:",
    s!(),
    r")?=(?:",
    s!(),
    r")?(?P<attribute_value>",
    att_val_se!(),
    r"))"
);

const NAME_RE: &str = concat!(r"^(?:", name!(), r")$");

/// DOCTYPE field decomposition. Stricter than the shallow expression: a
/// DOCTYPE accepted by the latter may still be rejected here.
const DOCTYPE_FIELDS_RE: &str = concat!(
    r"(?s)^<!DOCTYPE\s+(?P<document_element>[^\s\[>]+)",
    r"(?:\s+(?P<id_type>SYSTEM|PUBLIC)",
    r#"(?:\s+(?:"(?P<id_dq>[^"]*)"|'(?P<id_sq>[^']*)'))?"#,
    r#"(?:\s+(?:"(?P<system_dq>[^"]*)"|'(?P<system_sq>[^']*)'))?)?"#,
    r"(?:\s*\[(?P<internal_subset>.*)\])?",
    r"\s*>$"
);

macro_rules! lazy_regex {
    ($($name:ident = $pattern:expr;)+) => {
        $(
            pub(crate) static $name: Lazy<Regex> = Lazy::new(|| {
                Regex::new($pattern).expect("grammar expressions are valid regular expressions")
            });
        )+
    };
}

lazy_regex! {
    XML_SPE_REGEX = XML_SPE;
    ELEMENT_TAG_REGEX = ELEMENT_TAG_RE;
    ATTRIBUTE_REGEX = ATTRIBUTE_RE;
    NAME_REGEX = NAME_RE;
    DOCTYPE_FIELDS_REGEX = DOCTYPE_FIELDS_RE;
}

/// Returns `true` if `name` is a valid tag or attribute name.
#[inline]
pub fn is_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

/// Splits `input` into raw token strings.
///
/// ```
/// assert_eq!(
///     rex_shallow::shallow_parse("<p>some text</p>"),
///     vec!["<p>", "some text", "</p>"]
/// );
/// ```
pub fn shallow_parse(input: &str) -> Vec<&str> {
    shallow_iterparse(input).map(|m| m.as_str()).collect()
}

/// Lazily splits `input` into successive, non-overlapping grammar matches.
#[inline]
pub fn shallow_iterparse(input: &str) -> Matches<'static, '_> {
    XML_SPE_REGEX.find_iter(input)
}

/// Returns the grammar match starting at the beginning of `input`, if any.
#[inline]
pub(crate) fn leading_match(input: &str) -> Option<Match<'_>> {
    XML_SPE_REGEX.find(input).filter(|m| m.start() == 0)
}
