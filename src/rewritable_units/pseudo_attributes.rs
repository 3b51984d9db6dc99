use super::{Attribute, Attributes};
use crate::base::Span;
use crate::grammar::ATTRIBUTE_REGEX;
use hashbrown::HashMap;
use std::fmt::{self, Debug};
use std::slice::Iter;

/// Attribute-like `name="value"` pairs found in a processing instruction.
///
/// Besides the values, the store records where each pair sits in the
/// instruction: the span covers the pair and the whitespace before it, so
/// that removing the span removes the pair cleanly. A repeated name has a
/// span per occurrence, in instruction order. Spans refer to the
/// instruction the store was located in and are stale once it changes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PseudoAttributes {
    attributes: Attributes,
    spans: HashMap<String, Vec<Span>>,
}

impl PseudoAttributes {
    pub(crate) fn locate(instruction: &str) -> Self {
        let mut pseudo_attributes = PseudoAttributes::default();

        // NOTE: the attribute expression requires leading whitespace, so the
        // instruction is scanned with one extra space in front of it.
        let prefixed = format!(" {instruction}");

        for captures in ATTRIBUTE_REGEX.captures_iter(&prefixed) {
            if let (Some(attribute), Some(name), Some(value)) = (
                captures.name("attribute"),
                captures.name("attribute_name"),
                captures.name("attribute_value"),
            ) {
                let value = value.as_str();

                pseudo_attributes
                    .attributes
                    .insert(name.as_str(), &value[1..value.len() - 1]);

                pseudo_attributes
                    .spans
                    .entry(name.as_str().to_string())
                    .or_default()
                    .push(Span::from(attribute.range()).shift_back(1));
            }
        }

        pseudo_attributes
    }

    /// Returns the value of the pseudo-attribute or an empty string if it's missing.
    #[inline]
    pub fn get(&self, name: &str) -> &str {
        self.attributes.get(name)
    }

    #[inline]
    pub fn get_opt(&self, name: &str) -> Option<&str> {
        self.attributes.get_opt(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Location of the last occurrence of the pseudo-attribute in the instruction.
    #[inline]
    pub fn span(&self, name: &str) -> Option<Span> {
        self.spans(name).last().copied()
    }

    /// Locations of every occurrence of the pseudo-attribute.
    #[inline]
    pub fn spans(&self, name: &str) -> &[Span] {
        self.spans.get(name).map_or(&[], Vec::as_slice)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Attribute> {
        self.attributes.iter()
    }

    #[inline]
    pub fn as_attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl Debug for PseudoAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.attributes
                    .iter()
                    .map(|a| (a.name(), a.value(), self.spans.get(a.name()))),
            )
            .finish()
    }
}
