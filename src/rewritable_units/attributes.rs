use crate::errors::AttributeNameError;
use crate::grammar::{is_name, ATTRIBUTE_REGEX};
use memchr::memchr2;
use std::fmt::{self, Debug};
use std::slice::Iter;

#[derive(Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name())
            .field("value", &self.value())
            .finish()
    }
}

#[inline]
pub(crate) fn validate_name(name: &str) -> Result<(), AttributeNameError> {
    if name.is_empty() {
        Err(AttributeNameError::Empty)
    } else if !is_name(name) {
        Err(AttributeNameError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Writes ` name="value"`, escaping `"` as `&quot;` and `<` as `&lt;` in
/// the value. Neither may appear in a double-quoted value.
pub(crate) fn write_attribute(output: &mut String, name: &str, value: &str) {
    output.push(' ');
    output.push_str(name);
    output.push_str("=\"");

    let mut tail = value;

    while let Some(pos) = memchr2(b'"', b'<', tail.as_bytes()) {
        output.push_str(&tail[..pos]);
        output.push_str(if tail.as_bytes()[pos] == b'"' {
            "&quot;"
        } else {
            "&lt;"
        });
        tail = &tail[pos + 1..];
    }

    output.push_str(tail);
    output.push('"');
}

/// Order-preserving name to value mapping of a tag's attributes.
///
/// Keys are unique: setting an existing name replaces its value in place.
/// Looking up a missing name yields an empty string. The store is owned by
/// its tag, and all mutation goes through the tag so that the tag's
/// serialized text is recomputed after every change.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    items: Vec<Attribute>,
}

impl Attributes {
    /// Extracts attributes from a run of `S name S? = S? "value"` items.
    ///
    /// Values lose their delimiters; a repeated name keeps its first
    /// position and takes the last value.
    pub(crate) fn parse(run: &str) -> Self {
        let mut attributes = Attributes::default();

        for captures in ATTRIBUTE_REGEX.captures_iter(run) {
            if let (Some(name), Some(value)) = (
                captures.name("attribute_name"),
                captures.name("attribute_value"),
            ) {
                let value = value.as_str();

                attributes.insert(name.as_str(), &value[1..value.len() - 1]);
            }
        }

        attributes
    }

    #[inline]
    fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|a| a.name == name)
    }

    /// Returns the value of the attribute or an empty string if it's missing.
    #[inline]
    pub fn get(&self, name: &str) -> &str {
        self.get_opt(name).unwrap_or("")
    }

    #[inline]
    pub fn get_opt(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.items[i].value())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Compares names after Unicode lowercasing, as the case-insensitive
    /// attribute sort does.
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        let name = name.to_lowercase();

        self.items.iter().any(|a| a.name.to_lowercase() == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Attribute> {
        self.items.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Attribute::name)
    }

    /// Inserts or replaces without validating the name. Returns `true` if
    /// the store changed.
    pub(crate) fn insert(&mut self, name: &str, value: &str) -> bool {
        match self.position(name) {
            Some(i) if self.items[i].value == value => false,
            Some(i) => {
                self.items[i].value = value.to_string();
                true
            }
            None => {
                self.items.push(Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                });
                true
            }
        }
    }

    pub(crate) fn set(&mut self, name: &str, value: &str) -> Result<bool, AttributeNameError> {
        validate_name(name)?;

        Ok(self.insert(name, value))
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => false,
        }
    }

    /// Moves the attributes named in `order` to the front, in that order.
    /// The rest keep their relative order, or are sorted case-insensitively
    /// if `sort` is set. Returns `true` if the order changed.
    pub(crate) fn reorder(&mut self, order: &[&str], sort: bool) -> bool {
        let before: Vec<String> = self.names().map(str::to_string).collect();
        let mut remaining = std::mem::take(&mut self.items);
        let mut reordered = Vec::with_capacity(remaining.len());

        for name in order {
            if let Some(i) = remaining.iter().position(|a| a.name == *name) {
                reordered.push(remaining.remove(i));
            }
        }

        if sort {
            remaining.sort_by_cached_key(|a| a.name.to_lowercase());
        }

        reordered.extend(remaining);

        let changed = reordered
            .iter()
            .map(Attribute::name)
            .ne(before.iter().map(String::as_str));

        self.items = reordered;

        changed
    }

    /// Renders the attributes as ` name="value"` pairs.
    ///
    /// Delimiters are normalized to double quotes; `"` in values is
    /// escaped as `&quot;`.
    pub fn to_xml(&self, output: &mut String) {
        for attribute in &self.items {
            write_attribute(output, &attribute.name, &attribute.value);
        }
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = Iter<'a, Attribute>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.items.iter().map(|a| (&a.name, &a.value)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_xml(attributes: &Attributes) -> String {
        let mut output = String::new();

        attributes.to_xml(&mut output);

        output
    }

    #[test]
    fn parse_preserves_order_and_strips_delimiters() {
        let attributes = Attributes::parse(r#" x="1" y='2'  z = "3""#);

        assert_eq!(attributes.names().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(attributes.get("y"), "2");
        assert_eq!(to_xml(&attributes), r#" x="1" y="2" z="3""#);
    }

    #[test]
    fn repeated_name_keeps_first_position() {
        let attributes = Attributes::parse(r#" a="1" b="2" a="3""#);

        assert_eq!(to_xml(&attributes), r#" a="3" b="2""#);
    }

    #[test]
    fn missing_key_yields_empty_string() {
        let attributes = Attributes::parse(r#" a="1""#);

        assert_eq!(attributes.get("missing"), "");
        assert_eq!(attributes.get_opt("missing"), None);
        assert!(!attributes.contains("missing"));
    }

    #[test]
    fn set_appends_or_replaces_in_place() {
        let mut attributes = Attributes::parse(r#" a="1" b="2""#);

        assert_eq!(attributes.set("a", "x"), Ok(true));
        assert_eq!(attributes.set("c", "3"), Ok(true));
        assert_eq!(attributes.set("c", "3"), Ok(false));
        assert_eq!(to_xml(&attributes), r#" a="x" b="2" c="3""#);
    }

    #[test]
    fn set_rejects_invalid_names() {
        let mut attributes = Attributes::default();

        assert_eq!(attributes.set("", "1"), Err(AttributeNameError::Empty));
        assert_eq!(
            attributes.set("1a", "1"),
            Err(AttributeNameError::InvalidName("1a".into()))
        );
        assert!(attributes.is_empty());
    }

    #[test]
    fn remove_is_noop_for_missing_names() {
        let mut attributes = Attributes::parse(r#" a="1""#);

        assert!(!attributes.remove("b"));
        assert!(attributes.remove("a"));
        assert!(attributes.is_empty());
    }

    #[test]
    fn reorder() {
        let mut attributes = Attributes::parse(r#" x="1" y="2""#);

        assert!(attributes.reorder(&["y"], false));
        assert_eq!(to_xml(&attributes), r#" y="2" x="1""#);
        assert!(!attributes.reorder(&["y"], false));
    }

    #[test]
    fn reorder_sorts_remainder_case_insensitively() {
        let mut attributes = Attributes::parse(r#" d="" B="" a="" C="" id="""#);

        attributes.reorder(&["id", "missing"], true);

        assert_eq!(
            attributes.names().collect::<Vec<_>>(),
            vec!["id", "a", "B", "C", "d"]
        );
    }

    #[test]
    fn escapes_double_quotes() {
        let attributes = Attributes::parse(r#" title='say "hi"'"#);

        assert_eq!(attributes.get("title"), r#"say "hi""#);
        assert_eq!(to_xml(&attributes), r#" title="say &quot;hi&quot;""#);
    }

    #[test]
    fn escapes_lt() {
        let mut attributes = Attributes::default();

        attributes.set("expr", "a < b").unwrap();

        assert_eq!(to_xml(&attributes), r#" expr="a &lt; b""#);
    }

    #[test]
    fn contains_ignore_case() {
        let attributes = Attributes::parse(r#" Href="x""#);

        assert!(attributes.contains_ignore_case("href"));
        assert!(!attributes.contains("href"));

        let mut attributes = Attributes::parse(r#" Äb="1" äa="2""#);

        assert!(attributes.contains_ignore_case("äB"));

        attributes.reorder(&[], true);

        assert_eq!(attributes.names().collect::<Vec<_>>(), vec!["äa", "Äb"]);
    }
}
