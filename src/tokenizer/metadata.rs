use crate::rewritable_units::{PseudoAttributes, XmlDeclaration};
use encoding_rs::{Encoding, UTF_8};

/// Document properties declared by the XML declaration.
///
/// All fields are `None` for a document without a declaration, or when the
/// declaration omits the corresponding pseudo-attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub version: Option<String>,
    pub encoding_label: Option<String>,
    /// The declared encoding, if its label is known to the Encoding Standard.
    pub encoding: Option<&'static Encoding>,
    pub standalone: Option<bool>,
}

impl DocumentMetadata {
    pub fn from_declaration(declaration: &XmlDeclaration) -> Self {
        Self::from_pseudo_attributes(declaration.pseudo_attributes())
    }

    // NOTE: the tokenizer reads the metadata without populating the token's
    // own pseudo-attribute cache.
    pub(crate) fn from_instruction(instruction: &str) -> Self {
        Self::from_pseudo_attributes(&PseudoAttributes::locate(instruction))
    }

    fn from_pseudo_attributes(pseudo_attributes: &PseudoAttributes) -> Self {
        let encoding_label = pseudo_attributes.get_opt("encoding");

        DocumentMetadata {
            version: pseudo_attributes.get_opt("version").map(str::to_string),
            encoding_label: encoding_label.map(str::to_string),
            encoding: encoding_label.and_then(|label| Encoding::for_label(label.as_bytes())),
            standalone: match pseudo_attributes.get_opt("standalone") {
                Some("yes") => Some(true),
                Some("no") => Some(false),
                _ => None,
            },
        }
    }

    /// The declared encoding, or UTF-8 if none is declared or the label is unknown.
    #[inline]
    pub fn encoding_or_default(&self) -> &'static Encoding {
        self.encoding.unwrap_or(UTF_8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::SHIFT_JIS;

    #[test]
    fn from_declaration() {
        let declaration: XmlDeclaration =
            r#"<?xml version="1.0" encoding="Shift_JIS" standalone="yes"?>"#
                .parse()
                .unwrap();

        assert_eq!(
            declaration.metadata(),
            DocumentMetadata {
                version: Some("1.0".into()),
                encoding_label: Some("Shift_JIS".into()),
                encoding: Some(SHIFT_JIS),
                standalone: Some(true),
            }
        );
    }

    #[test]
    fn unknown_encoding_label() {
        let metadata = DocumentMetadata::from_instruction(r#"version="1.0" encoding="klingon""#);

        assert_eq!(metadata.encoding_label.as_deref(), Some("klingon"));
        assert_eq!(metadata.encoding, None);
        assert_eq!(metadata.encoding_or_default(), UTF_8);
    }

    #[test]
    fn defaults() {
        let metadata = DocumentMetadata::default();

        assert_eq!(metadata.version, None);
        assert_eq!(metadata.standalone, None);
        assert_eq!(metadata.encoding_or_default(), UTF_8);
    }
}
