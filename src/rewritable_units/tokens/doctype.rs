use crate::errors::{DoctypeLiteralError, TokenParseError};
use crate::grammar::DOCTYPE_FIELDS_REGEX;
use crate::rewritable_units::Serialize;
use std::fmt::{self, Display};

/// Kind of external identifier of a DOCTYPE declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DoctypeIdType {
    #[default]
    None,
    System,
    Public,
}

impl DoctypeIdType {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            DoctypeIdType::None => "",
            DoctypeIdType::System => "SYSTEM",
            DoctypeIdType::Public => "PUBLIC",
        }
    }
}

impl Display for DoctypeIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DOCTYPE declaration: `<!DOCTYPE tag ...>`.
///
/// For the following example:
///
/// ```text
/// <!DOCTYPE x:body SYSTEM "/S:/xml/dtd/xhtml1-strict-prefixed.dtd"
///   [<!ENTITY abc "xyz">]>
/// ```
///
/// * `document_element` is `x:body`;
/// * `id_type` is [`DoctypeIdType::System`];
/// * `id_value` is `/S:/xml/dtd/xhtml1-strict-prefixed.dtd`;
/// * `internal_subset` is `<!ENTITY abc "xyz">`.
///
/// A `PUBLIC` identifier may be followed by a system literal, available as
/// `system_id`. The internal subset is kept as opaque text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctype {
    document_element: String,
    id_type: DoctypeIdType,
    id_value: String,
    system_id: String,
    internal_subset: String,
    serialized: String,
}

#[inline]
fn validate_literal(value: &str) -> Result<(), DoctypeLiteralError> {
    if value.contains('"') && value.contains('\'') {
        Err(DoctypeLiteralError::MixedQuotes)
    } else {
        Ok(())
    }
}

#[inline]
fn push_literal(parts: &mut Vec<String>, value: &str) {
    if value.contains('"') {
        parts.push(format!("'{value}'"));
    } else {
        parts.push(format!("\"{value}\""));
    }
}

impl Doctype {
    pub fn new(document_element: &str) -> Self {
        let mut doctype = Doctype {
            document_element: document_element.to_string(),
            id_type: DoctypeIdType::None,
            id_value: String::new(),
            system_id: String::new(),
            internal_subset: String::new(),
            serialized: String::new(),
        };

        doctype.reserialize();
        doctype
    }

    pub(crate) fn from_raw(raw: &str) -> Result<Self, TokenParseError> {
        let captures = DOCTYPE_FIELDS_REGEX
            .captures(raw)
            .ok_or_else(|| TokenParseError::Doctype(raw.to_string()))?;

        let group = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| captures.name(name))
                .map_or_else(String::new, |m| m.as_str().to_string())
        };

        let id_type = match captures.name("id_type").map(|m| m.as_str()) {
            Some("SYSTEM") => DoctypeIdType::System,
            Some("PUBLIC") => DoctypeIdType::Public,
            _ => DoctypeIdType::None,
        };

        Ok(Doctype {
            document_element: group(&["document_element"]),
            id_type,
            id_value: group(&["id_dq", "id_sq"]),
            system_id: group(&["system_dq", "system_sq"]),
            internal_subset: group(&["internal_subset"]),
            serialized: raw.to_string(),
        })
    }

    #[inline]
    pub fn document_element(&self) -> &str {
        &self.document_element
    }

    pub fn set_document_element(&mut self, document_element: &str) {
        if self.document_element != document_element {
            self.document_element = document_element.to_string();
            self.reserialize();
        }
    }

    #[inline]
    pub fn id_type(&self) -> DoctypeIdType {
        self.id_type
    }

    pub fn set_id_type(&mut self, id_type: DoctypeIdType) {
        if self.id_type != id_type {
            self.id_type = id_type;
            self.reserialize();
        }
    }

    /// Public identifier for `PUBLIC`, system identifier for `SYSTEM`.
    #[inline]
    pub fn id_value(&self) -> &str {
        &self.id_value
    }

    /// A literal can be quoted with either quote character, so it can't
    /// contain both.
    pub fn set_id_value(&mut self, id_value: &str) -> Result<(), DoctypeLiteralError> {
        if self.id_value != id_value {
            validate_literal(id_value)?;
            self.id_value = id_value.to_string();
            self.reserialize();
        }

        Ok(())
    }

    /// System literal following a public identifier.
    #[inline]
    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    pub fn set_system_id(&mut self, system_id: &str) -> Result<(), DoctypeLiteralError> {
        if self.system_id != system_id {
            validate_literal(system_id)?;
            self.system_id = system_id.to_string();
            self.reserialize();
        }

        Ok(())
    }

    #[inline]
    pub fn internal_subset(&self) -> &str {
        &self.internal_subset
    }

    pub fn set_internal_subset(&mut self, internal_subset: &str) {
        if self.internal_subset != internal_subset {
            self.internal_subset = internal_subset.to_string();
            self.reserialize();
        }
    }

    fn reserialize(&mut self) {
        let mut parts = vec![self.document_element.clone()];

        if self.id_type != DoctypeIdType::None {
            parts.push(self.id_type.as_str().to_string());
        }

        if !self.id_value.is_empty() {
            push_literal(&mut parts, &self.id_value);
        }

        if !self.system_id.is_empty() {
            push_literal(&mut parts, &self.system_id);
        }

        if !self.internal_subset.is_empty() {
            parts.push(format!("[{}]", self.internal_subset));
        }

        self.serialized = format!("<!DOCTYPE {}>", parts.join(" "));

        trace!(@reserialize self.serialized);
    }
}

impl Serialize for Doctype {
    #[inline]
    fn serialized(&self) -> &str {
        &self.serialized
    }
}
