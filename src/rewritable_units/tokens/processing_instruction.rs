use crate::errors::{ProcessingInstructionError, TokenParseError};
use crate::grammar::is_name;
use crate::rewritable_units::attributes::{validate_name, write_attribute};
use crate::rewritable_units::{PseudoAttributes, Serialize};
use crate::tokenizer::DocumentMetadata;
use encoding_rs::Encoding;
use memchr::memmem;
use once_cell::unsync::OnceCell;
use std::fmt::{self, Debug};
use std::ops::{Deref, DerefMut};

const XML_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r'];
const XML_DECLARATION_TARGET: &str = "xml";

fn validate_target(target: &str) -> Result<(), ProcessingInstructionError> {
    if !is_name(target) {
        Err(ProcessingInstructionError::InvalidTarget(target.to_string()))
    } else if target == XML_DECLARATION_TARGET {
        Err(ProcessingInstructionError::ReservedTarget)
    } else {
        Ok(())
    }
}

#[inline]
fn validate_text(text: &str) -> Result<(), ProcessingInstructionError> {
    if memmem::find(text.as_bytes(), b"?>").is_some() {
        Err(ProcessingInstructionError::ClosingSequence)
    } else {
        Ok(())
    }
}

/// A processing instruction: `<?target instruction?>`.
///
/// Pseudo-attributes (`name="value"` pairs in the instruction) are located
/// on first access and cached together with their position in the
/// instruction. Replacing the instruction discards the cache; it's rebuilt
/// on the next access. Editing a pseudo-attribute patches the instruction
/// at the cached position and rebuilds the cache right away, so cached
/// positions always refer to the current instruction.
#[derive(Clone)]
pub struct ProcessingInstruction {
    target: String,
    instruction: String,
    pseudo_attributes: OnceCell<PseudoAttributes>,
    serialized: String,
}

impl ProcessingInstruction {
    /// Creates a processing instruction. The `xml` target is reserved for
    /// the XML declaration.
    pub fn new(target: &str, instruction: &str) -> Result<Self, ProcessingInstructionError> {
        validate_target(target)?;
        validate_text(instruction)?;

        let mut pi = ProcessingInstruction {
            target: target.to_string(),
            instruction: instruction.trim_matches(XML_WHITESPACE).to_string(),
            pseudo_attributes: OnceCell::new(),
            serialized: String::new(),
        };

        pi.reserialize();

        Ok(pi)
    }

    pub(crate) fn from_raw(raw: &str) -> Result<Self, TokenParseError> {
        let body = raw
            .strip_prefix("<?")
            .and_then(|r| r.strip_suffix("?>"))
            .ok_or_else(|| TokenParseError::UnexpectedMarkup {
                kind: "processing instruction",
                markup: raw.to_string(),
            })?;

        let (target, instruction) = body
            .split_once(XML_WHITESPACE)
            .unwrap_or((body, ""));

        Ok(ProcessingInstruction {
            target: target.to_string(),
            instruction: instruction.trim_matches(XML_WHITESPACE).to_string(),
            pseudo_attributes: OnceCell::new(),
            serialized: raw.to_string(),
        })
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Changes the target. Neither the old nor the new target may be `xml`,
    /// since that would change the kind of the token.
    pub fn set_target(&mut self, target: &str) -> Result<(), ProcessingInstructionError> {
        if self.target != target {
            if self.target == XML_DECLARATION_TARGET {
                return Err(ProcessingInstructionError::ReservedTarget);
            }

            validate_target(target)?;
            self.target = target.to_string();
            self.reserialize();
        }

        Ok(())
    }

    #[inline]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Replaces the instruction wholesale. Surrounding whitespace is dropped.
    pub fn set_instruction(&mut self, instruction: &str) -> Result<(), ProcessingInstructionError> {
        let instruction = instruction.trim_matches(XML_WHITESPACE);

        if self.instruction != instruction {
            validate_text(instruction)?;
            self.instruction = instruction.to_string();
            self.pseudo_attributes.take();
            self.reserialize();
        }

        Ok(())
    }

    /// Pseudo-attributes of the instruction, located on first access.
    #[inline]
    pub fn pseudo_attributes(&self) -> &PseudoAttributes {
        self.pseudo_attributes
            .get_or_init(|| PseudoAttributes::locate(&self.instruction))
    }

    /// Returns the value of the pseudo-attribute or an empty string if it's missing.
    #[inline]
    pub fn pseudo_attribute(&self, name: &str) -> &str {
        self.pseudo_attributes().get(name)
    }

    #[inline]
    pub fn has_pseudo_attribute(&self, name: &str) -> bool {
        self.pseudo_attributes().contains(name)
    }

    /// Sets the pseudo-attribute.
    ///
    /// An existing pseudo-attribute is rewritten in place as ` name="value"`;
    /// a new one is appended to the end of the instruction.
    pub fn set_pseudo_attribute(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), ProcessingInstructionError> {
        validate_name(name)?;
        validate_text(value)?;

        let pseudo_attributes = self.pseudo_attributes();

        if pseudo_attributes.get_opt(name) == Some(value) {
            return Ok(());
        }

        let span = pseudo_attributes.span(name);
        let mut fragment = String::with_capacity(name.len() + value.len() + 4);

        write_attribute(&mut fragment, name, value);

        match span {
            Some(span) => self.instruction.replace_range(span.range(), &fragment),
            None => self.instruction.push_str(&fragment),
        }

        self.relocate_pseudo_attributes();
        self.reserialize();

        Ok(())
    }

    /// Removes every occurrence of the pseudo-attribute. Does nothing if
    /// it's absent.
    pub fn remove_pseudo_attribute(&mut self, name: &str) {
        let spans = self.pseudo_attributes().spans(name).to_vec();

        if spans.is_empty() {
            return;
        }

        for span in spans.iter().rev() {
            self.instruction.replace_range(span.range(), "");
        }

        self.relocate_pseudo_attributes();
        self.reserialize();
    }

    fn relocate_pseudo_attributes(&mut self) {
        let leading_whitespace =
            self.instruction.len() - self.instruction.trim_start_matches(XML_WHITESPACE).len();

        self.instruction.drain(..leading_whitespace);
        self.pseudo_attributes = OnceCell::from(PseudoAttributes::locate(&self.instruction));
    }

    fn reserialize(&mut self) {
        let space = if self.instruction.is_empty() { "" } else { " " };

        self.serialized = format!("<?{}{}{}?>", self.target, space, self.instruction);

        trace!(@reserialize self.serialized);
    }
}

impl Serialize for ProcessingInstruction {
    #[inline]
    fn serialized(&self) -> &str {
        &self.serialized
    }
}

// NOTE: the pseudo-attribute cache is derived state and doesn't take part
// in the comparison.
impl PartialEq for ProcessingInstruction {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
            && self.instruction == other.instruction
            && self.serialized == other.serialized
    }
}

impl Eq for ProcessingInstruction {}

impl Debug for ProcessingInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessingInstruction")
            .field("target", &self.target())
            .field("instruction", &self.instruction())
            .finish()
    }
}

/// An XML declaration: `<?xml version="1.0" encoding="utf-8" ...?>`.
///
/// Shares the whole processing instruction API through `Deref`.
#[derive(Clone, PartialEq, Eq)]
pub struct XmlDeclaration(ProcessingInstruction);

impl XmlDeclaration {
    pub(crate) fn from_raw(raw: &str) -> Result<Self, TokenParseError> {
        ProcessingInstruction::from_raw(raw).map(XmlDeclaration)
    }

    #[inline]
    pub fn version(&self) -> Option<&str> {
        self.pseudo_attributes().get_opt("version")
    }

    /// The declared encoding label, as written.
    #[inline]
    pub fn encoding_label(&self) -> Option<&str> {
        self.pseudo_attributes().get_opt("encoding")
    }

    /// The declared encoding, if the label names one known to the WHATWG
    /// Encoding Standard.
    #[inline]
    pub fn encoding(&self) -> Option<&'static Encoding> {
        self.encoding_label()
            .and_then(|label| Encoding::for_label(label.as_bytes()))
    }

    #[inline]
    pub fn standalone(&self) -> Option<bool> {
        match self.pseudo_attributes().get_opt("standalone") {
            Some("yes") => Some(true),
            Some("no") => Some(false),
            _ => None,
        }
    }

    #[inline]
    pub fn metadata(&self) -> DocumentMetadata {
        DocumentMetadata::from_declaration(self)
    }

    #[inline]
    pub fn into_processing_instruction(self) -> ProcessingInstruction {
        self.0
    }
}

impl Deref for XmlDeclaration {
    type Target = ProcessingInstruction;

    #[inline]
    fn deref(&self) -> &ProcessingInstruction {
        &self.0
    }
}

impl DerefMut for XmlDeclaration {
    #[inline]
    fn deref_mut(&mut self) -> &mut ProcessingInstruction {
        &mut self.0
    }
}

impl Serialize for XmlDeclaration {
    #[inline]
    fn serialized(&self) -> &str {
        self.0.serialized()
    }
}

impl Debug for XmlDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDeclaration")
            .field("instruction", &self.instruction())
            .finish()
    }
}
