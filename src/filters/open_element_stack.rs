use crate::errors::WellformednessError;
use crate::rewritable_units::{EndTag, Serialize, Tag};

pub(crate) struct OpenElement {
    name: String,
    markup: String,
}

#[derive(Default)]
pub(crate) struct OpenElementStack(Vec<OpenElement>);

impl OpenElementStack {
    #[inline]
    pub fn push(&mut self, tag: &impl Tag) {
        self.0.push(OpenElement {
            name: tag.name().to_string(),
            markup: tag.serialized().to_string(),
        });
    }

    #[inline]
    pub fn pop_innermost(&mut self) {
        self.0.pop();
    }

    /// Pops the innermost element, whatever its name.
    pub fn pop(&mut self, end_tag: &EndTag) -> Result<(), WellformednessError> {
        self.0
            .pop()
            .map(|_| ())
            .ok_or_else(|| WellformednessError::ExtraEndTag(end_tag.serialized().to_string()))
    }

    /// Pops the innermost element, which must be the one `end_tag` closes.
    pub fn pop_matching(&mut self, end_tag: &EndTag) -> Result<(), WellformednessError> {
        match self.0.pop() {
            Some(element) if element.name == end_tag.name() => Ok(()),
            Some(element) => Err(WellformednessError::MismatchedEndTag {
                start: element.markup,
                end: end_tag.serialized().to_string(),
            }),
            None => Err(WellformednessError::ExtraEndTag(
                end_tag.serialized().to_string(),
            )),
        }
    }

    /// Names of the open elements joined with `/`, outermost first.
    pub fn path(&self) -> String {
        self.names().collect::<Vec<_>>().join("/")
    }

    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.name.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
