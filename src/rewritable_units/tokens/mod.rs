mod cdata;
mod comment;
mod doctype;
mod error_token;
mod processing_instruction;
mod tags;
mod text;

pub use self::cdata::Cdata;
pub use self::comment::Comment;
pub use self::doctype::{Doctype, DoctypeIdType};
pub use self::error_token::ErrorToken;
pub use self::processing_instruction::{ProcessingInstruction, XmlDeclaration};
pub use self::tags::{EmptyTag, EndTag, StartTag};
pub use self::text::Text;
