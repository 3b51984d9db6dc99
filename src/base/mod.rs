#[macro_use]
mod debug_trace;

mod diagnostic;
mod span;

pub use self::diagnostic::{ErrorDiagnostic, DEFAULT_CONTEXT_SIZE};
pub use self::span::Span;
