//! Consumers of token streams.
//!
//! Filters are lazy iterator adapters: each pulls from the wrapped stream
//! only as many tokens as it needs to yield the next one, so they chain
//! without materializing the stream. They accept any iterator of tokens or
//! token results.

mod concat;
mod contexts;
mod expand_empty;
mod open_element_stack;
mod wellformedness;

use self::open_element_stack::OpenElementStack;

pub use self::concat::{concat_tokens, concat_tokens_of};
pub use self::contexts::find_all_contexts;
pub use self::expand_empty::{expand_empty_tags, ExpandEmptyTags};
pub use self::wellformedness::{wellformedness_check, WellformednessCheck};
