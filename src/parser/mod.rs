//! Text parsing: line classification and inline markup stripping.
//!
//! Both entry points are total: every input string produces a result and
//! neither can fail or panic.

mod block_parser;
mod inline;

pub use block_parser::{parse, BlockParser};
pub use inline::{strip_inline, InlineStripper};
