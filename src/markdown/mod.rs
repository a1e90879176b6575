//! Markdown scanning into typed blocks.
//!
//! The input is read line by line in a single forward pass. Each line is first
//! classified ([`classify_line`]), then folded into the block sequence
//! ([`step`] / [`parse_markdown`]). Nested lists, inline formatting and
//! error recovery are out of scope: unknown constructs become paragraph text and
//! unterminated fences or notes keep whatever was captured.
//!
//! # Quick Start
//!
//! ```rust
//! use slidemark::markdown::{BlockKind, parse_markdown};
//!
//! let doc = parse_markdown("# Deck\n\n## Intro\n- one\n- two\n");
//! let kinds: Vec<_> = doc.iter().map(|b| b.kind()).collect();
//! assert_eq!(kinds, vec![BlockKind::Heading, BlockKind::Heading, BlockKind::List]);
//! ```
// Module declarations
mod block;
mod classify;
mod parser;
mod text;

// Re-export public API
pub use block::{Block, BlockKind, Document};
pub use classify::{
    LineKind, NOTES_END_MARKER, NOTES_START_MARKER, ScanState, classify_line, is_table_row,
};
pub use parser::{ParserState, finish, parse_markdown, step};
pub use text::{is_separator_row, normalize_bullets, paragraph_text, parse_table_lines};
