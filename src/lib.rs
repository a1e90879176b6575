//! Slidemark - convert Markdown documents into PowerPoint presentations
//!
//! A single forward pass turns Markdown lines into typed blocks (headings,
//! lists, paragraphs, code, images, tables, speaker notes). The deck mapper
//! then turns blocks into slides and hands them to a presentation sink; the
//! bundled sink writes a `.pptx` package.
//!
//! # Features
//!
//! - **Markdown scanner**: Line classifier and block accumulator, no AST
//! - **Slide mapping**: Title, bullet, code, image, table and diagram slides
//! - **Speaker notes**: `<!-- SPEAKER_NOTES_START ... SPEAKER_NOTES_END -->` blocks
//! - **Mermaid diagrams**: Rendered with the Mermaid CLI when available, shown as code otherwise
//! - **PPTX writer**: Self-contained Open Packaging Conventions writer
//!
//! # Example - Converting a file
//!
//! ```no_run
//! use slidemark::convert::Converter;
//! use slidemark::deck::DeckOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = DeckOptions::default().with_diagrams(false);
//! let summary = Converter::new(options).convert_file("talk.md", "talk.pptx")?;
//! println!("Wrote {} slides", summary.slides);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Inspecting the slide plan
//!
//! ```
//! use slidemark::deck::{DeckOptions, OutlineSink, SlideMapper};
//! use slidemark::markdown::parse_markdown;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = parse_markdown("# Launch\n## Why\n- speed\n- cost\n");
//! let options = DeckOptions::default();
//! let mut outline = OutlineSink::new();
//! SlideMapper::new(&options, ".").map_document(&doc, &mut outline)?;
//!
//! assert_eq!(outline.titles(), vec!["Launch", "Why"]);
//! # Ok(())
//! # }
//! ```

/// Shared error type, XML escaping and unit conversions
pub mod common;

/// Markdown scanning into typed blocks
pub mod markdown;

/// Mapping of blocks onto slides
///
/// Layout decisions are made here, in inches; sinks only render them.
pub mod deck;

/// Diagram renderers for fenced Mermaid blocks
pub mod diagram;

/// OOXML (Office Open XML) writer
///
/// This module provides the OPC packaging layer and the PresentationML
/// writer behind the `.pptx` sink.
pub mod ooxml;

/// End-to-end file conversion
pub mod convert;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use convert::{Converter, generate_pptx};
pub use deck::DeckOptions;
