//! From typed blocks to slides.
//!
//! The [`SlideMapper`] consumes a parsed [`Document`](crate::markdown::Document)
//! and drives a [`PresentationSink`]. Layout decisions (content box, image
//! fitting, table height) are made here in inches; the sink only renders them.
//!
//! # Quick Start
//!
//! ```rust
//! use slidemark::deck::{DeckOptions, OutlineSink, SlideKind, SlideMapper};
//! use slidemark::markdown::parse_markdown;
//!
//! let doc = parse_markdown("# Release\n## Changes\n- faster\n```rust\nfn main() {}\n```");
//! let options = DeckOptions::default();
//! let mut sink = OutlineSink::new();
//! let summary = SlideMapper::new(&options, ".").map_document(&doc, &mut sink).unwrap();
//!
//! assert_eq!(summary.slides, 3);
//! assert_eq!(sink.slides()[2].kind, SlideKind::Code);
//! assert_eq!(sink.slides()[2].title, "Code: Changes");
//! ```

mod assets;
pub mod config;
mod layout;
mod mapper;
mod outline;
mod sink;

pub use assets::{is_remote, probe_pixel_size, resolve_image_ref};
pub use config::{ConfigError, DeckOptions, Margins, RepeatedTitle};
pub use layout::{DEFAULT_ASPECT, Rect, Size, content_box, fit_centered};
pub use mapper::{MapSummary, SlideMapper};
pub use outline::{OutlineSink, OutlineSlide};
pub use sink::{
    PresentationSink, SlideContent, SlideHandle, SlideKind, StyleTarget, StylingError,
    TextFrameStyle,
};
