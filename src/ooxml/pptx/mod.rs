//! PowerPoint (.pptx) presentation writing.
//!
//! Slides are assembled in memory with [`MutablePresentation`] and serialized
//! by [`Package`], which lays out the PresentationML parts (master, layouts,
//! theme, slides, notes, media) on top of the OPC layer.
//!
//! [`PptxSink`] adapts this writer to the deck mapper.
//!
//! # Example
//!
//! ```rust
//! use slidemark::deck::{DeckOptions, PresentationSink, SlideContent};
//! use slidemark::ooxml::pptx::PptxSink;
//!
//! let mut sink = PptxSink::new(&DeckOptions::default());
//! sink.add_slide("Quarterly review", SlideContent::Title)?;
//! sink.add_slide("Agenda", SlideContent::Bullets(vec!["Numbers".into(), "Plans".into()]))?;
//!
//! let bytes = sink.to_bytes()?;
//! assert_eq!(&bytes[..2], b"PK");
//! # Ok::<(), slidemark::Error>(())
//! ```

pub mod format;
pub mod package;
pub mod sink;
pub mod template;
pub mod writer;

pub use format::{BodyFormat, ImageFormat, TextFormat};
pub use package::Package;
pub use sink::PptxSink;
pub use template::SlideLayout;
pub use writer::{MutablePresentation, MutableShape, MutableSlide};
