//! Office Open XML (OOXML) writing.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): Package handling (ZIP, parts, relationships, content types)
//! 2. **PresentationML** (`pptx`): Slides, layouts and the deck sink
//!
//! # Example
//!
//! ```rust
//! use slidemark::ooxml::PackURI;
//! use slidemark::ooxml::pptx::{MutablePresentation, Package, SlideLayout};
//! use slidemark::ooxml::pptx::writer::Frame;
//!
//! let mut pres = MutablePresentation::new(12_192_000, 6_858_000);
//! pres.add_slide(SlideLayout::TitleOnly)
//!     .set_title("Hello", Frame::new(457_200, 182_880, 11_277_600, 914_400));
//!
//! let pkg = Package::from_presentation(&pres)?;
//! assert!(pkg.opc_package().contains_part(&PackURI::new("/ppt/slides/slide1.xml")?));
//! # Ok::<(), slidemark::ooxml::OoxmlError>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
