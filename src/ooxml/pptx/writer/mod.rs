//! Mutable presentation writer components for PPTX.

pub mod pres;
pub mod shape;
pub mod slide;

// Re-export main types
pub use pres::{Media, MutablePresentation};
pub use shape::{Frame, MutableShape, PlaceholderKind};
pub use slide::MutableSlide;
