/// The contract between the slide mapper and whatever builds the actual deck.
///
/// The mapper decides *what* goes on each slide and *where*; a
/// [`PresentationSink`] turns those decisions into a concrete document. The
/// PPTX writer is the main implementation; [`OutlineSink`](super::OutlineSink)
/// records the calls for dry runs and tests.
use super::layout::Rect;
use crate::common::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Opaque reference to a slide created by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SlideHandle(pub(crate) usize);

impl SlideHandle {
    /// Zero-based position of the slide in the deck.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Discriminant of a [`SlideContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    Title,
    Bullets,
    Code,
    Image,
    MissingImage,
    Table,
}

/// Payload of one slide. Frames are in inches, measured from the slide's
/// top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideContent {
    /// Title slide; the text lives in the title placeholder.
    Title,
    /// One paragraph per item in the body placeholder.
    Bullets(Vec<String>),
    /// Monospaced text box, one paragraph per source line.
    Code { text: String, frame: Rect },
    /// Picture placed at `frame`.
    Image { path: PathBuf, frame: Rect },
    /// Placeholder text for an image that could not be found.
    MissingImage { reference: String, frame: Rect },
    /// Table whose first row is the header. Rows may be ragged.
    Table { rows: Vec<Vec<String>>, frame: Rect },
}

impl SlideContent {
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title => SlideKind::Title,
            Self::Bullets(_) => SlideKind::Bullets,
            Self::Code { .. } => SlideKind::Code,
            Self::Image { .. } => SlideKind::Image,
            Self::MissingImage { .. } => SlideKind::MissingImage,
            Self::Table { .. } => SlideKind::Table,
        }
    }
}

/// Part of a slide that optional styling applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTarget {
    /// The title placeholder
    Title,
    /// The body placeholder of a bullet slide, or the code text box
    Body,
    /// Every cell of the slide's table
    TableCells,
}

impl fmt::Display for StyleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::TableCells => "table cells",
        })
    }
}

/// Text frame settings applied by [`PresentationSink::apply_styling`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextFrameStyle {
    /// Wrap lines at the frame width
    pub word_wrap: bool,
    /// Let the text shrink when it overflows the frame
    pub shrink_to_fit: bool,
    /// Left inset in inches
    pub inset_left: f64,
    /// Right inset in inches
    pub inset_right: f64,
}

impl TextFrameStyle {
    /// Word wrap, shrink on overflow and equal side insets.
    pub fn fitted(inset: f64) -> Self {
        Self {
            word_wrap: true,
            shrink_to_fit: true,
            inset_left: inset,
            inset_right: inset,
        }
    }

    /// Word wrap and equal side insets, no automatic shrinking.
    pub fn wrapped(inset: f64) -> Self {
        Self {
            word_wrap: true,
            shrink_to_fit: false,
            inset_left: inset,
            inset_right: inset,
        }
    }
}

/// A cosmetic styling call that could not be honoured.
///
/// These never abort a conversion; callers may log and drop them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StylingError {
    #[error("slide {0} does not exist")]
    UnknownSlide(usize),

    #[error("slide {slide} has no {target} to style")]
    MissingTarget { slide: usize, target: StyleTarget },

    #[error("insets of {insets:.2} in do not fit a {width:.2} in wide {target}")]
    InsetsTooWide {
        target: StyleTarget,
        insets: f64,
        width: f64,
    },
}

/// Receiver of slide creation calls.
pub trait PresentationSink {
    /// Append a slide with the given title and payload.
    fn add_slide(&mut self, title: &str, content: SlideContent) -> Result<SlideHandle>;

    /// Apply optional text frame styling to one part of a slide.
    fn apply_styling(
        &mut self,
        slide: SlideHandle,
        target: StyleTarget,
        style: &TextFrameStyle,
    ) -> std::result::Result<(), StylingError>;

    /// Attach speaker notes to a slide, replacing earlier notes.
    fn set_notes(&mut self, slide: SlideHandle, notes: &str) -> Result<()>;

    /// Number of slides created so far.
    fn slide_count(&self) -> usize;

    /// Write the accumulated deck to `path`.
    fn save(&self, path: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind() {
        assert_eq!(SlideContent::Title.kind(), SlideKind::Title);
        assert_eq!(
            SlideContent::Bullets(vec!["a".to_string()]).kind(),
            SlideKind::Bullets
        );
        let frame = Rect::new(0.5, 1.3, 12.333, 1.0);
        assert_eq!(
            SlideContent::MissingImage {
                reference: "x.png".to_string(),
                frame
            }
            .kind(),
            SlideKind::MissingImage
        );
    }

    #[test]
    fn test_styling_error_messages() {
        let err = StylingError::MissingTarget {
            slide: 3,
            target: StyleTarget::TableCells,
        };
        assert_eq!(err.to_string(), "slide 3 has no table cells to style");

        let err = StylingError::InsetsTooWide {
            target: StyleTarget::Body,
            insets: 0.3,
            width: 0.2,
        };
        assert_eq!(
            err.to_string(),
            "insets of 0.30 in do not fit a 0.20 in wide body"
        );
    }

    #[test]
    fn test_style_presets() {
        let fitted = TextFrameStyle::fitted(0.15);
        assert!(fitted.word_wrap && fitted.shrink_to_fit);
        let wrapped = TextFrameStyle::wrapped(0.05);
        assert!(wrapped.word_wrap && !wrapped.shrink_to_fit);
        assert_eq!(wrapped.inset_left, 0.05);
    }
}
