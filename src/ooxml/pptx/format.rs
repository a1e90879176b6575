//! Format types for PPTX presentations.

use crate::ooxml::opc::constants::content_type as ct;

/// Image format types PowerPoint can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Get the MIME type for this image format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => ct::PNG,
            Self::Jpeg => ct::JPEG,
            Self::Gif => ct::GIF,
            Self::Bmp => ct::BMP,
            Self::Tiff => ct::TIFF,
        }
    }

    /// Get the file extension for this image format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Detect image format from bytes (magic number detection).
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // GIF: GIF8
        if bytes.starts_with(b"GIF8") {
            return Some(Self::Gif);
        }

        // BMP: BM
        if bytes.starts_with(b"BM") {
            return Some(Self::Bmp);
        }

        // TIFF: little-endian or big-endian byte order mark
        if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some(Self::Tiff);
        }

        None
    }
}

/// Run properties for the text of a shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFormat {
    /// Latin font family
    pub font: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    /// Bold text
    pub bold: bool,
}

impl TextFormat {
    /// Monospaced text in the given family and size.
    pub fn monospace(font: &str, size: f64) -> Self {
        Self {
            font: Some(font.to_string()),
            size: Some(size),
            bold: false,
        }
    }
}

/// Text frame (`a:bodyPr`) settings. `None` leaves the layout's value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyFormat {
    /// `wrap="square"` when true, `wrap="none"` when false
    pub word_wrap: Option<bool>,
    /// Emit `a:normAutofit` so text shrinks on overflow
    pub shrink_to_fit: bool,
    /// Left inset in EMU
    pub inset_left: Option<i64>,
    /// Right inset in EMU
    pub inset_right: Option<i64>,
}
