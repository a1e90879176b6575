/// Slide geometry: the content box and aspect-preserving placement of media.
///
/// All values share one unit, whatever the caller picks (the mapper uses inches).
use super::config::Margins;

/// Aspect ratio assumed for media whose height is unknown or zero.
pub const DEFAULT_ASPECT: f64 = 16.0 / 9.0;

/// Width and height of a piece of media.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle given by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The same rectangle with its height replaced.
    #[inline]
    pub fn with_height(self, height: f64) -> Self {
        Self { height, ..self }
    }
}

/// Area of a slide left for content once the margins are taken away.
///
/// # Examples
///
/// ```rust
/// use slidemark::deck::{Margins, Rect, content_box};
///
/// let area = content_box(13.333, 7.5, &Margins::default());
/// assert_eq!(area.left, 0.5);
/// assert_eq!(area.top, 1.3);
/// assert!((area.width - 12.333).abs() < 1e-9);
/// assert!((area.height - 5.7).abs() < 1e-9);
/// ```
pub fn content_box(slide_width: f64, slide_height: f64, margins: &Margins) -> Rect {
    Rect::new(
        margins.left,
        margins.top,
        slide_width - margins.left - margins.right,
        slide_height - margins.top - margins.bottom,
    )
}

/// Largest rectangle with the media's aspect ratio that fits inside `area`,
/// centred on both axes.
///
/// Media with a non-positive height is treated as 16:9.
///
/// # Examples
///
/// ```rust
/// use slidemark::deck::{Rect, Size, fit_centered};
///
/// let area = Rect::new(0.0, 0.0, 1200.0, 800.0);
/// let placed = fit_centered(area, Size::new(1600.0, 900.0));
/// assert_eq!(placed, Rect::new(0.0, 62.5, 1200.0, 675.0));
/// ```
pub fn fit_centered(area: Rect, media: Size) -> Rect {
    let media_aspect = if media.height > 0.0 && media.width > 0.0 {
        media.width / media.height
    } else {
        DEFAULT_ASPECT
    };
    let box_aspect = area.width / area.height;

    let (width, height) = if media_aspect > box_aspect {
        (area.width, area.width / media_aspect)
    } else {
        (area.height * media_aspect, area.height)
    };

    Rect::new(
        area.left + (area.width - width) / 2.0,
        area.top + (area.height - height) / 2.0,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Rect, b: Rect) -> bool {
        (a.left - b.left).abs() < 1e-9
            && (a.top - b.top).abs() < 1e-9
            && (a.width - b.width).abs() < 1e-9
            && (a.height - b.height).abs() < 1e-9
    }

    #[test]
    fn test_wide_media_is_width_constrained() {
        let placed = fit_centered(Rect::new(0.0, 0.0, 1200.0, 800.0), Size::new(1600.0, 900.0));
        assert!(approx(placed, Rect::new(0.0, 62.5, 1200.0, 675.0)));
    }

    #[test]
    fn test_tall_media_is_height_constrained() {
        let placed = fit_centered(Rect::new(10.0, 20.0, 1200.0, 800.0), Size::new(400.0, 800.0));
        assert!(approx(placed, Rect::new(410.0, 20.0, 400.0, 800.0)));
    }

    #[test]
    fn test_degenerate_media_uses_default_aspect() {
        let area = Rect::new(0.0, 0.0, 16.0, 16.0);
        let placed = fit_centered(area, Size::new(100.0, 0.0));
        assert!(approx(placed, Rect::new(0.0, 3.5, 16.0, 9.0)));
    }

    #[test]
    fn test_equal_aspect_fills_area() {
        let area = Rect::new(1.0, 1.0, 4.0, 3.0);
        assert!(approx(fit_centered(area, Size::new(800.0, 600.0)), area));
    }

    #[test]
    fn test_with_height() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).with_height(1.0);
        assert_eq!(r, Rect::new(1.0, 2.0, 3.0, 1.0));
    }
}
