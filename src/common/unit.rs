//! Unit conversion utilities.
//!
//! Slide geometry is configured in inches and computed in floating point; the
//! PresentationML writer works in English Metric Units (EMU).

pub const EMUS_PER_INCH: i64 = 914_400;

/// Convert inches to EMU, rounded to the nearest unit.
#[inline]
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

/// Convert EMU to inches.
#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

/// Convert a font size in points to the hundredths-of-a-point value used by `a:rPr/@sz`.
#[inline]
pub fn pt_to_font_size(pt: f64) -> u32 {
    (pt * 100.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widescreen_dimensions() {
        assert_eq!(inches_to_emu(13.333), 12_191_695);
        assert_eq!(inches_to_emu(7.5), 6_858_000);
    }

    #[test]
    fn test_round_trip_inches() {
        assert!((emu_to_inches(inches_to_emu(1.3)) - 1.3).abs() < 1e-6);
        assert_eq!(inches_to_emu(0.15), 137_160);
    }

    #[test]
    fn test_font_size() {
        assert_eq!(pt_to_font_size(11.0), 1100);
        assert_eq!(pt_to_font_size(10.5), 1050);
    }
}
