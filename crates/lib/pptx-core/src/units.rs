//! Coordinate and size units.
//!
//! The package format measures drawing geometry in English Metric Units
//! (914400 per inch, 12700 per point) and font sizes in hundredths of a
//! point. Callers work in inches and points; conversions happen here.

pub const EMU_PER_INCH: i64 = 914_400;
pub const EMU_PER_POINT: i64 = 12_700;

/// A length in English Metric Units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Emu(i64);

impl Emu {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Converts inches to EMU, rounding to the nearest unit.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * EMU_PER_INCH as f64).round() as i64)
    }

    /// Converts points to EMU; used for line widths.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn from_points(points: f64) -> Self {
        Self((points * EMU_PER_POINT as f64).round() as i64)
    }

    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

/// A font size, stored as the schema's hundredths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSize(u32);

impl FontSize {
    /// Builds a size from points, rounding to the nearest hundredth.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_points(points: f64) -> Self {
        Self((points * 100.0).round().max(100.0) as u32)
    }

    #[must_use]
    pub const fn centipoints(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_convert_to_emu() {
        assert_eq!(Emu::from_inches(1.0).raw(), 914_400);
        assert_eq!(Emu::from_inches(0.5).raw(), 457_200);
        assert_eq!(Emu::from_inches(7.5).raw(), 6_858_000);
    }

    #[test]
    fn points_convert_to_emu() {
        assert_eq!(Emu::from_points(2.0).raw(), 25_400);
        assert_eq!(Emu::from_points(3.0).raw(), 38_100);
    }

    #[test]
    fn font_size_is_centipoints() {
        assert_eq!(FontSize::from_points(32.0).centipoints(), 3200);
        assert_eq!(FontSize::from_points(10.5).centipoints(), 1050);
    }

    #[test]
    fn font_size_clamps_to_minimum() {
        assert_eq!(FontSize::from_points(0.0).centipoints(), 100);
    }
}
