//! Unit conversion utilities.
//!
//! The Slides API expresses every length as a magnitude plus a unit, either
//! points or EMUs (English Metric Units). The page of a default 16:9 deck is
//! 720pt x 405pt.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

/// Width of a default 16:9 slide in points.
pub const SLIDE_WIDTH_PT: f64 = 720.0;
/// Height of a default 16:9 slide in points.
pub const SLIDE_HEIGHT_PT: f64 = 405.0;

#[inline]
pub fn pt_to_emu_f64(pt: f64) -> f64 {
    pt * EMUS_PER_PT as f64
}

#[inline]
pub fn emu_to_pt_f64(emu: f64) -> f64 {
    emu / EMUS_PER_PT as f64
}

/// Unit of a [`Dimension`] or an affine transform translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// English Metric Unit, 1/914400 inch
    #[default]
    Emu,
    /// Point, 1/72 inch
    Pt,
    /// Sent by the service for zero-valued dimensions
    UnitUnspecified,
}

impl Unit {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emu => "EMU",
            Self::Pt => "PT",
            Self::UnitUnspecified => "UNIT_UNSPECIFIED",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single length: magnitude plus unit.
///
/// # Examples
///
/// ```
/// use slidesmith::common::unit::{Dimension, Unit};
///
/// let width = Dimension::pt(177.0);
/// assert_eq!(width.unit, Unit::Pt);
/// assert_eq!(width.to_emus(), 177.0 * 12_700.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    /// Omitted by the service when zero
    #[serde(default)]
    pub magnitude: f64,
    #[serde(default)]
    pub unit: Unit,
}

impl Dimension {
    #[inline]
    pub const fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// A dimension in points.
    #[inline]
    pub const fn pt(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Pt)
    }

    /// A dimension in EMUs.
    #[inline]
    pub const fn emu(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Emu)
    }

    /// Convert to EMUs regardless of the stored unit.
    pub fn to_emus(&self) -> f64 {
        match self.unit {
            Unit::Pt => pt_to_emu_f64(self.magnitude),
            Unit::Emu | Unit::UnitUnspecified => self.magnitude,
        }
    }

    /// Convert to points regardless of the stored unit.
    pub fn to_points(&self) -> f64 {
        match self.unit {
            Unit::Pt => self.magnitude,
            Unit::Emu | Unit::UnitUnspecified => emu_to_pt_f64(self.magnitude),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.as_str().to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_emu_conversion() {
        assert_eq!(pt_to_emu_f64(1.0), 12_700.0);
        assert_eq!(emu_to_pt_f64(914_400.0), 72.0);
        assert_eq!(Dimension::emu(25_400.0).to_points(), 2.0);
        assert_eq!(Dimension::pt(2.0).to_emus(), 25_400.0);
    }

    #[test]
    fn test_default_page_is_ten_inches_wide() {
        assert_eq!(pt_to_emu_f64(SLIDE_WIDTH_PT), (10 * EMUS_PER_INCH) as f64);
        assert_eq!(pt_to_emu_f64(SLIDE_HEIGHT_PT), 5_143_500.0);
        assert_eq!(SLIDE_WIDTH_PT / SLIDE_HEIGHT_PT, 16.0 / 9.0);
    }

    #[test]
    fn test_dimension_wire_format() {
        let json = serde_json::to_string(&Dimension::pt(58.0)).unwrap();
        assert_eq!(json, r#"{"magnitude":58.0,"unit":"PT"}"#);

        // The service omits zero magnitudes
        let dim: Dimension = serde_json::from_str(r#"{"unit":"EMU"}"#).unwrap();
        assert_eq!(dim, Dimension::emu(0.0));

        let dim: Dimension = serde_json::from_str(r#"{"unit":"UNIT_UNSPECIFIED"}"#).unwrap();
        assert_eq!(dim.unit, Unit::UnitUnspecified);
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::pt(12.5).to_string(), "12.5pt");
    }
}
