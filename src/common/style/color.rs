use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
/// The Slides API wants each channel as a float in `0.0..=1.0`; see
/// [`RGBColor::to_optional_color`].
///
/// # Examples
///
/// ```rust
/// use slidesmith::common::RGBColor;
///
/// // Create a red color
/// let red = RGBColor::new(255, 0, 0);
///
/// // Create from hex string
/// let blue = RGBColor::from_hex("0000FF").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    pub const WHITE: RGBColor = RGBColor::new(255, 255, 255);
    pub const BLACK: RGBColor = RGBColor::new(0, 0, 0);

    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string.
    ///
    /// # Arguments
    ///
    /// * `hex` - Hex color string (e.g., "FF0000" or "#FF0000")
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidesmith::common::RGBColor;
    ///
    /// let red = RGBColor::from_hex("FF0000").unwrap();
    /// let blue = RGBColor::from_hex("#0000FF").unwrap();
    /// assert!(RGBColor::from_hex("F00").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        // Byte slicing below needs ASCII.
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Convert to hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Wire representation used by text styles and fills.
    pub fn to_optional_color(&self) -> OptionalColor {
        OptionalColor {
            opaque_color: Some(OpaqueColor {
                rgb_color: RgbFraction {
                    red: self.r as f32 / 255.0,
                    green: self.g as f32 / 255.0,
                    blue: self.b as f32 / 255.0,
                },
            }),
        }
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Color channels as fractions, the form the API speaks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbFraction {
    #[serde(default)]
    pub red: f32,
    #[serde(default)]
    pub green: f32,
    #[serde(default)]
    pub blue: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    pub rgb_color: RgbFraction,
}

/// A color that may be transparent (no `opaqueColor`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque_color: Option<OpaqueColor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = RGBColor::from_hex("#1A2B3C").unwrap();
        assert_eq!(color, RGBColor::new(0x1A, 0x2B, 0x3C));
        assert_eq!(color.to_hex(), "1A2B3C");
        assert_eq!(color.to_string(), "#1A2B3C");
        assert!(RGBColor::from_hex("GGGGGG").is_none());
    }

    #[test]
    fn test_non_ascii_hex_is_rejected() {
        assert!(RGBColor::from_hex("€abc").is_none());
        assert!(RGBColor::from_hex("#ab€c").is_none());
        assert_eq!(RGBColor::from_hex("#000000"), Some(RGBColor::BLACK));
    }

    #[test]
    fn test_white_wire_format() {
        let json = serde_json::to_value(RGBColor::WHITE.to_optional_color()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"opaqueColor": {"rgbColor": {"red": 1.0, "green": 1.0, "blue": 1.0}}})
        );
    }
}
