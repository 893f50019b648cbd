//! Placement of page elements: size plus affine transform.

use serde::{Deserialize, Serialize};

use crate::common::unit::{Dimension, Unit};

/// Width and height of a page element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    #[serde(default)]
    pub width: Dimension,
    #[serde(default)]
    pub height: Dimension,
}

impl Size {
    /// A size in points.
    pub const fn pt(width: f64, height: f64) -> Self {
        Self {
            width: Dimension::pt(width),
            height: Dimension::pt(height),
        }
    }
}

/// Affine transform of a page element.
///
/// Only scale and translation are used when building decks; shear is kept so
/// snapshots round-trip whatever the service returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    #[serde(default)]
    pub scale_x: f64,
    #[serde(default)]
    pub scale_y: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub shear_x: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub shear_y: f64,
    #[serde(default)]
    pub translate_x: f64,
    #[serde(default)]
    pub translate_y: f64,
    #[serde(default)]
    pub unit: Unit,
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl AffineTransform {
    /// Identity scale, translated by `(x, y)` points.
    pub const fn translate_pt(x: f64, y: f64) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
            translate_x: x,
            translate_y: y,
            unit: Unit::Pt,
        }
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::translate_pt(0.0, 0.0)
    }
}

/// Where a new page element goes: the page, its size and its transform.
///
/// # Examples
///
/// ```
/// use slidesmith::requests::ElementProperties;
///
/// // 177pt x 58pt box at (53pt, 191pt) on slide `g346dcc353d0_0_104`
/// let props = ElementProperties::at_pt("g346dcc353d0_0_104", 53.0, 191.0, 177.0, 58.0);
/// assert_eq!(props.page_object_id, "g346dcc353d0_0_104");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    pub page_object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<AffineTransform>,
}

impl ElementProperties {
    pub fn at_pt(page_object_id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            page_object_id: page_object_id.into(),
            size: Some(Size::pt(width, height)),
            transform: Some(AffineTransform::translate_pt(x, y)),
        }
    }

    /// Whether every magnitude and translation is non-negative.
    pub fn is_non_negative(&self) -> bool {
        let size_ok = self
            .size
            .map(|s| s.width.magnitude >= 0.0 && s.height.magnitude >= 0.0)
            .unwrap_or(true);
        let transform_ok = self
            .transform
            .map(|t| t.translate_x >= 0.0 && t.translate_y >= 0.0)
            .unwrap_or(true);
        size_ok && transform_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_properties_wire_format() {
        let props = ElementProperties::at_pt("T1-Snap1", 6.0, 348.0, 95.0, 45.0);
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pageObjectId": "T1-Snap1",
                "size": {
                    "width": {"magnitude": 95.0, "unit": "PT"},
                    "height": {"magnitude": 45.0, "unit": "PT"}
                },
                "transform": {
                    "scaleX": 1.0, "scaleY": 1.0,
                    "translateX": 6.0, "translateY": 348.0,
                    "unit": "PT"
                }
            })
        );
    }

    #[test]
    fn test_negative_geometry_is_detected() {
        assert!(ElementProperties::at_pt("slide1", 0.0, 0.0, 10.0, 10.0).is_non_negative());
        assert!(!ElementProperties::at_pt("slide1", -1.0, 0.0, 10.0, 10.0).is_non_negative());
        assert!(!ElementProperties::at_pt("slide1", 0.0, 0.0, 10.0, -10.0).is_non_negative());
    }
}
