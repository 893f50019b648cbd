//! Character styling applied through `updateTextStyle`.

use serde::{Deserialize, Serialize};

use super::color::{OptionalColor, RGBColor};
use crate::common::unit::Dimension;

/// Character style for a text range.
///
/// Only the attributes that are set are sent, and [`TextStyle::fields`]
/// produces the matching field mask. The API resets attributes listed in the
/// mask but absent from the style, so the two must always agree.
///
/// # Examples
///
/// ```rust
/// use slidesmith::common::{RGBColor, TextStyle};
///
/// let style = TextStyle::new()
///     .bold(true)
///     .font_family("Inter")
///     .font_size_pt(32.0)
///     .foreground(RGBColor::WHITE);
/// assert_eq!(style.fields(), "bold,fontFamily,fontSize,foregroundColor");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_size_pt(mut self, size: f64) -> Self {
        self.font_size = Some(Dimension::pt(size));
        self
    }

    pub fn foreground(mut self, color: RGBColor) -> Self {
        self.foreground_color = Some(color.to_optional_color());
        self
    }

    /// Comma separated field mask naming every attribute that is set.
    pub fn fields(&self) -> String {
        let mut fields = Vec::with_capacity(6);
        if self.bold.is_some() {
            fields.push("bold");
        }
        if self.italic.is_some() {
            fields.push("italic");
        }
        if self.underline.is_some() {
            fields.push("underline");
        }
        if self.font_family.is_some() {
            fields.push("fontFamily");
        }
        if self.font_size.is_some() {
            fields.push("fontSize");
        }
        if self.foreground_color.is_some() {
            fields.push("foregroundColor");
        }
        fields.join(",")
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_follow_set_attributes() {
        assert!(TextStyle::new().is_empty());
        assert_eq!(TextStyle::new().italic(true).fields(), "italic");
        assert_eq!(
            TextStyle::new().underline(false).font_size_pt(10.0).fields(),
            "underline,fontSize"
        );
    }

    #[test]
    fn test_unset_attributes_are_not_serialized() {
        let json = serde_json::to_value(TextStyle::new().bold(true)).unwrap();
        assert_eq!(json, serde_json::json!({"bold": true}));
    }
}
