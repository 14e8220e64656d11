//! Visual attributes computed for a single cell.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Styling for one cell. Every field is optional and set independently.
///
/// When several rules touch the same cell, [`CellAttribute::merge`]
/// combines them field by field: a later value replaces an earlier one,
/// an unset field leaves the earlier value alone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CellAttribute {
    /// Cell background color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    /// Text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<Color>,
    /// Relative bar length, `0.0..=1.0`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_fraction: Option<f64>,
    /// Color the bar is painted with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_color: Option<Color>,
}

impl CellAttribute {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute with only a fill color.
    pub fn fill(color: Color) -> Self {
        Self {
            fill_color: Some(color),
            ..Self::default()
        }
    }

    /// Attribute with only a font color.
    pub fn font(color: Color) -> Self {
        Self {
            font_color: Some(color),
            ..Self::default()
        }
    }

    /// Builder: set the fill color.
    pub fn with_fill(mut self, color: Option<Color>) -> Self {
        self.fill_color = color;
        self
    }

    /// Builder: set the font color.
    pub fn with_font(mut self, color: Option<Color>) -> Self {
        self.font_color = color;
        self
    }

    /// Builder: set the bar fraction and color.
    pub fn with_bar(mut self, fraction: f64, color: Color) -> Self {
        self.bar_fraction = Some(fraction);
        self.bar_color = Some(color);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.fill_color.is_none()
            && self.font_color.is_none()
            && self.bar_fraction.is_none()
            && self.bar_color.is_none()
    }

    /// Overlay `later` on top of `self`, field by field.
    pub fn merge(&mut self, later: &CellAttribute) {
        if later.fill_color.is_some() {
            self.fill_color = later.fill_color;
        }
        if later.font_color.is_some() {
            self.font_color = later.font_color;
        }
        if later.bar_fraction.is_some() {
            self.bar_fraction = later.bar_fraction;
        }
        if later.bar_color.is_some() {
            self.bar_color = later.bar_color;
        }
    }
}
