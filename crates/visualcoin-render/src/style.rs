//! Treemap paint style.

use serde::{Deserialize, Serialize};
use visualcoin_core::{Color, TextAlign, TextBaseline, TextStyle};

/// Colors, border and label fonts used by [`TreemapRenderer`](crate::TreemapRenderer).
///
/// Every field has a default, so a config file may set any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapStyle {
    /// Color the surface is cleared to before a pass.
    pub background: Color,
    /// Fill of group cells.
    pub group_fill: Color,
    /// Border color of every cell.
    pub border_color: Color,
    /// Border width in pixels.
    pub border_width: f32,
    /// Label color.
    pub label_color: Color,
    /// Group label size in pixels.
    pub group_font_size: f32,
    /// Item label size in pixels.
    pub item_font_size: f32,
    /// Label font family.
    pub font_family: String,
}

impl Default for TreemapStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            group_fill: Color::from_rgb8(0xE0, 0xE0, 0xE0),
            border_color: Color::BLACK,
            border_width: 1.0,
            label_color: Color::BLACK,
            group_font_size: 12.0,
            item_font_size: 10.0,
            font_family: "Arial".to_string(),
        }
    }
}

impl TreemapStyle {
    fn label(&self, size: f32) -> TextStyle {
        TextStyle {
            size,
            color: self.label_color,
            family: self.font_family.clone(),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }

    /// Centered label style for group keys.
    #[must_use]
    pub fn group_label(&self) -> TextStyle {
        self.label(self.group_font_size)
    }

    /// Centered label style for item labels.
    #[must_use]
    pub fn item_label(&self) -> TextStyle {
        self.label(self.item_font_size)
    }
}
