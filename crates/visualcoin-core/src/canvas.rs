//! Paint surface abstraction and the recording implementation.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle};
use crate::{Color, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend. Coordinates are
/// in surface pixels with the origin at the top-left corner.
pub trait Canvas {
    /// Pixel size of the surface.
    fn size(&self) -> Size;

    /// Reset the whole surface to `color`.
    fn clear(&mut self, color: Color);

    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a stroked rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw text anchored at `position` using the style's alignment.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Text starts at the anchor
    #[default]
    Left,
    /// Text is centered on the anchor
    Center,
    /// Text ends at the anchor
    Right,
}

impl TextAlign {
    /// Keyword understood by `CanvasRenderingContext2D.textAlign`.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    /// Anchor is the top of the em box
    Top,
    /// Anchor is the middle of the em box
    Middle,
    /// Anchor is the alphabetic baseline
    #[default]
    Alphabetic,
}

impl TextBaseline {
    /// Keyword understood by `CanvasRenderingContext2D.textBaseline`.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Alphabetic => "alphabetic",
        }
    }
}

/// Text style for rendering.
///
/// # Examples
///
/// ```
/// use visualcoin_core::{Color, TextAlign, TextBaseline, TextStyle};
///
/// let default_style = TextStyle::default();
/// assert_eq!(default_style.size, 16.0);
///
/// let label = TextStyle {
///     size: 12.0,
///     align: TextAlign::Center,
///     baseline: TextBaseline::Middle,
///     ..TextStyle::default()
/// };
/// assert_eq!(label.css_font(), "12px Arial");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font family name
    pub family: String,
    /// Horizontal anchor
    pub align: TextAlign,
    /// Vertical anchor
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// CSS font shorthand, e.g. `"10px Arial"`.
    #[must_use]
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.size, self.family)
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            family: "Arial".to_string(),
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Used by tests to verify what was painted, and by hosts that ship the
/// command list elsewhere (e.g. serialized to a browser).
#[derive(Debug)]
pub struct RecordingCanvas {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas of the given pixel size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Filled rectangles, in paint order.
    #[must_use]
    pub fn filled_rects(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Rect {
                    bounds,
                    style:
                        BoxStyle {
                            fill: Some(color), ..
                        },
                } => Some((*bounds, *color)),
                _ => None,
            })
            .collect()
    }

    /// Text labels, in paint order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().filter_map(DrawCommand::text).collect()
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            style: BoxStyle::fill(color),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            style: BoxStyle::stroke(StrokeStyle { color, width }),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }
}
