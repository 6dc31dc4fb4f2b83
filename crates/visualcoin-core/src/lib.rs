//! Core types and traits for the VisualCoin market map.
//!
//! This crate provides foundational types used throughout VisualCoin:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with hex/CSS conversions
//! - The paint abstraction: [`Canvas`], [`TextStyle`], [`DrawCommand`]
//! - A recording backend for tests: [`RecordingCanvas`]

mod canvas;
mod color;
pub mod draw;
mod geometry;

pub use canvas::{Canvas, RecordingCanvas, TextAlign, TextBaseline, TextStyle};
pub use color::{Color, ColorParseError};
pub use draw::{BoxStyle, DrawCommand, StrokeStyle};
pub use geometry::{Point, Rect, Size};
