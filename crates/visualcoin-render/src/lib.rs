#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
//! Treemap renderer for VisualCoin.
//!
//! [`TreemapRenderer`] turns a [`TreemapScene`](visualcoin_layout::TreemapScene)
//! into paint calls on any [`Canvas`](visualcoin_core::Canvas). Item fills
//! come from a [`ColorSource`]; [`RasterCanvas`] is a software backend that
//! writes PNG files.
//!
//! ```
//! use visualcoin_core::{Canvas, RecordingCanvas, Size};
//! use visualcoin_layout::{Group, Item, TreemapLayout};
//! use visualcoin_render::{SeededColors, TreemapRenderer};
//!
//! let groups = vec![Group::new("Upbit").item(Item::new("Bitcoin", 1.0).quoted("BTC", "KRW"))];
//! let mut canvas = RecordingCanvas::new(Size::new(300.0, 100.0));
//! let painted = TreemapRenderer::new().draw(
//!     &mut canvas,
//!     &groups,
//!     &TreemapLayout::new(),
//!     &mut SeededColors::default(),
//! );
//! assert_eq!(painted, 2);
//! ```

mod palette;
mod raster;
mod renderer;
mod style;

pub use palette::{ColorSource, FixedColor, RandomColors, SeededColors};
pub use raster::{RasterCanvas, RasterError};
pub use renderer::TreemapRenderer;
pub use style::TreemapStyle;
