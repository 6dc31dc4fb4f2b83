//! VisualCoin: market-cap treemaps of cryptocurrency listings grouped by
//! exchange.
//!
//! This crate ties the workspace together:
//! - [`TreemapView`] keeps the current data and size and repaints only
//!   when one of them changes
//! - the `browser` module (wasm32 only) paints onto an HTML `<canvas>`
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { TreemapApp } from './visualcoin.js';
//!
//! async function main() {
//!     await init();
//!     const app = new TreemapApp('market-map');
//!     app.resize(1200, 600);
//!     app.set_data_json('[{"key": "Upbit", "data": [{"key": "Bitcoin", "data": 1, "symbol": "BTC", "unit": "KRW"}]}]');
//! }
//! ```

#![allow(clippy::doc_markdown, clippy::missing_const_for_fn)]

pub use visualcoin_core::*;
pub use visualcoin_layout as layout;
pub use visualcoin_layout::{
    diagnose, AreaMode, Diagnostic, Group, Item, Severity, TreemapLayout, TreemapOptions,
    TreemapScene, ZeroPolicy,
};
pub use visualcoin_render as render;
pub use visualcoin_render::{
    ColorSource, FixedColor, RandomColors, RasterCanvas, SeededColors, TreemapRenderer,
    TreemapStyle,
};

pub mod browser;
mod view;

#[cfg(target_arch = "wasm32")]
pub use browser::{Canvas2dSurface, TreemapApp};
pub use view::TreemapView;
