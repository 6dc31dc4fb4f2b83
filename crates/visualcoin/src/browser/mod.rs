//! Browser runtime for VisualCoin.
//!
//! Bridges [`TreemapView`](crate::TreemapView) to an HTML5 canvas through
//! the Canvas2D API.

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

#[cfg(target_arch = "wasm32")]
pub use app::TreemapApp;
#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dSurface;
