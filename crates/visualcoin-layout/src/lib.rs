#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
//! Treemap layout engine for VisualCoin.
//!
//! Takes a two-level grouping (exchanges holding coins) and a bounding
//! rectangle, and produces one rectangle per group and per item:
//!
//! - **Groups** are full-height slices, left to right, with widths
//!   proportional to their summed weight.
//! - **Items** are carved out of their group with a strip heuristic that
//!   follows the longer side of the remaining free space.
//!
//! Weights are normalized first ([`normalize_weight`]); [`diagnose`] lists
//! what was papered over. The engine is pure: it borrows the input and
//! returns a fresh [`TreemapScene`] on every call.

mod model;
mod normalize;
mod treemap;

pub use model::{total_value, Group, Item};
pub use normalize::{diagnose, normalize_weight, Diagnostic, Severity};
pub use treemap::{
    AreaMode, GroupCell, ItemCell, TreemapLayout, TreemapOptions, TreemapScene, ZeroPolicy,
};
