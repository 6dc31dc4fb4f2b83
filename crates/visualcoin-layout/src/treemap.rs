//! Two-level treemap layout.
//!
//! Groups become full-height vertical slices proportional to their total
//! weight. Inside each group, items are placed with a strip heuristic: each
//! item takes a strip along the longer side of the space that is still free.

use crate::model::{total_value, Group, Item};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use visualcoin_core::Rect;

/// How an item's target area is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AreaMode {
    /// `group_area * value / group_value`, always from the full group area.
    #[default]
    Proportional,
    /// `remaining_area * value / group_value`. The share is taken of the
    /// shrinking remainder, so areas compound and later items come out
    /// smaller than their share of the group.
    Remaining,
}

/// What to do with entries whose normalized weight is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroPolicy {
    /// Emit a zero-area cell at the current cursor.
    #[default]
    ZeroArea,
    /// Leave the entry out of the scene.
    Skip,
}

/// Layout knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapOptions {
    /// Item area derivation.
    pub area_mode: AreaMode,
    /// Zero-weight handling.
    pub zero_policy: ZeroPolicy,
}

/// A laid-out item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCell {
    /// Item key.
    pub key: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Quote unit.
    pub unit: String,
    /// Normalized weight.
    pub value: f64,
    /// Cell rectangle in surface pixels.
    pub rect: Rect,
}

impl ItemCell {
    fn new(item: &Item, value: f64, rect: Rect) -> Self {
        Self {
            key: item.key.clone(),
            symbol: item.symbol.clone(),
            unit: item.unit.clone(),
            value,
            rect,
        }
    }

    /// Cell label, `"{key} ({symbol}/{unit})"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({}/{})", self.key, self.symbol, self.unit)
    }
}

/// A laid-out group with its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCell {
    /// Group key.
    pub key: String,
    /// Sum of normalized item weights.
    pub value: f64,
    /// Slice rectangle in surface pixels.
    pub rect: Rect,
    /// Item cells in input order.
    pub items: Vec<ItemCell>,
}

/// Output of one layout pass.
///
/// Built fresh on every call and owned by the caller; nothing is retained
/// by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapScene {
    /// Bounding rectangle the scene was laid out in.
    pub bounds: Rect,
    /// Group cells, left to right.
    pub groups: Vec<GroupCell>,
}

impl TreemapScene {
    /// Scene with no cells.
    #[must_use]
    pub const fn empty(bounds: Rect) -> Self {
        Self {
            bounds,
            groups: Vec::new(),
        }
    }

    /// Check if the scene has no group cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Find a group cell by key.
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&GroupCell> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// Iterate `(group, item)` pairs in paint order.
    pub fn items(&self) -> impl Iterator<Item = (&GroupCell, &ItemCell)> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter().map(move |i| (g, i)))
    }

    /// Total number of item cells.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    /// Group cells plus item cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.groups.len() + self.item_count()
    }
}

/// Free space inside a group while its items are being placed.
#[derive(Debug, Clone, Copy)]
struct StripCursor {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    group_area: f64,
    group_value: f64,
}

impl StripCursor {
    fn new(rect: Rect, group_value: f64) -> Self {
        let (width, height) = (f64::from(rect.width), f64::from(rect.height));
        Self {
            x: f64::from(rect.x),
            y: f64::from(rect.y),
            width,
            height,
            group_area: width * height,
            group_value,
        }
    }

    fn target_area(&self, weight: f64, mode: AreaMode) -> f64 {
        let area = match mode {
            AreaMode::Proportional => self.group_area,
            AreaMode::Remaining => self.width * self.height,
        };
        if self.group_value > 0.0 {
            area * (weight / self.group_value)
        } else {
            0.0
        }
    }

    /// Carve a strip of `weight`'s share off the longer side and advance.
    fn place(&mut self, weight: f64, mode: AreaMode) -> Rect {
        let area = self.target_area(weight, mode);

        if self.width >= self.height {
            let w = strip_extent(area, self.height, self.width);
            let rect = to_rect(self.x, self.y, w, self.height);
            self.x += w;
            self.width -= w;
            rect
        } else {
            let h = strip_extent(area, self.width, self.height);
            let rect = to_rect(self.x, self.y, self.width, h);
            self.y += h;
            self.height -= h;
            rect
        }
    }
}

/// Length along the free axis for a strip of `area` spanning `span`,
/// never past `limit`.
fn strip_extent(area: f64, span: f64, limit: f64) -> f64 {
    if span > 0.0 && area > 0.0 {
        (area / span).min(limit)
    } else {
        0.0
    }
}

/// Divisor applied to every weight so that the grand total stays finite.
///
/// Finite weights near `f64::MAX` can overflow when summed; dividing by the
/// largest weight keeps every ratio intact.
fn weight_scale(groups: &[Group]) -> f64 {
    if total_value(groups).is_finite() {
        return 1.0;
    }
    let largest = groups
        .iter()
        .flat_map(|g| &g.items)
        .map(Item::weight)
        .fold(0.0, f64::max);
    if largest > 0.0 {
        largest
    } else {
        1.0
    }
}

fn to_rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(x as f32, y as f32, width as f32, height as f32).sanitized()
}

/// Treemap layout engine.
///
/// # Examples
///
/// ```
/// use visualcoin_core::Rect;
/// use visualcoin_layout::{Group, Item, TreemapLayout};
///
/// let groups = vec![
///     Group::new("X").item(Item::new("A", 10.0)).item(Item::new("B", 30.0)),
///     Group::new("Y").item(Item::new("C", 10.0)),
/// ];
/// let scene = TreemapLayout::new().layout(&groups, Rect::new(0.0, 0.0, 300.0, 100.0));
/// assert_eq!(scene.groups[0].rect.width, 240.0);
/// assert_eq!(scene.groups[1].rect.width, 60.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TreemapLayout {
    options: TreemapOptions,
}

impl TreemapLayout {
    /// Create an engine with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given options.
    #[must_use]
    pub const fn with_options(options: TreemapOptions) -> Self {
        Self { options }
    }

    /// Set the item area derivation.
    #[must_use]
    pub const fn with_area_mode(mut self, mode: AreaMode) -> Self {
        self.options.area_mode = mode;
        self
    }

    /// Set the zero-weight policy.
    #[must_use]
    pub const fn with_zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.options.zero_policy = policy;
        self
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> TreemapOptions {
        self.options
    }

    fn keeps(&self, weight: f64) -> bool {
        weight > 0.0 || self.options.zero_policy == ZeroPolicy::ZeroArea
    }

    /// Lay out `groups` inside `bounds`.
    ///
    /// Group edges are derived from the running cumulative value, so the
    /// last group always ends on the right border. A zero total puts every
    /// group at the left edge with zero width.
    #[must_use]
    pub fn layout(&self, groups: &[Group], bounds: Rect) -> TreemapScene {
        let bounds = bounds.sanitized();
        let scale = weight_scale(groups);
        let values: Vec<f64> = groups
            .iter()
            .map(|g| g.items.iter().map(|i| i.weight() / scale).sum())
            .collect();
        let total: f64 = values.iter().sum();

        let left = f64::from(bounds.x);
        let width = f64::from(bounds.width);
        let edge = |cumulative: f64| {
            if total > 0.0 {
                left + width * (cumulative / total)
            } else {
                left
            }
        };

        let cells: Vec<GroupCell> = groups
            .iter()
            .zip(values)
            .scan(0.0_f64, |cumulative, (group, value)| {
                let start = edge(*cumulative);
                *cumulative += value;
                let end = edge(*cumulative);
                Some((group, value, start, end - start))
            })
            .filter(|&(_, value, _, _)| self.keeps(value))
            .map(|(group, value, x, w)| {
                let rect = to_rect(x, f64::from(bounds.y), w, f64::from(bounds.height));
                trace!(group = %group.key, ?rect, "group cell");
                self.layout_group(group, value, scale, rect)
            })
            .collect();

        let scene = TreemapScene {
            bounds,
            groups: cells,
        };
        debug!(
            groups = scene.groups.len(),
            items = scene.item_count(),
            total,
            scale,
            "treemap layout computed"
        );
        scene
    }

    fn layout_group(&self, group: &Group, value: f64, scale: f64, rect: Rect) -> GroupCell {
        let mode = self.options.area_mode;
        let items = group
            .items
            .iter()
            .map(|item| (item, item.weight()))
            .filter(|&(_, weight)| self.keeps(weight))
            .scan(StripCursor::new(rect, value), |cursor, (item, weight)| {
                let cell = ItemCell::new(item, weight, cursor.place(weight / scale, mode));
                trace!(group = %group.key, item = %item.key, rect = ?cell.rect, "item cell");
                Some(cell)
            })
            .collect();

        GroupCell {
            key: group.key.clone(),
            value: group.total_value(),
            rect,
            items,
        }
    }
}
