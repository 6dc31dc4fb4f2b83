//! Reactive treemap view.

use std::fmt;
use tracing::{debug, warn};
use visualcoin_core::{Canvas, Rect, Size};
use visualcoin_layout::{diagnose, Group, Item, Severity, TreemapLayout};
use visualcoin_render::{ColorSource, RandomColors, TreemapRenderer};

/// Holds the current market data and surface size, and repaints a surface
/// when either changes.
///
/// Every pass clears the surface and rebuilds the whole scene; nothing from
/// the previous pass is reused. Rendering without a surface does nothing and
/// leaves the view dirty, so the first surface to arrive gets painted.
///
/// ```
/// use visualcoin::{Group, Item, RecordingCanvas, Size, TreemapView};
///
/// let mut view = TreemapView::new(Size::new(300.0, 100.0));
/// view.set_data(vec![Group::new("Upbit").item(Item::new("Bitcoin", 1.0))]);
///
/// assert_eq!(view.render(None), None);
///
/// let mut canvas = RecordingCanvas::new(Size::new(300.0, 100.0));
/// assert_eq!(view.render(Some(&mut canvas)), Some(2));
/// assert_eq!(view.render(Some(&mut canvas)), None);
/// ```
pub struct TreemapView {
    groups: Vec<Group>,
    size: Size,
    layout: TreemapLayout,
    renderer: TreemapRenderer,
    colors: Box<dyn ColorSource>,
    dirty: bool,
    passes: u64,
}

impl fmt::Debug for TreemapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreemapView")
            .field("groups", &self.groups.len())
            .field("size", &self.size)
            .field("layout", &self.layout)
            .field("dirty", &self.dirty)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl TreemapView {
    /// Create an empty view of the given pixel size with random item fills.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            groups: Vec::new(),
            size,
            layout: TreemapLayout::new(),
            renderer: TreemapRenderer::new(),
            colors: Box::new(RandomColors::new()),
            dirty: true,
            passes: 0,
        }
    }

    /// Use a custom layout engine.
    #[must_use]
    pub fn with_layout(mut self, layout: TreemapLayout) -> Self {
        self.layout = layout;
        self.dirty = true;
        self
    }

    /// Use a custom renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: TreemapRenderer) -> Self {
        self.renderer = renderer;
        self.dirty = true;
        self
    }

    /// Use a custom item fill source.
    #[must_use]
    pub fn with_colors(mut self, colors: impl ColorSource + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    /// Replace the item fill source.
    pub fn set_colors(&mut self, colors: impl ColorSource + 'static) {
        self.colors = Box::new(colors);
    }

    /// Replace the data. Returns `true` if it differs from the current data.
    ///
    /// Weights are compared after normalization, so re-sending data with a
    /// `NaN` or negative weight does not count as a change.
    pub fn set_data(&mut self, groups: Vec<Group>) -> bool {
        if same_market(&groups, &self.groups) {
            return false;
        }
        for diagnostic in diagnose(&groups) {
            match diagnostic.severity() {
                Severity::Error => warn!(%diagnostic, "invalid treemap input"),
                Severity::Warning => debug!(%diagnostic, "degenerate treemap input"),
            }
        }
        self.groups = groups;
        self.dirty = true;
        true
    }

    /// Change the surface size. Returns `true` if it differs from the
    /// current size.
    pub fn resize(&mut self, size: Size) -> bool {
        if size == self.size {
            return false;
        }
        self.size = size;
        self.dirty = true;
        true
    }

    /// Current data.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Current size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Check if the next [`render`](Self::render) will paint.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of passes painted so far.
    #[must_use]
    pub const fn passes(&self) -> u64 {
        self.passes
    }

    /// Repaint if data or size changed since the last pass.
    ///
    /// Returns the number of cells painted, or `None` when nothing was done.
    pub fn render(&mut self, surface: Option<&mut dyn Canvas>) -> Option<usize> {
        if !self.dirty {
            return None;
        }
        self.force_render(surface)
    }

    /// Repaint unconditionally. Item fills are re-rolled.
    pub fn force_render(&mut self, surface: Option<&mut dyn Canvas>) -> Option<usize> {
        let Some(canvas) = surface else {
            debug!("no surface attached, skipping treemap pass");
            return None;
        };

        canvas.clear(self.renderer.style().background);
        let scene = self
            .layout
            .layout(&self.groups, Rect::from_size(self.size));
        let painted = self.renderer.paint(canvas, &scene, self.colors.as_mut());

        self.dirty = false;
        self.passes += 1;
        debug!(pass = self.passes, painted, "treemap view rendered");
        Some(painted)
    }
}

fn same_market(a: &[Group], b: &[Group]) -> bool {
    let same_item = |x: &Item, y: &Item| {
        x.key == y.key && x.symbol == y.symbol && x.unit == y.unit && x.weight() == y.weight()
    };
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.key == y.key
                && x.items.len() == y.items.len()
                && x.items.iter().zip(&y.items).all(|(i, j)| same_item(i, j))
        })
}
