//! Paints a [`TreemapScene`] onto any [`Canvas`].

use crate::palette::ColorSource;
use crate::style::TreemapStyle;
use tracing::{debug, trace};
use visualcoin_core::{Canvas, Color, Rect, TextStyle};
use visualcoin_layout::{Group, TreemapLayout, TreemapScene};

/// Treemap renderer.
///
/// Per group, paints the group fill, border and key label, then each item's
/// fill, border and label on top. Item fills come from a [`ColorSource`].
/// Cells with zero area are not painted.
#[derive(Debug, Clone, Default)]
pub struct TreemapRenderer {
    style: TreemapStyle,
}

impl TreemapRenderer {
    /// Renderer with the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with a custom style.
    #[must_use]
    pub const fn with_style(style: TreemapStyle) -> Self {
        Self { style }
    }

    /// Current style.
    #[must_use]
    pub const fn style(&self) -> &TreemapStyle {
        &self.style
    }

    /// Full pass: clear the canvas, lay out `groups` over the whole surface
    /// and paint the result. Returns the number of cells painted.
    pub fn draw<C>(
        &self,
        canvas: &mut dyn Canvas,
        groups: &[Group],
        layout: &TreemapLayout,
        colors: &mut C,
    ) -> usize
    where
        C: ColorSource + ?Sized,
    {
        canvas.clear(self.style.background);
        let bounds = Rect::from_size(canvas.size());
        let scene = layout.layout(groups, bounds);
        self.paint(canvas, &scene, colors)
    }

    /// Paint an already computed scene. Returns the number of cells painted.
    pub fn paint<C>(&self, canvas: &mut dyn Canvas, scene: &TreemapScene, colors: &mut C) -> usize
    where
        C: ColorSource + ?Sized,
    {
        let group_label = self.style.group_label();
        let item_label = self.style.item_label();
        let mut painted = 0;

        for group in &scene.groups {
            if self.paint_cell(canvas, group.rect, self.style.group_fill, &group.key, &group_label)
            {
                painted += 1;
            }
            for item in &group.items {
                if item.rect.sanitized().area() <= 0.0 {
                    trace!(item = %item.key, "skipping empty item cell");
                    continue;
                }
                let fill = colors.next_color();
                if self.paint_cell(canvas, item.rect, fill, &item.label(), &item_label) {
                    painted += 1;
                }
            }
        }

        debug!(
            painted,
            cells = scene.cell_count(),
            "treemap painted"
        );
        painted
    }

    fn paint_cell(
        &self,
        canvas: &mut dyn Canvas,
        rect: Rect,
        fill: Color,
        label: &str,
        text: &TextStyle,
    ) -> bool {
        let rect = rect.sanitized();
        if rect.area() <= 0.0 {
            return false;
        }
        canvas.fill_rect(rect, fill);
        if self.style.border_width > 0.0 {
            canvas.stroke_rect(rect, self.style.border_color, self.style.border_width);
        }
        canvas.draw_text(label, rect.center(), text);
        true
    }
}
