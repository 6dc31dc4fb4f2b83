//! Canvas2D surface - forwards paint calls to an HTML5 canvas.

use visualcoin_core::{Canvas, Color, Point, Rect, Size, TextStyle};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A [`Canvas`] that draws to a browser `CanvasRenderingContext2d`.
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// Attach to a canvas element. Fails if it has no 2d context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("Failed to get 2d context: {e:?}"))?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        Ok(Self { canvas, ctx })
    }

    /// The underlying element.
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn path(&self, rect: Rect) {
        self.ctx.begin_path();
        self.ctx.rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }
}

impl Canvas for Canvas2dSurface {
    fn size(&self) -> Size {
        Size::from((self.canvas.width(), self.canvas.height()))
    }

    fn clear(&mut self, color: Color) {
        let (w, h) = (
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.path(rect.sanitized());
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.path(rect.sanitized());
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(f64::from(width));
        self.ctx.stroke();
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        if !position.is_finite() {
            return;
        }
        self.ctx.set_font(&style.css_font());
        self.ctx.set_text_align(style.align.as_css());
        self.ctx.set_text_baseline(style.baseline.as_css());
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.ctx
            .fill_text(text, f64::from(position.x), f64::from(position.y))
            .ok();
    }
}
