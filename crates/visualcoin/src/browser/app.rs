//! WASM application entry point.

use super::canvas2d::Canvas2dSurface;
use crate::view::TreemapView;
use visualcoin_core::{Canvas, Size};
use visualcoin_layout::Group;
use visualcoin_render::{RandomColors, SeededColors};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlCanvasElement};

/// Treemap bound to a `<canvas>` element.
///
/// Data or size changes repaint immediately. If the element has no 2d
/// context, every paint is skipped.
#[wasm_bindgen]
pub struct TreemapApp {
    canvas: HtmlCanvasElement,
    surface: Option<Canvas2dSurface>,
    view: TreemapView,
}

#[wasm_bindgen]
impl TreemapApp {
    /// Attach to the canvas element with the given ID.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<TreemapApp, JsValue> {
        console_error_panic_hook::set_once();

        let document = window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| format!("Canvas '{canvas_id}' not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "Element is not a canvas")?;

        let surface = match Canvas2dSurface::new(canvas.clone()) {
            Ok(surface) => Some(surface),
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&e));
                None
            }
        };
        let size = Size::from((canvas.width(), canvas.height()));

        Ok(Self {
            canvas,
            surface,
            view: TreemapView::new(size),
        })
    }

    /// Replace the data from its JSON wire form and repaint if it changed.
    pub fn set_data_json(&mut self, json: &str) -> Result<bool, JsValue> {
        let groups: Vec<Group> = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("JSON parse error: {e}")))?;
        let changed = self.view.set_data(groups);
        self.render();
        Ok(changed)
    }

    /// Resize the canvas element and repaint if the size changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let changed = self.view.resize(Size::from((width, height)));
        if changed {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.render();
        }
        changed
    }

    /// Use a fixed seed for item fills, or random fills when `None`.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.view.set_colors(SeededColors::new(seed)),
            None => self.view.set_colors(RandomColors::new()),
        }
    }

    /// Paint if anything changed. Returns the number of cells painted.
    pub fn render(&mut self) -> u32 {
        let surface = self.surface.as_mut().map(|s| s as &mut dyn Canvas);
        self.view.render(surface).map_or(0, |n| n as u32)
    }

    /// Repaint unconditionally with fresh item fills.
    pub fn force_render(&mut self) -> u32 {
        let surface = self.surface.as_mut().map(|s| s as &mut dyn Canvas);
        self.view.force_render(surface).map_or(0, |n| n as u32)
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }
}

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
