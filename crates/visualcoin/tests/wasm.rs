//! WASM browser tests - run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

use visualcoin::{Canvas, Color, Group, Rect, Size, TreemapApp};

fn mount(id: &str, width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

const MARKET: &str = r#"[
    {"key": "X", "data": [
        {"key": "A", "data": 10, "symbol": "AAA", "unit": "KRW"},
        {"key": "B", "data": 30, "symbol": "BBB", "unit": "KRW"}
    ]},
    {"key": "Y", "data": [{"key": "C", "data": 10, "symbol": "CCC", "unit": "USD"}]}
]"#;

#[wasm_bindgen_test]
fn test_group_json_parses() {
    let groups: Vec<Group> = serde_json::from_str(MARKET).expect("parse");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].items[1].value, 30.0);
}

#[wasm_bindgen_test]
fn test_app_paints_on_data_change() {
    mount("map-paint", 300, 100);
    let mut app = TreemapApp::new("map-paint").expect("app");
    assert!(app.set_data_json(MARKET).expect("json"));
    assert!(!app.set_data_json(MARKET).expect("json"));
    assert_eq!(app.force_render(), 5);
}

#[wasm_bindgen_test]
fn test_app_resize_updates_element() {
    mount("map-resize", 300, 100);
    let mut app = TreemapApp::new("map-resize").expect("app");
    assert!(app.resize(640, 480));
    assert_eq!((app.width(), app.height()), (640, 480));
    assert!(!app.resize(640, 480));
}

#[wasm_bindgen_test]
fn test_surface_draws() {
    let canvas = mount("map-surface", 10, 10);
    let mut surface = visualcoin::Canvas2dSurface::new(canvas).expect("2d");
    assert_eq!(surface.size(), Size::new(10.0, 10.0));
    surface.clear(Color::WHITE);
    surface.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::BLACK);
}

#[wasm_bindgen_test]
fn test_missing_canvas_is_error() {
    assert!(TreemapApp::new("does-not-exist").is_err());
}
