//! End-to-end rendering onto the raster backend.

use visualcoin_core::{Canvas, Color};
use visualcoin_layout::{Group, Item, TreemapLayout, ZeroPolicy};
use visualcoin_render::{FixedColor, RasterCanvas, SeededColors, TreemapRenderer, TreemapStyle};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn market() -> Vec<Group> {
    vec![
        Group::new("X")
            .item(Item::new("A", 10.0).quoted("AAA", "KRW"))
            .item(Item::new("B", 30.0).quoted("BBB", "KRW")),
        Group::new("Y").item(Item::new("C", 10.0).quoted("CCC", "USD")),
    ]
}

fn render(groups: &[Group], layout: &TreemapLayout) -> RasterCanvas {
    let mut canvas = RasterCanvas::new(300, 100).unwrap();
    TreemapRenderer::new().draw(
        &mut canvas,
        groups,
        layout,
        &mut FixedColor(Color::rgb(1.0, 0.0, 0.0)),
    );
    canvas
}

#[test]
fn test_items_cover_the_surface() {
    let canvas = render(&market(), &TreemapLayout::new());
    assert!(canvas.image().pixels().all(|p| p.0 != WHITE));
}

#[test]
fn test_borders_land_on_cell_edges() {
    let canvas = render(&market(), &TreemapLayout::new());
    // outer frame
    assert_eq!(canvas.pixel(0, 50), Some(BLACK));
    assert_eq!(canvas.pixel(150, 0), Some(BLACK));
    assert_eq!(canvas.pixel(299, 50), Some(BLACK));
    // A|B and X|Y seams
    assert_eq!(canvas.pixel(60, 50), Some(BLACK));
    assert_eq!(canvas.pixel(240, 50), Some(BLACK));
    // interiors
    assert_eq!(canvas.pixel(30, 50), Some(RED));
    assert_eq!(canvas.pixel(150, 50), Some(RED));
    assert_eq!(canvas.pixel(270, 50), Some(RED));
}

#[test]
fn test_group_fill_shows_where_items_are_skipped() {
    let groups = vec![Group::new("X")
        .item(Item::new("A", 1.0))
        .item(Item::new("gone", 0.0))];
    let canvas = render(
        &groups,
        &TreemapLayout::new().with_zero_policy(ZeroPolicy::Skip),
    );
    assert_eq!(canvas.pixel(150, 50), Some(RED));
    assert_eq!(canvas.size().width, 300.0);
}

#[test]
fn test_zero_total_leaves_background() {
    let groups = vec![Group::new("X").item(Item::new("A", 0.0))];
    let canvas = render(&groups, &TreemapLayout::new());
    assert!(canvas.image().pixels().all(|p| p.0 == WHITE));
}

#[test]
fn test_background_from_style() {
    let style = TreemapStyle {
        background: Color::BLACK,
        ..TreemapStyle::default()
    };
    let mut canvas = RasterCanvas::new(10, 10).unwrap();
    let painted = TreemapRenderer::with_style(style).draw(
        &mut canvas,
        &[],
        &TreemapLayout::new(),
        &mut SeededColors::default(),
    );
    assert_eq!(painted, 0);
    assert_eq!(canvas.pixel(5, 5), Some(BLACK));
}

#[test]
fn test_seeded_output_is_reproducible() {
    let paint = |seed| {
        let mut canvas = RasterCanvas::new(300, 100).unwrap();
        TreemapRenderer::new().draw(
            &mut canvas,
            &market(),
            &TreemapLayout::new(),
            &mut SeededColors::new(seed),
        );
        canvas.encode_png().unwrap()
    };
    assert_eq!(paint(5), paint(5));
    assert_ne!(paint(5), paint(6));
}
