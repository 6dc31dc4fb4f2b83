//! Integration tests for visualcoin-layout.
//!
//! These exercise the public engine against the geometric guarantees a
//! renderer relies on: coverage, proportionality, non-overlap, ordering,
//! determinism and the zero-weight guard.

use proptest::prelude::*;
use visualcoin_core::Rect;
use visualcoin_layout::{
    diagnose, AreaMode, Diagnostic, Group, Item, Severity, TreemapLayout, ZeroPolicy,
};

const EPS: f32 = 1e-2;

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 300.0, 100.0)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
}

fn groups_strategy() -> impl Strategy<Value = Vec<Group>> {
    prop::collection::vec(prop::collection::vec(0.5f64..1000.0, 1..6), 1..6).prop_map(|groups| {
        groups
            .into_iter()
            .enumerate()
            .map(|(gi, values)| {
                let items = values
                    .into_iter()
                    .enumerate()
                    .map(|(ii, v)| Item::new(format!("item-{gi}-{ii}"), v))
                    .collect();
                Group::with_items(format!("group-{gi}"), items)
            })
            .collect()
    })
}

// =============================================================================
// Scenario
// =============================================================================

#[test]
fn test_two_exchange_scenario() {
    let groups = vec![
        Group::new("X")
            .item(Item::new("A", 10.0))
            .item(Item::new("B", 30.0)),
        Group::new("Y").item(Item::new("C", 10.0)),
    ];
    let scene = TreemapLayout::new().layout(&groups, bounds());

    let x = &scene.groups[0];
    let y = &scene.groups[1];
    assert!(approx(x.rect.width, 240.0));
    assert!(approx(y.rect.width, 60.0));
    assert!(approx(y.rect.x, 240.0));

    let (a, b) = (&x.items[0], &x.items[1]);
    assert!(approx(a.rect.width, 60.0) && approx(a.rect.height, 100.0));
    assert!(approx(b.rect.width, 180.0) && approx(b.rect.height, 100.0));
    assert!(approx(b.rect.x, 60.0));

    let c = &y.items[0];
    assert!(approx(c.rect.area(), y.rect.area()));
}

#[test]
fn test_offset_bounds_are_respected() {
    let groups = vec![Group::new("X").item(Item::new("A", 1.0))];
    let scene = TreemapLayout::new().layout(&groups, Rect::new(20.0, 30.0, 100.0, 50.0));
    assert_eq!(scene.groups[0].rect, Rect::new(20.0, 30.0, 100.0, 50.0));
    assert_eq!(scene.groups[0].items[0].rect, Rect::new(20.0, 30.0, 100.0, 50.0));
}

#[test]
fn test_degenerate_input_is_diagnosed_but_laid_out() {
    let groups = vec![
        Group::new("X").item(Item::new("A", -3.0)),
        Group::new("X").item(Item::new("B", f64::INFINITY)),
    ];
    let found = diagnose(&groups);
    assert!(found.iter().any(|d| d.severity() == Severity::Error));
    assert!(found.contains(&Diagnostic::ZeroTotal));

    let scene = TreemapLayout::new().layout(&groups, bounds());
    assert_eq!(scene.groups.len(), 2);
    for (_, item) in scene.items() {
        assert!(item.rect.is_finite());
        assert_eq!(item.rect.area(), 0.0);
    }
}

#[test]
fn test_remaining_mode_compounds() {
    let groups = vec![Group::new("X")
        .item(Item::new("A", 10.0))
        .item(Item::new("B", 30.0))];
    let scene = TreemapLayout::new()
        .with_area_mode(AreaMode::Remaining)
        .layout(&groups, Rect::new(0.0, 0.0, 240.0, 100.0));
    let areas: Vec<f32> = scene.items().map(|(_, i)| i.rect.area()).collect();
    assert!(approx(areas[0], 6000.0));
    assert!(approx(areas[1], 13_500.0));
}

#[test]
fn test_weights_near_max_do_not_collapse() {
    let groups = vec![
        Group::new("X").item(Item::new("A", 1e308)),
        Group::new("Y").item(Item::new("B", 1e308)),
    ];
    let scene = TreemapLayout::new().layout(&groups, bounds());
    let widths: Vec<f32> = scene.groups.iter().map(|g| g.rect.width).collect();
    assert!(approx(widths[0], 150.0));
    assert!(approx(widths[1], 150.0));
    assert!(approx(scene.groups[1].rect.x, 150.0));
}

#[test]
fn test_scene_serializes_to_json() {
    let groups = vec![Group::new("Upbit").item(Item::new("Bitcoin", 1.0).quoted("BTC", "KRW"))];
    let scene = TreemapLayout::new().layout(&groups, bounds());
    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["groups"][0]["key"], "Upbit");
    assert_eq!(json["groups"][0]["items"][0]["symbol"], "BTC");
    assert_eq!(json["groups"][0]["rect"]["width"], 300.0);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_groups_tile_bounds(groups in groups_strategy()) {
        let scene = TreemapLayout::new().layout(&groups, bounds());
        let widths: f32 = scene.groups.iter().map(|g| g.rect.width).sum();
        prop_assert!(approx(widths, 300.0));
        prop_assert_eq!(scene.groups[0].rect.x, 0.0);
        let last = scene.groups.last().unwrap();
        prop_assert!(approx(last.rect.right(), 300.0));
        for pair in scene.groups.windows(2) {
            prop_assert!(approx(pair[0].rect.right(), pair[1].rect.x));
        }
        for group in &scene.groups {
            prop_assert_eq!(group.rect.height, 100.0);
        }
    }

    #[test]
    fn prop_group_widths_are_proportional(groups in groups_strategy()) {
        let scene = TreemapLayout::new().layout(&groups, bounds());
        let total: f64 = groups.iter().map(Group::total_value).sum();
        for (cell, group) in scene.groups.iter().zip(&groups) {
            let expected = (300.0 * group.total_value() / total) as f32;
            prop_assert!(approx(cell.rect.width, expected));
        }
    }

    #[test]
    fn prop_items_stay_inside_group(groups in groups_strategy()) {
        for mode in [AreaMode::Proportional, AreaMode::Remaining] {
            let scene = TreemapLayout::new().with_area_mode(mode).layout(&groups, bounds());
            for group in &scene.groups {
                let area: f32 = group.items.iter().map(|i| i.rect.area()).sum();
                prop_assert!(area <= group.rect.area() * (1.0 + EPS));
                if mode == AreaMode::Proportional {
                    prop_assert!(approx(area, group.rect.area()));
                }
                for item in &group.items {
                    prop_assert!(item.rect.width >= 0.0 && item.rect.height >= 0.0);
                    prop_assert!(item.rect.x >= group.rect.x - EPS);
                    prop_assert!(item.rect.y >= group.rect.y - EPS);
                    prop_assert!(item.rect.right() <= group.rect.right() + EPS);
                    prop_assert!(item.rect.bottom() <= group.rect.bottom() + EPS);
                }
            }
        }
    }

    #[test]
    fn prop_items_do_not_overlap(groups in groups_strategy()) {
        for mode in [AreaMode::Proportional, AreaMode::Remaining] {
            let scene = TreemapLayout::new().with_area_mode(mode).layout(&groups, bounds());
            for group in &scene.groups {
                for (i, a) in group.items.iter().enumerate() {
                    for b in &group.items[i + 1..] {
                        let shared = a.rect.intersection(&b.rect).map_or(0.0, |r| r.area());
                        prop_assert!(
                            shared <= EPS * a.rect.area().min(b.rect.area()).max(1.0),
                            "{} and {} overlap by {}", a.key, b.key, shared
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn prop_remaining_mode_never_grows_items(groups in groups_strategy()) {
        let direct = TreemapLayout::new().layout(&groups, bounds());
        let compounded = TreemapLayout::new()
            .with_area_mode(AreaMode::Remaining)
            .layout(&groups, bounds());
        for ((_, p), (_, r)) in direct.items().zip(compounded.items()) {
            prop_assert!(r.rect.area() <= p.rect.area() * (1.0 + EPS) + EPS);
        }
    }

    #[test]
    fn prop_huge_weights_still_tile_bounds(
        weights in prop::collection::vec(prop::collection::vec(1.0e306f64..f64::MAX, 1..4), 2..5),
    ) {
        let groups: Vec<Group> = weights
            .into_iter()
            .enumerate()
            .map(|(gi, values)| {
                let items = values
                    .into_iter()
                    .enumerate()
                    .map(|(ii, v)| Item::new(format!("item-{gi}-{ii}"), v))
                    .collect();
                Group::with_items(format!("group-{gi}"), items)
            })
            .collect();
        let scene = TreemapLayout::new().layout(&groups, bounds());
        let widths: f32 = scene.groups.iter().map(|g| g.rect.width).sum();
        prop_assert!(approx(widths, 300.0));
        for group in &scene.groups {
            prop_assert!(group.rect.is_finite());
            prop_assert!(group.rect.width > 0.0);
            let area: f32 = group.items.iter().map(|i| i.rect.area()).sum();
            prop_assert!(approx(area, group.rect.area()));
        }
    }

    #[test]
    fn prop_items_advance_in_input_order(groups in groups_strategy()) {
        let scene = TreemapLayout::new().layout(&groups, bounds());
        for (cell, group) in scene.groups.iter().zip(&groups) {
            let keys: Vec<_> = cell.items.iter().map(|i| i.key.as_str()).collect();
            let expected: Vec<_> = group.items.iter().map(|i| i.key.as_str()).collect();
            prop_assert_eq!(keys, expected);
            for pair in cell.items.windows(2) {
                let (a, b) = (pair[0].rect, pair[1].rect);
                prop_assert!(b.x >= a.x - EPS && b.y >= a.y - EPS);
            }
        }
    }

    #[test]
    fn prop_layout_is_deterministic(groups in groups_strategy()) {
        let engine = TreemapLayout::new();
        prop_assert_eq!(engine.layout(&groups, bounds()), engine.layout(&groups, bounds()));
    }

    #[test]
    fn prop_zero_weights_never_produce_nan(
        values in prop::collection::vec(prop_oneof![
            Just(0.0f64),
            Just(-1.0f64),
            Just(f64::NAN),
            Just(f64::INFINITY),
            0.0f64..10.0,
        ], 0..12),
        skip in any::<bool>(),
    ) {
        let items = values.iter().enumerate().map(|(i, v)| Item::new(format!("i{i}"), *v)).collect();
        let groups = vec![Group::with_items("G", items), Group::new("empty")];
        let policy = if skip { ZeroPolicy::Skip } else { ZeroPolicy::ZeroArea };
        let scene = TreemapLayout::new().with_zero_policy(policy).layout(&groups, bounds());
        for group in &scene.groups {
            prop_assert!(group.rect.is_finite());
            prop_assert!(group.rect.width >= 0.0);
            for item in &group.items {
                prop_assert!(item.rect.is_finite());
                if item.value == 0.0 {
                    prop_assert_eq!(item.rect.area(), 0.0);
                }
                if skip {
                    prop_assert!(item.value > 0.0);
                }
            }
        }
    }
}
