//! Integration tests: layout → fit-to-view / zoom / pan.

use mm_core::geometry::Point;
use mm_core::layout::{LayoutConfig, Viewport, layout};
use mm_core::transform::{FitConfig, ViewTransform, ZoomConfig};
use mm_core::{ExpansionSet, MindMap};

fn fitted(viewport: Viewport) -> (ViewTransform, mm_core::Layout) {
    let map = MindMap::from_json(include_str!("fixtures/sample.json")).unwrap();
    let cfg = LayoutConfig::default();
    let out = layout(map.root(), &ExpansionSet::all(map.root()), viewport.height, &cfg);
    let t = ViewTransform::IDENTITY.fit_to_view(&out, viewport, &cfg, &FitConfig::default());
    (t, out)
}

#[test]
fn zoom_never_leaves_range() {
    let cfg = ZoomConfig::default();
    let mut t = ViewTransform::IDENTITY;
    for _ in 0..200 {
        t = t.zoom_wheel(1.0, &cfg);
        assert!(t.scale >= 0.3 && t.scale <= 2.0);
    }
    assert!((t.scale - 0.3).abs() < 1e-6);
    for _ in 0..200 {
        t = t.zoom_wheel(-1.0, &cfg);
        assert!(t.scale >= 0.3 && t.scale <= 2.0);
    }
    assert!((t.scale - 2.0).abs() < 1e-6);
}

#[test]
fn fit_puts_every_node_inside_viewport() {
    let viewport = Viewport { width: 640.0, height: 360.0 };
    let cfg = LayoutConfig::default();
    let (t, out) = fitted(viewport);
    for (id, pos) in out.iter() {
        let tl = t.to_screen(pos.point());
        let br = t.to_screen(Point::new(pos.x + cfg.node_width, pos.y + cfg.node_height));
        assert!(tl.x >= 0.0 && tl.y >= 0.0, "{id} starts off-screen");
        assert!(br.x <= viewport.width && br.y <= viewport.height, "{id} ends off-screen");
    }
}

#[test]
fn fit_centers_content() {
    let viewport = Viewport { width: 1024.0, height: 768.0 };
    let cfg = LayoutConfig::default();
    let (t, out) = fitted(viewport);
    let bounds = out.content_bounds(&cfg).unwrap();
    let center = t.to_screen(Point::new(
        bounds.x + bounds.width / 2.0,
        bounds.y + bounds.height / 2.0,
    ));
    assert!((center.x - 512.0).abs() < 1e-2);
    assert!((center.y - 384.0).abs() < 1e-2);
}

#[test]
fn fit_scale_is_capped() {
    let (t, _) = fitted(Viewport { width: 10_000.0, height: 10_000.0 });
    assert_eq!(t.scale, 1.5);
}

#[test]
fn fit_may_go_below_interactive_minimum() {
    let (t, _) = fitted(Viewport { width: 100.0, height: 100.0 });
    assert!(t.scale < 0.3);
}
