//! Display list → Vello drawing commands.
//!
//! Every shape is emitted in layout space under a single view affine, so the
//! caller only has to clear the `Scene` and present it.

use crate::scene::{DisplayList, DrawItem, NodeBox};
use crate::theme::{Rgba, Theme};
use kurbo::{Affine, BezPath, Cap, Join, Line, Rect, RoundedRect, Stroke};
use mm_core::{EdgeCurve, ViewTransform};
use peniko::{Color, Fill};
use vello::Scene;

/// The affine equivalent of [`ViewTransform::to_screen`].
pub fn view_affine(view: &ViewTransform) -> Affine {
    Affine::translate((view.x as f64, view.y as f64)) * Affine::scale(view.scale as f64)
}

/// Paint the display list into a Vello scene.
///
/// Call once per frame with a freshly-cleared `Scene`.
pub fn paint_display_list(scene: &mut Scene, list: &DisplayList, view: &ViewTransform, theme: &Theme) {
    let affine = view_affine(view);
    for item in &list.items {
        match item {
            DrawItem::Edge { curve, highlighted } => paint_edge(scene, affine, curve, *highlighted, theme),
            DrawItem::Node(node) => paint_node(scene, affine, node, theme),
        }
    }
}

// ─── Shape painters ──────────────────────────────────────────────────────────

fn paint_edge(scene: &mut Scene, affine: Affine, curve: &EdgeCurve, highlighted: bool, theme: &Theme) {
    let mut bez = BezPath::new();
    bez.move_to(pt(curve.start.x, curve.start.y));
    bez.curve_to(
        pt(curve.c1.x, curve.c1.y),
        pt(curve.c2.x, curve.c2.y),
        pt(curve.end.x, curve.end.y),
    );
    let (color, width) = if highlighted {
        (theme.edge_highlight, theme.highlight_width)
    } else {
        (theme.edge, theme.edge_width)
    };
    let stroke = Stroke::new(width as f64).with_caps(Cap::Round).with_join(Join::Round);
    scene.stroke(&stroke, affine, color_of(color), None, &bez);
}

fn paint_node(scene: &mut Scene, affine: Affine, node: &NodeBox, theme: &Theme) {
    let shape = to_kurbo(node.rect).to_rounded_rect(theme.corner_radius as f64);
    let fill = if node.is_root {
        theme.root_fill
    } else if node.hovered {
        theme.hovered_fill
    } else {
        theme.node_fill
    };
    scene.fill(Fill::NonZero, affine, color_of(fill), None, &shape);

    let (border, width) = if node.selected {
        (theme.selected_border, theme.highlight_width)
    } else {
        (theme.node_border, theme.border_width)
    };
    scene.stroke(&Stroke::new(width as f64), affine, color_of(border), None, &shape);

    if let Some(toggle) = &node.toggle {
        paint_toggle(scene, affine, toggle.rect, toggle.expanded, theme);
    }

    log::trace!(
        "LABEL @{} {:?} at ({}, {})",
        node.id.as_str(),
        node.label,
        node.rect.x,
        node.rect.y
    );
    // Glyph runs need a font context; the Canvas2D and SVG backends draw labels.
}

fn paint_toggle(scene: &mut Scene, affine: Affine, rect: mm_core::Rect, expanded: bool, theme: &Theme) {
    let bg: RoundedRect = to_kurbo(rect).to_rounded_rect(4.0);
    scene.fill(Fill::NonZero, affine, color_of(theme.toggle_fill), None, &bg);

    let cx = (rect.x + rect.width / 2.0) as f64;
    let cy = (rect.y + rect.height / 2.0) as f64;
    let arm = (rect.width as f64) * 0.25;
    let stroke = Stroke::new(1.5).with_caps(Cap::Round);
    let label = color_of(theme.label);
    scene.stroke(&stroke, affine, label, None, &Line::new((cx - arm, cy), (cx + arm, cy)));
    if !expanded {
        scene.stroke(&stroke, affine, label, None, &Line::new((cx, cy - arm), (cx, cy + arm)));
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn pt(x: f32, y: f32) -> kurbo::Point {
    kurbo::Point::new(x as f64, y as f64)
}

fn to_kurbo(r: mm_core::Rect) -> Rect {
    Rect::new(r.x as f64, r.y as f64, r.right() as f64, r.bottom() as f64)
}

fn color_of(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}
