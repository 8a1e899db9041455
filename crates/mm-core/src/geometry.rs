//! Geometry helpers: points, rectangles, and parent→child edge curves.

use crate::expansion::ExpansionSet;
use crate::id::NodeId;
use crate::layout::{Layout, LayoutConfig};
use crate::model::Node;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Edges inclusive, like a DOM hit box.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Grow by `pad` on every side.
    pub fn inflate(&self, pad: f32) -> Rect {
        Rect::new(
            self.x - pad,
            self.y - pad,
            self.width + 2.0 * pad,
            self.height + 2.0 * pad,
        )
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// Cubic connector from a parent's right-middle to a child's left-middle.
///
/// Both control points sit on the horizontal midpoint, each at its own
/// endpoint's y, so the curve leaves and enters horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeCurve {
    pub parent: NodeId,
    pub child: NodeId,
    pub start: Point,
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

impl EdgeCurve {
    pub fn between(
        parent: NodeId,
        child: NodeId,
        parent_pos: Point,
        child_pos: Point,
        cfg: &LayoutConfig,
    ) -> Self {
        let start = Point::new(parent_pos.x + cfg.node_width, parent_pos.y + cfg.node_height / 2.0);
        let end = Point::new(child_pos.x, child_pos.y + cfg.node_height / 2.0);
        let mid_x = (start.x + end.x) / 2.0;
        Self {
            parent,
            child,
            start,
            c1: Point::new(mid_x, start.y),
            c2: Point::new(mid_x, end.y),
            end,
        }
    }

    /// SVG path data: `M sx sy C mx sy, mx ey, ex ey`.
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.c1.x,
            self.c1.y,
            self.c2.x,
            self.c2.y,
            self.end.x,
            self.end.y
        )
    }

    /// Whether this edge connects to `id` (highlighting when it is selected).
    pub fn touches(&self, id: NodeId) -> bool {
        self.parent == id || self.child == id
    }
}

/// All edges of the visible tree, in pre-order.
///
/// Only parents in the expansion set contribute, and only children that
/// actually have a position.
pub fn edges(root: &Node, expanded: &ExpansionSet, layout: &Layout, cfg: &LayoutConfig) -> Vec<EdgeCurve> {
    let mut out = Vec::new();
    collect_edges(root, expanded, layout, cfg, &mut out);
    out
}

fn collect_edges(
    node: &Node,
    expanded: &ExpansionSet,
    layout: &Layout,
    cfg: &LayoutConfig,
    out: &mut Vec<EdgeCurve>,
) {
    if !expanded.contains(node.id) {
        return;
    }
    for child in node.children() {
        if let (Some(p), Some(c)) = (layout.get(node.id), layout.get(child.id)) {
            out.push(EdgeCurve::between(node.id, child.id, p.point(), c.point(), cfg));
        }
        collect_edges(child, expanded, layout, cfg, out);
    }
}
