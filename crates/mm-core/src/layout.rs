//! Horizontal tree layout.
//!
//! The root sits at a fixed x, vertically centered in the canvas. Each
//! expanded node places its children one column to the right, stacked top to
//! bottom, every child centered inside the band its own subtree needs, and
//! the whole stack centered on the parent. Collapsed subtrees are never
//! visited, so their descendants get no position at all.
//!
//! Layout is a pure function of `(tree, expansion set, canvas height)`. It is
//! recomputed from scratch on every change and never patched.

use crate::expansion::ExpansionSet;
use crate::geometry::{Point, Rect};
use crate::id::NodeId;
use crate::model::Node;
use serde::Serialize;
use std::collections::HashMap;

/// The canvas (viewport) dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Node box size and spacing used by layout, edges, and fit-to-view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Gap between a parent's right edge and its children's column.
    pub horizontal_gap: f32,
    /// Gap between stacked sibling subtrees.
    pub vertical_gap: f32,
    /// Root x offset.
    pub root_x: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 44.0,
            horizontal_gap: 80.0,
            vertical_gap: 20.0,
            root_x: 100.0,
        }
    }
}

/// Top-left corner of a laid-out node plus its parent link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "parentId")]
    pub parent: Option<NodeId>,
}

impl Position {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Result of a layout pass: one position per visible node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layout {
    positions: HashMap<NodeId, Position>,
}

impl Layout {
    pub fn get(&self, id: NodeId) -> Option<&Position> {
        self.positions.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Position)> {
        self.positions.iter().map(|(id, p)| (*id, p))
    }

    /// The box a node occupies in layout space.
    pub fn node_rect(&self, id: NodeId, cfg: &LayoutConfig) -> Option<Rect> {
        self.get(id)
            .map(|p| Rect::new(p.x, p.y, cfg.node_width, cfg.node_height))
    }

    /// Bounding box of every node box, or `None` for an empty layout.
    pub fn content_bounds(&self, cfg: &LayoutConfig) -> Option<Rect> {
        self.positions
            .values()
            .map(|p| Rect::new(p.x, p.y, cfg.node_width, cfg.node_height))
            .reduce(|acc, r| acc.union(&r))
    }
}

/// Vertical space a subtree occupies when drawn.
///
/// A leaf, a node with an empty child list, or a collapsed node is exactly
/// one node tall, whatever it actually contains.
pub fn subtree_height(node: &Node, expanded: &ExpansionSet, cfg: &LayoutConfig) -> f32 {
    if !expanded.is_open(node) {
        return cfg.node_height;
    }
    let children = node.children();
    let stacked: f32 = children
        .iter()
        .map(|child| subtree_height(child, expanded, cfg))
        .sum::<f32>()
        + cfg.vertical_gap * (children.len() - 1) as f32;
    stacked.max(cfg.node_height)
}

/// Assign a position to every node reachable from `root` through expanded
/// ancestors.
///
/// Duplicate IDs are not detected here: a later node in pre-order overwrites
/// an earlier one under the same key.
pub fn layout(
    root: &Node,
    expanded: &ExpansionSet,
    canvas_height: f32,
    cfg: &LayoutConfig,
) -> Layout {
    let mut out = Layout::default();
    let root_y = canvas_height / 2.0 - cfg.node_height / 2.0;
    place(root, cfg.root_x, root_y, None, expanded, cfg, &mut out);
    log::debug!(
        "layout: {} positioned nodes, canvas height {canvas_height}",
        out.len()
    );
    out
}

fn place(
    node: &Node,
    x: f32,
    y: f32,
    parent: Option<NodeId>,
    expanded: &ExpansionSet,
    cfg: &LayoutConfig,
    out: &mut Layout,
) {
    out.positions.insert(node.id, Position { x, y, parent });

    if !expanded.is_open(node) {
        return;
    }

    let child_x = x + cfg.node_width + cfg.horizontal_gap;
    let mut band_top = y - subtree_height(node, expanded, cfg) / 2.0 + cfg.node_height / 2.0;

    for child in node.children() {
        let band = subtree_height(child, expanded, cfg);
        let child_y = band_top + band / 2.0 - cfg.node_height / 2.0;
        place(child, child_x, child_y, Some(node.id), expanded, cfg, out);
        band_top += band + cfg.vertical_gap;
    }
}
