//! Layout → display list.
//!
//! The display list is the backend-neutral render tree: edges first (they sit
//! under the nodes), then node boxes in pre-order. Everything is in layout
//! space; backends apply the view transform themselves. Edge geometry comes
//! straight from the layout, so exporters never need to read positions back
//! from a rendering surface.

use mm_core::geometry::{EdgeCurve, Rect, edges};
use mm_core::{ExpansionSet, Layout, LayoutConfig, Node, NodeId};

/// Side of the square expand/collapse button.
pub const TOGGLE_SIZE: f32 = 20.0;
/// Inset of the toggle button from the node's right edge.
pub const TOGGLE_INSET: f32 = 4.0;
/// Width of the clickable expand/collapse strip at a node's right edge.
pub const TOGGLE_HIT_WIDTH: f32 = 24.0;
/// Horizontal label padding inside a node box.
pub const LABEL_PADDING: f32 = 14.0;

/// Node IDs that change how things are drawn. Either may name a node that no
/// longer exists, in which case nothing is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlight {
    pub selected: Option<NodeId>,
    pub hovered: Option<NodeId>,
}

/// Expand/collapse affordance drawn on nodes that have children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Toggle {
    pub rect: Rect,
    pub expanded: bool,
}

impl Toggle {
    pub fn glyph(&self) -> &'static str {
        if self.expanded { "−" } else { "+" }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub id: NodeId,
    pub rect: Rect,
    pub label: String,
    pub is_root: bool,
    pub selected: bool,
    pub hovered: bool,
    pub toggle: Option<Toggle>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Edge { curve: EdgeCurve, highlighted: bool },
    Node(NodeBox),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub items: Vec<DrawItem>,
    /// Union of all node boxes, `None` when nothing is positioned.
    pub bounds: Option<Rect>,
}

impl DisplayList {
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &NodeBox> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Node(node) => Some(node),
            DrawItem::Edge { .. } => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = (&EdgeCurve, bool)> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Edge { curve, highlighted } => Some((curve, *highlighted)),
            DrawItem::Node(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The toggle button rectangle for a node box.
pub fn toggle_rect(node: Rect) -> Rect {
    Rect::new(
        node.right() - TOGGLE_INSET - TOGGLE_SIZE,
        node.y + (node.height - TOGGLE_SIZE) / 2.0,
        TOGGLE_SIZE,
        TOGGLE_SIZE,
    )
}

/// Build the display list for the visible part of the tree.
pub fn build_display_list(
    root: &Node,
    expanded: &ExpansionSet,
    layout: &Layout,
    highlight: Highlight,
    cfg: &LayoutConfig,
) -> DisplayList {
    let mut items: Vec<DrawItem> = edges(root, expanded, layout, cfg)
        .into_iter()
        .map(|curve| DrawItem::Edge {
            highlighted: highlight.selected.is_some_and(|id| curve.touches(id)),
            curve,
        })
        .collect();

    push_nodes(root, expanded, layout, highlight, cfg, &mut items);

    DisplayList {
        items,
        bounds: layout.content_bounds(cfg),
    }
}

fn push_nodes(
    node: &Node,
    expanded: &ExpansionSet,
    layout: &Layout,
    highlight: Highlight,
    cfg: &LayoutConfig,
    out: &mut Vec<DrawItem>,
) {
    let (Some(pos), Some(rect)) = (layout.get(node.id), layout.node_rect(node.id, cfg)) else {
        return;
    };
    let toggle = node.has_children().then(|| Toggle {
        rect: toggle_rect(rect),
        expanded: expanded.contains(node.id),
    });
    out.push(DrawItem::Node(NodeBox {
        id: node.id,
        rect,
        label: node.label.clone(),
        is_root: pos.is_root(),
        selected: highlight.selected == Some(node.id),
        hovered: highlight.hovered == Some(node.id),
        toggle,
    }));

    if expanded.contains(node.id) {
        for child in node.children() {
            push_nodes(child, expanded, layout, highlight, cfg, out);
        }
    }
}
