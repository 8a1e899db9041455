//! Hit testing: screen point → node lookup.
//!
//! Reverse-walks the display list (front-to-back) so the last-drawn node wins
//! where boxes overlap.

use crate::scene::{DisplayList, NodeBox, TOGGLE_HIT_WIDTH};
use mm_core::{NodeId, Point, Rect, ViewTransform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The node body: selects.
    Node(NodeId),
    /// The expand/collapse strip of a node with children.
    Toggle(NodeId),
}

impl Hit {
    pub fn id(&self) -> NodeId {
        match self {
            Hit::Node(id) | Hit::Toggle(id) => *id,
        }
    }
}

/// Find the topmost node under a screen-space point.
/// Returns `None` on the background.
pub fn hit_test(list: &DisplayList, view: &ViewTransform, screen: Point) -> Option<Hit> {
    let p = view.to_layout(screen);
    list.nodes().rev().find_map(|node| hit_node(node, p))
}

/// All nodes whose boxes intersect a layout-space rectangle, in draw order.
pub fn hit_test_rect(list: &DisplayList, area: Rect) -> Vec<NodeId> {
    list.nodes()
        .filter(|n| {
            let r = n.rect;
            r.x <= area.right() && area.x <= r.right() && r.y <= area.bottom() && area.y <= r.bottom()
        })
        .map(|n| n.id)
        .collect()
}

fn hit_node(node: &NodeBox, p: Point) -> Option<Hit> {
    if !node.rect.contains(p) {
        return None;
    }
    if node.toggle.is_some() && p.x >= node.rect.right() - TOGGLE_HIT_WIDTH {
        return Some(Hit::Toggle(node.id));
    }
    Some(Hit::Node(node.id))
}
