//! Expansion state: which nodes show their children.
//!
//! Membership only matters for nodes that actually have children. A leaf ID
//! in the set is harmless and ignored by layout.

use crate::id::NodeId;
use crate::model::Node;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    ids: HashSet<NodeId>,
}

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every node in the tree expanded. This is the state a freshly loaded
    /// mindmap starts in.
    pub fn all(root: &Node) -> Self {
        let mut ids = HashSet::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            ids.insert(node.id);
            stack.extend(node.children().iter().map(|c| &**c));
        }
        Self { ids }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    /// Whether `node` participates in layout with its children.
    pub fn is_open(&self, node: &Node) -> bool {
        node.has_children() && self.contains(node.id)
    }

    pub fn expand(&mut self, id: NodeId) {
        self.ids.insert(id);
    }

    /// Collapse `id`. Collapsing an already-collapsed node is a no-op.
    pub fn collapse(&mut self, id: NodeId) {
        self.ids.remove(&id);
    }

    /// Flip `id` and return whether it is now expanded.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<NodeId> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(NodeId::intern).collect()
    }
}
