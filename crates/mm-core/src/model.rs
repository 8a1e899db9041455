//! Mindmap tree model.
//!
//! A mindmap is a rooted, ordered tree of [`Node`] values loaded once from
//! JSON and afterwards only replaced wholesale: [`MindMap::update`] returns a
//! new tree in which only the nodes on the path from the root to the edited
//! node are fresh allocations. Every other subtree is shared (`Arc`) with the
//! previous tree, so unchanged siblings stay pointer-equal across edits.
//!
//! Export writes each node's keys in the order they were read, so an
//! unedited document round-trips byte-for-byte. Fields a node did not have
//! when loaded follow in `id, label, summary, description, metadata,
//! children` order, then any other new keys.

use crate::id::NodeId;
use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashSet;
use std::sync::Arc;

/// Errors produced while loading or serializing a mindmap.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid mindmap JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate node id `{0}`")]
    DuplicateId(NodeId),
}

// ─── Node ────────────────────────────────────────────────────────────────

/// Keys the model reads into typed fields.
const KNOWN_KEYS: [&str; 6] = ["id", "label", "summary", "description", "metadata", "children"];

/// One element of the mindmap tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<IndexMap<String, String>>,
    /// `None` and `Some(vec![])` lay out identically but are kept apart so
    /// the exported JSON matches what was loaded.
    pub children: Option<Vec<Arc<Node>>>,
    /// Fields this model does not know about, preserved for export. An
    /// optional known field that was `null` in the source is kept here too.
    pub extra: IndexMap<String, Value>,
    /// Object keys in source order. Empty for nodes built in memory.
    key_order: Vec<String>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            summary: None,
            description: None,
            metadata: None,
            children: None,
            extra: IndexMap::new(),
            key_order: Vec::new(),
        }
    }

    /// Builder: attach children (replacing any existing ones).
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children = Some(children.into_iter().map(Arc::new).collect());
        self
    }

    /// Builder: set the summary (shown as hover tooltip).
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Ordered children. Empty for both a missing and an empty `children` array.
    pub fn children(&self) -> &[Arc<Node>] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Keys to write: source order first, then fields and extras added since.
    fn output_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.key_order.iter().map(String::as_str).collect();
        for key in KNOWN_KEYS {
            if !self.is_recorded(key) {
                keys.push(key);
            }
        }
        for key in self.extra.keys() {
            if !self.is_recorded(key) {
                keys.push(key);
            }
        }
        keys
    }

    fn is_recorded(&self, key: &str) -> bool {
        self.key_order.iter().any(|k| k == key)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for key in self.output_keys() {
            match key {
                "id" => map.serialize_entry(key, &self.id)?,
                "label" => map.serialize_entry(key, &self.label)?,
                "summary" if self.summary.is_some() => map.serialize_entry(key, &self.summary)?,
                "description" if self.description.is_some() => map.serialize_entry(key, &self.description)?,
                "metadata" if self.metadata.is_some() => map.serialize_entry(key, &self.metadata)?,
                "children" if self.children.is_some() => map.serialize_entry(key, &self.children)?,
                _ => {
                    if let Some(value) = self.extra.get(key) {
                        map.serialize_entry(key, value)?;
                    }
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = IndexMap::<String, Value>::deserialize(deserializer)?;
        let key_order = fields.keys().cloned().collect();
        Ok(Node {
            id: take_required(&mut fields, "id")?,
            label: take_required(&mut fields, "label")?,
            summary: take_optional(&mut fields, "summary")?,
            description: take_optional(&mut fields, "description")?,
            metadata: take_optional(&mut fields, "metadata")?,
            children: take_optional(&mut fields, "children")?,
            extra: fields,
            key_order,
        })
    }
}

fn take_required<T: DeserializeOwned, E: de::Error>(
    fields: &mut IndexMap<String, Value>,
    key: &'static str,
) -> Result<T, E> {
    let value = fields.shift_remove(key).ok_or_else(|| E::missing_field(key))?;
    serde_json::from_value(value).map_err(E::custom)
}

/// Absent stays absent; `null` is left in `fields` so it is written back.
fn take_optional<T: DeserializeOwned, E: de::Error>(
    fields: &mut IndexMap<String, Value>,
    key: &'static str,
) -> Result<Option<T>, E> {
    if matches!(fields.get(key), None | Some(Value::Null)) {
        return Ok(None);
    }
    take_required(fields, key).map(Some)
}

// ─── Updates ─────────────────────────────────────────────────────────────

/// A partial set of field replacements for one node.
///
/// `Some` replaces the field, `None` leaves it untouched. IDs and children
/// are not editable through an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub label: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<IndexMap<String, String>>,
}

impl NodeUpdate {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.summary.is_none()
            && self.description.is_none()
            && self.metadata.is_none()
    }

    fn apply(&self, node: &mut Node) {
        if let Some(label) = &self.label {
            node.label.clone_from(label);
        }
        if let Some(summary) = &self.summary {
            node.summary = Some(summary.clone());
        }
        if let Some(description) = &self.description {
            node.description = Some(description.clone());
        }
        if let Some(metadata) = &self.metadata {
            node.metadata = Some(metadata.clone());
        }
    }
}

// ─── MindMap ─────────────────────────────────────────────────────────────

/// Child-index path from the root to a node. Mindmaps are shallow, so the
/// path almost always fits inline.
pub type NodePath = SmallVec<[usize; 8]>;

/// A validated mindmap tree: every node ID is unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MindMap {
    root: Arc<Node>,
}

impl MindMap {
    /// Wrap a tree, rejecting it if any ID appears twice.
    pub fn new(root: Node) -> Result<Self, ModelError> {
        Self::from_arc(Arc::new(root))
    }

    /// A map holding just a root node. Cannot contain duplicates.
    pub fn leaf(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            root: Arc::new(Node::new(id, label)),
        }
    }

    fn from_arc(root: Arc<Node>) -> Result<Self, ModelError> {
        if let Some(dup) = first_duplicate_id(&root) {
            log::warn!("rejecting mindmap: duplicate node id `{dup}`");
            return Err(ModelError::DuplicateId(dup));
        }
        Ok(Self { root })
    }

    /// Parse a JSON document conforming to the node schema.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let root: Node = serde_json::from_str(text)?;
        let map = Self::new(root)?;
        log::debug!("loaded mindmap with {} nodes", map.node_count());
        Ok(map)
    }

    /// Pretty-printed JSON (two-space indent) of the whole tree.
    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(&*self.root)?)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The shared root handle. Two maps with pointer-equal roots are identical.
    pub fn root_arc(&self) -> &Arc<Node> {
        &self.root
    }

    /// Depth-first search by ID. Unknown IDs yield `None`.
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        find_in(&self.root, id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Child-index path from the root to `id` (empty for the root itself).
    pub fn path_to(&self, id: NodeId) -> Option<NodePath> {
        let mut path = NodePath::new();
        path_in(&self.root, id, &mut path).then_some(path)
    }

    /// Return a new tree with `patch` merged into node `id`.
    ///
    /// Only the nodes on the root-to-target path are reallocated. An unknown
    /// ID or an empty patch returns a tree sharing the same root.
    #[must_use]
    pub fn update(&self, id: NodeId, patch: &NodeUpdate) -> Self {
        let Some(path) = self.path_to(id) else {
            log::debug!("update ignored: no node `{id}`");
            return self.clone();
        };
        if patch.is_empty() {
            return self.clone();
        }
        Self {
            root: rebuild_along(&self.root, &path, patch),
        }
    }

    /// All node IDs in pre-order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack: Vec<&Node> = vec![&self.root];
        while let Some(node) = stack.pop() {
            ids.push(node.id);
            stack.extend(node.children().iter().rev().map(|c| &**c));
        }
        ids
    }

    pub fn node_count(&self) -> usize {
        self.node_ids().len()
    }
}

fn find_in(node: &Node, id: NodeId) -> Option<&Node> {
    if node.id == id {
        return Some(node);
    }
    node.children().iter().find_map(|child| find_in(child, id))
}

fn path_in(node: &Node, id: NodeId, path: &mut NodePath) -> bool {
    if node.id == id {
        return true;
    }
    for (i, child) in node.children().iter().enumerate() {
        path.push(i);
        if path_in(child, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn rebuild_along(node: &Arc<Node>, path: &[usize], patch: &NodeUpdate) -> Arc<Node> {
    let mut next = Node::clone(node);
    match path.split_first() {
        None => patch.apply(&mut next),
        Some((&index, rest)) => {
            if let Some(children) = next.children.as_mut() {
                let updated = rebuild_along(&children[index], rest, patch);
                children[index] = updated;
            }
        }
    }
    Arc::new(next)
}

/// First ID (in pre-order) that was already seen earlier in the traversal.
pub(crate) fn first_duplicate_id(root: &Node) -> Option<NodeId> {
    let mut seen = HashSet::new();
    let mut stack: Vec<&Node> = vec![root];
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id) {
            return Some(node.id);
        }
        stack.extend(node.children().iter().rev().map(|c| &**c));
    }
    None
}
