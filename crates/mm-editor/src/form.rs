//! Detail-panel view model and edit form.

use mm_core::{Node, NodeId, NodeUpdate};
use serde::Serialize;

/// Text fields of the node edit form, prefilled from the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditForm {
    pub id: NodeId,
    pub label: String,
    pub summary: String,
    pub description: String,
}

/// Names of the editable fields, for hosts that bind inputs by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Label,
    Summary,
    Description,
}

impl FormField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "label" => Some(Self::Label),
            "summary" => Some(Self::Summary),
            "description" => Some(Self::Description),
            _ => None,
        }
    }
}

impl EditForm {
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id,
            label: node.label.clone(),
            summary: node.summary.clone().unwrap_or_default(),
            description: node.description.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Label => &mut self.label,
            FormField::Summary => &mut self.summary,
            FormField::Description => &mut self.description,
        };
        *slot = value.into();
    }

    /// The patch that turns `node` into what the form shows.
    ///
    /// Unchanged fields are left out, so saving an untouched form is a no-op.
    /// An optional field the node never had stays absent when left empty;
    /// clearing a field the node had stores an empty string.
    pub fn to_update(&self, node: &Node) -> NodeUpdate {
        NodeUpdate {
            label: (self.label != node.label).then(|| self.label.clone()),
            summary: changed(&self.summary, node.summary.as_deref()),
            description: changed(&self.description, node.description.as_deref()),
            metadata: None,
        }
    }
}

fn changed(value: &str, current: Option<&str>) -> Option<String> {
    (value != current.unwrap_or_default()).then(|| value.to_owned())
}

/// Read-only detail view of the selected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDetail {
    pub id: NodeId,
    pub label: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Metadata entries in document order; empty when absent.
    pub metadata: Vec<(String, String)>,
    /// `"N child node(s)"`, or `None` for leaves.
    pub children: Option<String>,
}

impl NodeDetail {
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id,
            label: node.label.clone(),
            summary: node.summary.clone().filter(|s| !s.is_empty()),
            description: node.description.clone().filter(|s| !s.is_empty()),
            metadata: node
                .metadata
                .iter()
                .flatten()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            children: node.has_children().then(|| child_count_text(node.child_count())),
        }
    }
}

pub fn child_count_text(n: usize) -> String {
    if n == 1 {
        "1 child node".to_owned()
    } else {
        format!("{n} child nodes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_form_is_empty_patch() {
        let node = Node::new("n", "Label").with_summary("Short");
        let form = EditForm::from_node(&node);
        assert!(form.to_update(&node).is_empty());
    }

    #[test]
    fn empty_field_stays_absent() {
        let node = Node::new("n", "Label");
        let mut form = EditForm::from_node(&node);
        form.set(FormField::Label, "Renamed");
        let patch = form.to_update(&node);
        assert_eq!(patch.label.as_deref(), Some("Renamed"));
        assert_eq!(patch.summary, None);
        assert_eq!(patch.description, None);
    }

    #[test]
    fn clearing_existing_field_stores_empty() {
        let node = Node::new("n", "Label").with_summary("Short");
        let mut form = EditForm::from_node(&node);
        form.set(FormField::Summary, "");
        assert_eq!(form.to_update(&node).summary.as_deref(), Some(""));
    }

    #[test]
    fn child_count_pluralizes() {
        assert_eq!(child_count_text(1), "1 child node");
        assert_eq!(child_count_text(3), "3 child nodes");
    }

    #[test]
    fn detail_of_leaf_has_no_children_line() {
        let detail = NodeDetail::from_node(&Node::new("leaf", "Leaf"));
        assert_eq!(detail.children, None);
        assert!(detail.metadata.is_empty());
    }

    #[test]
    fn field_names_parse() {
        assert_eq!(FormField::parse("summary"), Some(FormField::Summary));
        assert_eq!(FormField::parse("metadata"), None);
    }
}
