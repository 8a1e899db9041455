//! Lint diagnostics for mindmap trees.
//!
//! Reports structural issues without modifying the tree. Unlike
//! [`MindMap::new`](crate::model::MindMap::new), which stops at the first
//! duplicate, this walks everything and reports all findings.

use crate::expansion::ExpansionSet;
use crate::id::NodeId;
use crate::model::Node;
use std::collections::{HashMap, HashSet};

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Should be fixed; layout or lookups will misbehave.
    Warning,
    /// Informational only.
    Info,
}

/// A single lint diagnostic for a tree node.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    pub node_id: NodeId,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "duplicate-id", "empty-label").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the tree and return diagnostics.
#[must_use]
pub fn lint_tree(root: &Node, expanded: &ExpansionSet) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_duplicate_ids(root, &mut diags);
    lint_empty_labels(root, &mut diags);
    lint_leaf_expanded(root, expanded, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn walk<'a>(root: &'a Node, mut visit: impl FnMut(&'a Node)) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        stack.extend(node.children().iter().rev().map(|c| &**c));
    }
}

/// Warn once per ID that appears more than once.
fn lint_duplicate_ids(root: &Node, diags: &mut Vec<LintDiagnostic>) {
    let mut counts: HashMap<NodeId, usize> = HashMap::new();
    let mut order = Vec::new();
    walk(root, |node| {
        let n = counts.entry(node.id).or_insert(0);
        *n += 1;
        if *n == 2 {
            order.push(node.id);
        }
    });
    for id in order {
        diags.push(LintDiagnostic {
            node_id: id,
            message: format!(
                "Node id `{id}` is used {} times; later nodes overwrite earlier ones in layout.",
                counts[&id]
            ),
            severity: LintSeverity::Warning,
            rule: "duplicate-id",
        });
    }
}

fn lint_empty_labels(root: &Node, diags: &mut Vec<LintDiagnostic>) {
    walk(root, |node| {
        if node.label.trim().is_empty() {
            diags.push(LintDiagnostic {
                node_id: node.id,
                message: format!("Node `{}` has an empty label.", node.id),
                severity: LintSeverity::Warning,
                rule: "empty-label",
            });
        }
    });
}

/// Info when the expansion set names a node that has nothing to expand.
fn lint_leaf_expanded(root: &Node, expanded: &ExpansionSet, diags: &mut Vec<LintDiagnostic>) {
    let mut reported = HashSet::new();
    walk(root, |node| {
        if !node.has_children() && expanded.contains(node.id) && reported.insert(node.id) {
            diags.push(LintDiagnostic {
                node_id: node.id,
                message: format!("Leaf `{}` is marked expanded; this has no effect.", node.id),
                severity: LintSeverity::Info,
                rule: "leaf-expanded",
            });
        }
    });
}
