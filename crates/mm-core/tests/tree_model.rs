//! Integration tests: JSON load → update → export.

use mm_core::id::NodeId;
use mm_core::{MindMap, ModelError, NodeUpdate};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const SAMPLE: &str = include_str!("fixtures/sample.json");

#[test]
fn export_without_edits_is_byte_identical() {
    let map = MindMap::from_json(SAMPLE).unwrap();
    assert_eq!(map.to_json_pretty().unwrap(), SAMPLE.trim_end());
}

#[test]
fn unknown_fields_survive_export() {
    let map = MindMap::from_json(SAMPLE).unwrap();
    let perf = map.find(NodeId::intern("perf")).unwrap();
    assert_eq!(perf.extra.get("color").and_then(|v| v.as_str()), Some("#4f46e5"));
    assert!(map.to_json_pretty().unwrap().contains(r##""color": "#4f46e5""##));
}

#[test]
fn empty_children_array_is_preserved() {
    let map = MindMap::from_json(SAMPLE).unwrap();
    let api = map.find(NodeId::intern("api")).unwrap();
    assert_eq!(api.children.as_ref().map(Vec::len), Some(0));
    assert!(!api.has_children());
}

#[test]
fn update_shares_untouched_subtrees() {
    let map = MindMap::from_json(SAMPLE).unwrap();
    let next = map.update(NodeId::intern("onboarding"), &NodeUpdate::label("First run"));

    let old_root = map.root();
    let new_root = next.root();
    assert_eq!(new_root.label, old_root.label);
    assert_eq!(new_root.metadata, old_root.metadata);

    // Siblings off the edited path are the very same allocations.
    assert!(Arc::ptr_eq(&old_root.children()[1], &new_root.children()[1]));
    assert!(Arc::ptr_eq(&old_root.children()[2], &new_root.children()[2]));
    let old_growth = &old_root.children()[0];
    let new_growth = &new_root.children()[0];
    assert!(!Arc::ptr_eq(old_growth, new_growth));
    assert!(Arc::ptr_eq(&old_growth.children()[1], &new_growth.children()[1]));

    assert_eq!(next.find(NodeId::intern("onboarding")).unwrap().label, "First run");
    assert_eq!(map.find(NodeId::intern("onboarding")).unwrap().label, "Onboarding");
}

#[test]
fn update_changes_only_the_target_in_json() {
    let map = MindMap::from_json(SAMPLE).unwrap();
    let next = map.update(NodeId::intern("research"), &NodeUpdate::label("Discovery"));
    let expected = SAMPLE
        .trim_end()
        .replace(r#""label": "Research""#, r#""label": "Discovery""#);
    assert_eq!(next.to_json_pretty().unwrap(), expected);
}

#[test]
fn empty_update_is_identity() {
    let map = MindMap::from_json(SAMPLE).unwrap();
    let next = map.update(NodeId::intern("growth"), &NodeUpdate::default());
    assert!(Arc::ptr_eq(map.root_arc(), next.root_arc()));
    assert_eq!(next.to_json_pretty().unwrap(), SAMPLE.trim_end());
}

#[test]
fn duplicate_ids_fail_fast_on_load() {
    let err = MindMap::from_json(include_str!("fixtures/duplicate_ids.json")).unwrap_err();
    match err {
        ModelError::DuplicateId(id) => assert_eq!(id.as_str(), "same"),
        other => panic!("expected duplicate id error, got {other}"),
    }
}

#[test]
fn malformed_json_is_reported() {
    let err = MindMap::from_json(r#"{ "id": "root" }"#).unwrap_err();
    assert!(matches!(err, ModelError::Json(_)));
}

const REORDERED: &str = include_str!("fixtures/reordered.json");

#[test]
fn export_keeps_source_key_order() {
    let map = MindMap::from_json(REORDERED).unwrap();
    assert_eq!(map.to_json_pretty().unwrap(), REORDERED.trim_end());
}

#[test]
fn reordered_fields_are_still_typed() {
    let map = MindMap::from_json(REORDERED).unwrap();
    assert_eq!(map.root().summary.as_deref(), Some("Year plan"));
    assert_eq!(map.root().extra.get("version"), Some(&serde_json::json!(2)));
    let q1 = map.find(NodeId::intern("q1")).unwrap();
    assert_eq!(q1.summary, None);
    assert_eq!(q1.child_count(), 1);
    let q2 = map.find(NodeId::intern("q2")).unwrap();
    let keys: Vec<&str> = q2.metadata.as_ref().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha"]);
}

#[test]
fn edited_fields_stay_in_place() {
    let map = MindMap::from_json(REORDERED).unwrap();
    let next = map.update(NodeId::intern("root"), &NodeUpdate::label("Plan"));
    let expected = REORDERED
        .trim_end()
        .replace(r#""label": "Roadmap""#, r#""label": "Plan""#);
    assert_eq!(next.to_json_pretty().unwrap(), expected);
}

#[test]
fn new_fields_are_appended_after_source_keys() {
    let map = MindMap::from_json(REORDERED).unwrap();
    let patch = NodeUpdate {
        summary: Some("Second half".into()),
        description: Some("Scale out.".into()),
        ..NodeUpdate::default()
    };
    let next = map.update(NodeId::intern("q2"), &patch);
    let json = next.to_json_pretty().unwrap();
    let q2 = &json[json.find(r#""id": "q2""#).unwrap()..];
    assert!(q2.starts_with(
        "\"id\": \"q2\",\n      \"summary\": \"Second half\",\n      \"description\": \"Scale out.\"\n"
    ));
}

#[test]
fn null_optional_field_is_written_back_until_set() {
    let map = MindMap::from_json(REORDERED).unwrap();
    let next = map.update(NodeId::intern("q1"), &NodeUpdate {
        summary: Some("Kickoff".into()),
        ..NodeUpdate::default()
    });
    let json = next.to_json_pretty().unwrap();
    assert!(json.contains(r#""summary": "Kickoff""#));
    assert!(!json.contains(r#""summary": null"#));
    let q1_start = json.find(r#""id": "q1""#).unwrap();
    let color = json[q1_start..].find("color").unwrap();
    let summary = json[q1_start..].find("Kickoff").unwrap();
    assert!(color < summary);
}
