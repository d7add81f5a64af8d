use serde_json::json;

use super::*;

#[test]
fn template_key_means_wrapped() {
    let doc = Value::from(json!({"template": {}, "timeline": {}}));
    let n = Normalized::new(&doc).unwrap();
    assert_eq!(n.shape, DocumentShape::TemplateWrapped);
    assert!(n.timeline.is_none());
}

#[test]
fn bare_timeline_means_flat() {
    let doc = Value::from(json!({"timeline": {"tracks": []}, "output": {}}));
    let n = Normalized::new(&doc).unwrap();
    assert_eq!(n.shape, DocumentShape::Flat);
    assert!(n.template.is_none());
    assert!(n.timeline.is_some());
    assert_eq!(n.shape.required_keys(), ["timeline", "output", "merge"]);
    assert_eq!(n.shape.timeline_path().to_string(), "timeline");
}

#[test]
fn neither_key_defaults_to_wrapped() {
    let doc = Value::from(json!({"output": {}}));
    let n = Normalized::new(&doc).unwrap();
    assert_eq!(n.shape, DocumentShape::TemplateWrapped);
    assert!(n.scope().is_none());
}

#[test]
fn non_object_root_does_not_normalize() {
    assert!(Normalized::new(&Value::from(json!([1, 2]))).is_none());
}

#[test]
fn clips_skip_malformed_links() {
    let doc = Value::from(json!({"template": {"timeline": {"tracks": [
        {"clips": [{"asset": {}}, 7, {"start": 0}]},
        "not a track",
        {"clips": "nope"},
        {"clips": [{"length": 1}]}
    ]}}}));
    let n = Normalized::new(&doc).unwrap();
    let paths: Vec<String> = n.clips().iter().map(|c| c.path.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "template.timeline.tracks[0].clips[0]",
            "template.timeline.tracks[0].clips[2]",
            "template.timeline.tracks[3].clips[0]",
        ]
    );
}
