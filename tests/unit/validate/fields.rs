use serde_json::json;

use super::*;
use crate::report::model::{Level, Status};

fn with_clip(clip: serde_json::Value) -> Value {
    Value::from(json!({
        "template": {"timeline": {"tracks": [{"clips": [clip]}]}},
        "output": {"format": "mp4", "aspectRatio": "16:9"},
        "merge": []
    }))
}

fn base_clip() -> serde_json::Value {
    json!({
        "asset": {"type": "video", "src": "clip.mp4"},
        "start": 0,
        "length": 3
    })
}

#[test]
fn known_values_pass() {
    let mut clip = base_clip();
    clip["transition"] = json!({"in": "fade", "out": "slideLeftFast"});
    clip["effect"] = json!("kenBurns");
    clip["filter"] = json!("greyscale");
    let report = FieldValidator::new(true).validate(&with_clip(clip));
    assert!(report.results().is_empty(), "{:?}", report.results());
}

#[test]
fn unknown_transition_is_a_warning_with_suggestion() {
    let mut clip = base_clip();
    clip["transition"] = json!({"in": "bogus"});
    let report = FieldValidator::new(false).validate(&with_clip(clip));

    assert!(report.is_valid());
    assert_eq!(report.total_warnings(), 1);
    let r = &report.results()[0];
    assert_eq!(r.status(), Status::Warning);
    assert_eq!(
        r.field.as_deref(),
        Some("template.timeline.tracks[0].clips[0].transition.in")
    );
    assert!(r.message.starts_with("Invalid transition: 'bogus'"));
    assert!(r.suggestion.as_deref().is_some_and(|s| s.contains("fade")));
}

#[test]
fn strict_mode_turns_vocabulary_warnings_into_errors() {
    let mut clip = base_clip();
    clip["transition"] = json!({"in": "bogus"});
    let doc = with_clip(clip);

    let lenient = FieldValidator::new(false).validate(&doc);
    let strict = FieldValidator::new(true).validate(&doc);
    assert!(!strict.is_valid());
    assert_eq!(strict.total_errors(), lenient.total_errors() + 1);
    assert_eq!(strict.total_warnings() + 1, lenient.total_warnings());
}

#[test]
fn wrong_types_are_errors_regardless_of_strict() {
    let mut clip = base_clip();
    clip["transition"] = json!("fade");
    clip["effect"] = json!(7);
    let report = FieldValidator::new(false).validate(&with_clip(clip));

    assert_eq!(report.total_errors(), 2);
    assert_eq!(report.total_warnings(), 0);
    let messages: Vec<_> = report.results().iter().map(|r| r.message.as_str()).collect();
    assert!(messages.contains(&"Transition must be an object"));
    assert!(messages.contains(&"Effect value must be a string"));

    let mut clip = base_clip();
    clip["effect"] = json!(false);
    clip["filter"] = json!(0);
    clip["transition"] = json!({"in": 5});
    let report = FieldValidator::new(false).validate(&with_clip(clip));
    let messages: Vec<_> = report.results().iter().map(|r| r.message.as_str()).collect();
    assert_eq!(report.total_errors(), 3, "{messages:?}");
    assert!(messages.contains(&"Effect value must be a string"));
    assert!(messages.contains(&"Filter value must be a string"));
    assert!(messages.contains(&"Transition value must be a string"));
}

#[test]
fn names_compare_case_insensitively() {
    let mut clip = base_clip();
    clip["transition"] = json!({"out": "FADE"});
    clip["effect"] = json!("KENBURNS");
    clip["filter"] = json!("Boost");
    let report = FieldValidator::new(true).validate(&with_clip(clip));
    assert!(report.results().is_empty(), "{:?}", report.results());
}

#[test]
fn falsy_values_are_skipped() {
    let mut clip = base_clip();
    clip["transition"] = json!({"in": "", "out": null});
    clip["effect"] = json!("");
    clip["filter"] = json!(null);
    let report = FieldValidator::new(true).validate(&with_clip(clip));
    assert!(report.results().is_empty(), "{:?}", report.results());

    let mut clip = base_clip();
    clip["transition"] = json!({"in": false, "out": 0});
    clip["effect"] = json!(null);
    clip["filter"] = json!("");
    let report = FieldValidator::new(true).validate(&with_clip(clip));
    assert!(report.results().is_empty(), "{:?}", report.results());
}

#[test]
fn aspect_ratio_is_exact_match() {
    let v = FieldValidator::new(false);
    let path = FieldPath::of(&["output", "aspectRatio"]);

    assert!(v.validate_aspect_ratio(&Value::from(json!("9:16")), &path).is_none());

    let Some(r) = v.validate_aspect_ratio(&Value::from(json!("16 : 9")), &path) else {
        panic!("spaced ratio must be rejected");
    };
    assert_eq!(r.level(), Level::Warning);
    assert_eq!(r.field.as_deref(), Some("output.aspectRatio"));

    let Some(r) = v.validate_aspect_ratio(&Value::from(json!(1.77)), &path) else {
        panic!("numeric ratio must be rejected");
    };
    assert_eq!(r.level(), Level::Error);
}

#[test]
fn output_aspect_ratio_is_checked_in_validate() {
    let doc = Value::from(json!({
        "template": {"timeline": {"tracks": []}},
        "output": {"aspectRatio": "2:1"},
        "merge": []
    }));
    let report = FieldValidator::new(true).validate(&doc);
    assert_eq!(report.total_errors(), 1);
    assert_eq!(report.results()[0].field.as_deref(), Some("output.aspectRatio"));
}

#[test]
fn unknown_asset_type_is_flagged() {
    let mut clip = base_clip();
    clip["asset"]["type"] = json!("hologram");
    let report = FieldValidator::new(false).validate(&with_clip(clip));
    assert_eq!(report.total_warnings(), 1);
    assert_eq!(
        report.results()[0].field.as_deref(),
        Some("template.timeline.tracks[0].clips[0].asset.type")
    );
}

#[test]
fn flat_documents_use_timeline_rooted_paths() {
    let doc = Value::from(json!({
        "timeline": {"tracks": [{"clips": [{"asset": {"type": "image"}, "filter": "sepia"}]}]},
        "output": {},
        "merge": []
    }));
    let report = FieldValidator::new(false).validate(&doc);
    assert_eq!(
        report.results()[0].field.as_deref(),
        Some("timeline.tracks[0].clips[0].filter")
    );
}

#[test]
fn malformed_structure_yields_no_field_findings() {
    let docs = [
        json!([1, 2]),
        json!({"template": 3}),
        json!({"template": {"timeline": {"tracks": 1}}}),
    ];
    for v in docs {
        let report = FieldValidator::new(true).validate(&Value::from(v));
        assert!(report.results().is_empty());
    }
}

#[test]
fn summary_lists_every_vocabulary() {
    let summary = FieldValidator::default().valid_values_summary();
    assert_eq!(summary.len(), 5);
    assert!(summary["effects"].contains(&"zoomIn"));
    assert!(summary["aspect_ratios"].contains(&"1:1"));
}
