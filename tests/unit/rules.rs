use super::*;

#[test]
fn names_match_ignoring_case() {
    assert!(TRANSITIONS.accepts("fade"));
    assert!(TRANSITIONS.accepts("SLIDELEFT"));
    assert!(TRANSITIONS.accepts("slideLeftFast"));
    assert!(!TRANSITIONS.accepts("bogus"));
    assert!(EFFECTS.accepts("kenburns"));
    assert!(FILTERS.accepts("Greyscale"));
    assert!(!FILTERS.accepts("sepia"));
}

#[test]
fn aspect_ratios_match_exactly() {
    assert_eq!(ASPECT_RATIOS.values.len(), 5);
    assert!(ASPECT_RATIOS.accepts("9:16"));
    assert!(!ASPECT_RATIOS.accepts("9:16 "));
    assert!(!ASPECT_RATIOS.accepts("16/9"));
}

#[test]
fn vocabularies_are_sorted_for_suggestions() {
    for vocab in [&TRANSITIONS, &EFFECTS, &FILTERS, &ASSET_TYPES] {
        let lowered: Vec<String> = vocab.values.iter().map(|v| v.to_lowercase()).collect();
        let mut sorted = lowered.clone();
        sorted.sort();
        assert_eq!(lowered, sorted, "{} not sorted", vocab.name);
    }
    assert_eq!(EFFECTS.suggestion(), "Use one of: kenBurns, zoomIn, zoomOut");
}

#[test]
fn summary_lists_every_vocabulary() {
    let summary = valid_values_summary();
    assert_eq!(summary.len(), 5);
    assert_eq!(summary["transitions"].len(), 24);
    assert_eq!(summary["filters"].len(), 7);
}

#[test]
fn placeholders_are_extracted_in_order() {
    let found: Vec<&str> = placeholders("{{intro.mp4}} and {{ title }} then {{}}").collect();
    assert_eq!(found, vec!["intro.mp4", " title "]);
}

#[test]
fn malformed_placeholders_are_detected() {
    for bad in ["{{field", "field}}", "{field}", "{{}}", "{{a}} {b"] {
        assert!(has_malformed_placeholder(bad), "{bad}");
    }
    for good in ["{{field}}", "plain.mp4", "{{a}}/{{b}}"] {
        assert!(!has_malformed_placeholder(good), "{good}");
    }
}

#[test]
fn sole_placeholder_requires_the_whole_string() {
    assert_eq!(sole_placeholder("{{video.mp4}}"), Some("video.mp4"));
    assert_eq!(sole_placeholder("{{res/video.mp4}}"), Some("res/video.mp4"));
    assert_eq!(sole_placeholder("x{{video.mp4}}"), None);
    assert_eq!(sole_placeholder("video.mp4"), None);
}

#[test]
fn placeholder_message_shows_literal_braces() {
    assert_eq!(
        messages::invalid_placeholder("{x}"),
        "Invalid placeholder syntax: '{x}'. Use format: {{field}}"
    );
}

#[test]
fn remote_detection_is_syntactic() {
    for s in [
        "http://host/a.mp4",
        "s3://bucket/key",
        "https://cdn.example.com:{{port}}/a.mp4",
        "https://cdn.example.com:99999/a.mp4",
        "http://exa mple.com/a.mp4",
        "git+ssh://host/repo",
    ] {
        assert!(is_remote(s), "{s}");
    }
    for s in [
        "C://media/a.mp4",
        "C:/media/a.mp4",
        "media/a.mp4",
        "/abs/a.mp4",
        "1http://x",
        "file:/a",
    ] {
        assert!(!is_remote(s), "{s}");
    }
}
