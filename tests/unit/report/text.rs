use super::*;

fn report() -> ValidationReport {
    ValidationReport::from_results(vec![
        ValidationResult::ok("File accessible: a.mp4"),
        ValidationResult::warning("Invalid filter: 'sepia'")
            .at_str("template.timeline.tracks[0].clips[0].filter")
            .with_suggestion("Use one of: boost, contrast"),
        ValidationResult::error("Missing required field: 'output'").at_str("output"),
    ])
}

#[test]
fn quiet_prints_errors_only() {
    let text = render_report(&report(), Verbosity::Quiet);
    assert!(text.contains("✗ output: Missing required field: 'output'"));
    assert!(!text.contains("sepia"));
    assert!(!text.contains("File accessible"));
}

#[test]
fn normal_adds_warnings_and_suggestions() {
    let text = render_report(&report(), Verbosity::Normal);
    assert!(text.contains("⚠ template.timeline.tracks[0].clips[0].filter: Invalid filter"));
    assert!(text.contains("→ Use one of: boost, contrast"));
    assert!(!text.contains("File accessible"));
}

#[test]
fn verbose_prints_everything() {
    let text = render_report(&report(), Verbosity::Verbose);
    assert!(text.contains("✓ File accessible: a.mp4"));
    assert!(text.contains("Passed: 1"));
    assert!(text.contains("Result: FAILED - fix 1 error(s)"));
}

#[test]
fn summary_distinguishes_clean_and_warned_passes() {
    let clean = render_report(&ValidationReport::from_results(vec![]), Verbosity::Normal);
    assert!(clean.contains("PASSED - ready to render"));

    let warned = render_report(
        &ValidationReport::from_results(vec![ValidationResult::warning("w")]),
        Verbosity::Normal,
    );
    assert!(warned.contains("PASSED with 1 warning(s)"));
}
