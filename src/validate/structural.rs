use std::collections::HashSet;
use std::path::Path;

use crate::document::path::FieldPath;
use crate::document::shape::{DocumentShape, Normalized};
use crate::document::value::{Value, Visitor, walk};
use crate::foundation::error::ClipcheckError;
use crate::report::model::{ValidationReport, ValidationResult};
use crate::rules::{self, MEDIA_ASSET_TYPES, messages};
use crate::validate::Validator;

/// Shape checks: required sections, track/clip/merge layout, placeholder coverage, output types.
#[derive(Clone, Debug, Default)]
pub struct StructuralValidator {
    strict_mode: bool,
}

impl StructuralValidator {
    pub fn new(strict_mode: bool) -> Self {
        Self { strict_mode }
    }

    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Read and validate a JSON file. An unreadable or unparsable file yields a report holding a
    /// single error rather than an `Err`.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> ValidationReport {
        let path = path.as_ref();
        match Value::from_path(path) {
            Ok(doc) => self.validate(&doc),
            Err(e) => load_failure(path, &e),
        }
    }
}

/// Report for a document file that could not be loaded at all.
pub(crate) fn load_failure(path: &Path, err: &ClipcheckError) -> ValidationReport {
    let result = match err {
        ClipcheckError::Serde(e) => {
            ValidationResult::error(format!("Invalid JSON in {}: {e}", path.display()))
                .with_suggestion("Fix JSON syntax errors")
        }
        e => ValidationResult::error(format!("File not readable: {}: {e}", path.display()))
            .with_suggestion("Check the file path and permissions"),
    };
    ValidationReport::from_results(vec![result])
}

impl Validator for StructuralValidator {
    fn name(&self) -> &'static str {
        "structural"
    }

    #[tracing::instrument(skip_all, fields(strict = self.strict_mode))]
    fn validate(&self, doc: &Value) -> ValidationReport {
        let mut out = Vec::new();

        check_serializable(doc, &mut out);

        let Some(norm) = Normalized::new(doc) else {
            out.push(
                ValidationResult::error(format!(
                    "Document must be an object, found {}",
                    doc.kind()
                ))
                .with_suggestion("Provide an object with 'template', 'output' and 'merge' keys"),
            );
            return ValidationReport::from_results(out);
        };

        check_required_keys(&norm, &mut out);
        check_template(&norm, &mut out);

        let scan = scan_placeholders(&norm);
        check_merge(&norm, &scan, &mut out);
        check_placeholder_coverage(&norm, &scan, self.strict_mode, &mut out);
        check_placeholder_syntax(&scan, self.strict_mode, &mut out);

        check_output(&norm, &mut out);

        let report = ValidationReport::from_results(out);
        tracing::debug!(
            shape = ?norm.shape,
            placeholders = scan.names.len(),
            errors = report.total_errors(),
            warnings = report.total_warnings(),
            "structural validation finished"
        );
        report
    }
}

#[derive(Default)]
struct NonFinite {
    first: Option<(String, f64)>,
    count: usize,
}

impl Visitor for NonFinite {
    fn visit_number(&mut self, path: &FieldPath, value: f64) {
        if !value.is_finite() {
            self.count += 1;
            self.first.get_or_insert_with(|| (path.to_string(), value));
        }
    }
}

fn check_serializable(doc: &Value, out: &mut Vec<ValidationResult>) {
    let mut v = NonFinite::default();
    walk(doc, &mut FieldPath::root(), &mut v);
    let Some((path, value)) = v.first else {
        return;
    };

    let mut detail = format!("number {value} at '{path}' is not representable in JSON");
    if v.count > 1 {
        detail.push_str(&format!(" ({} more)", v.count - 1));
    }
    out.push(
        ValidationResult::error(messages::invalid_json(&detail))
            .at_str(path)
            .with_suggestion("Replace NaN/infinite values with finite numbers"),
    );
}

fn check_required_keys(norm: &Normalized<'_>, out: &mut Vec<ValidationResult>) {
    for key in norm.shape.required_keys() {
        if !norm.root.contains_key(key) {
            out.push(ValidationResult::error(messages::missing_required_field(key)).at_str(key));
        }
    }
}

fn check_template(norm: &Normalized<'_>, out: &mut Vec<ValidationResult>) {
    if norm.shape == DocumentShape::TemplateWrapped {
        let Some(template) = norm.template else {
            return;
        };
        if template.as_object().is_none() {
            out.push(ValidationResult::error("Template must be an object").at_str("template"));
            return;
        }
    }

    let timeline_path = norm.shape.timeline_path();
    let Some(timeline) = norm.timeline else {
        out.push(
            ValidationResult::error(messages::missing_required_field(&timeline_path.to_string()))
                .at(&timeline_path),
        );
        return;
    };
    if timeline.as_object().is_none() {
        out.push(ValidationResult::error("Timeline must be an object").at(&timeline_path));
        return;
    }

    let tracks_path = timeline_path.field("tracks");
    match timeline.get("tracks") {
        None => out.push(
            ValidationResult::error(format!(
                "{} (missing required field: '{tracks_path}')",
                messages::EMPTY_TEMPLATE
            ))
            .at(&tracks_path)
            .with_suggestion("Add at least one track with clips"),
        ),
        Some(Value::Array(tracks)) => {
            if tracks.is_empty() {
                out.push(
                    ValidationResult::error(messages::EMPTY_TEMPLATE)
                        .at(&tracks_path)
                        .with_suggestion("Add at least one track with clips"),
                );
            }
            for (i, track) in tracks.iter().enumerate() {
                check_track(track, i, &tracks_path.index(i), out);
            }
        }
        Some(_) => out.push(ValidationResult::error("Tracks must be a list").at(&tracks_path)),
    }
}

fn check_track(track: &Value, index: usize, path: &FieldPath, out: &mut Vec<ValidationResult>) {
    if track.as_object().is_none() {
        out.push(ValidationResult::error(format!("Track {index} must be an object")).at(path));
        return;
    }

    let clips_path = path.field("clips");
    match track.get("clips") {
        None => out.push(
            ValidationResult::error(format!("Track {index} missing 'clips' field"))
                .at(&clips_path),
        ),
        Some(Value::Array(clips)) => {
            for (j, clip) in clips.iter().enumerate() {
                check_clip(clip, (index, j), &clips_path.index(j), out);
            }
        }
        Some(_) => out.push(
            ValidationResult::error(format!("Track {index} clips must be a list"))
                .at(&clips_path),
        ),
    }
}

fn check_clip(
    clip: &Value,
    (track, index): (usize, usize),
    path: &FieldPath,
    out: &mut Vec<ValidationResult>,
) {
    let label = format!("Clip [{track}][{index}]");
    let Some(fields) = clip.as_object() else {
        out.push(ValidationResult::error(format!("{label} must be an object")).at(path));
        return;
    };

    match fields.get("asset") {
        None => out.push(
            ValidationResult::error(format!("{label} missing 'asset' field"))
                .at(&path.field("asset")),
        ),
        Some(asset) => check_asset(asset, &label, &path.field("asset"), out),
    }

    // Zero-length clips are accepted; only negative or non-numeric times are defects.
    for key in ["start", "length"] {
        let field_path = path.field(key);
        match fields.get(key) {
            None => out.push(
                ValidationResult::error(format!("{label} missing '{key}' field")).at(&field_path),
            ),
            Some(v) if !v.as_f64().is_some_and(|n| n.is_finite() && n >= 0.0) => out.push(
                ValidationResult::error(format!(
                    "{label} field '{key}' must be a non-negative number"
                ))
                .at(&field_path),
            ),
            Some(_) => {}
        }
    }
}

fn check_asset(asset: &Value, label: &str, path: &FieldPath, out: &mut Vec<ValidationResult>) {
    let Some(fields) = asset.as_object() else {
        out.push(ValidationResult::error(format!("{label} asset must be an object")).at(path));
        return;
    };

    let kind = fields
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_ascii_lowercase);
    let required = match kind.as_deref() {
        Some(k) if MEDIA_ASSET_TYPES.contains(&k) => "src",
        Some("text") => "text",
        _ => return,
    };

    let field_path = path.field(required);
    match fields.get(required) {
        None => out.push(
            ValidationResult::error(format!("{label} asset missing '{required}' field"))
                .at(&field_path),
        ),
        Some(Value::String(s)) if s.trim().is_empty() => out.push(
            ValidationResult::error(format!("{label} asset '{required}' cannot be empty"))
                .at(&field_path),
        ),
        Some(Value::String(_)) => {}
        Some(_) => out.push(
            ValidationResult::error(format!("{label} asset '{required}' must be a string"))
                .at(&field_path),
        ),
    }
}

/// Placeholders found in the template scope plus malformed `src` values.
#[derive(Default)]
struct PlaceholderScan {
    /// Distinct payloads, first-seen order.
    names: Vec<String>,
    seen: HashSet<String>,
    malformed: Vec<(String, String)>,
}

impl PlaceholderScan {
    fn collect(&mut self, text: &str) {
        for name in rules::placeholders(text) {
            if self.seen.insert(name.to_string()) {
                self.names.push(name.to_string());
            }
        }
    }
}

impl Visitor for PlaceholderScan {
    fn visit_key(&mut self, _path: &FieldPath, key: &str) {
        self.collect(key);
    }

    fn visit_str(&mut self, path: &FieldPath, key: Option<&str>, value: &str) {
        self.collect(value);
        if key == Some("src") && rules::has_malformed_placeholder(value) {
            self.malformed.push((path.to_string(), value.to_string()));
        }
    }
}

fn scan_placeholders(norm: &Normalized<'_>) -> PlaceholderScan {
    let mut scan = PlaceholderScan::default();
    if let Some(scope) = norm.scope() {
        walk(scope, &mut norm.shape.scope_path(), &mut scan);
    }
    scan
}

fn check_merge(norm: &Normalized<'_>, scan: &PlaceholderScan, out: &mut Vec<ValidationResult>) {
    let Some(merge) = norm.merge else {
        return;
    };
    let Some(entries) = merge.as_array() else {
        out.push(ValidationResult::error("Merge must be a list").at_str("merge"));
        return;
    };

    if entries.is_empty() && !scan.names.is_empty() {
        out.push(
            ValidationResult::error(messages::EMPTY_MERGE)
                .at_str("merge")
                .with_suggestion("Add a {\"find\", \"replace\"} entry for every placeholder"),
        );
    }

    let merge_path = FieldPath::of(&["merge"]);
    for (i, entry) in entries.iter().enumerate() {
        let entry_path = merge_path.index(i);
        let Some(fields) = entry.as_object() else {
            out.push(
                ValidationResult::error(format!("Merge entry {i} must be an object"))
                    .at(&entry_path),
            );
            continue;
        };
        for key in ["find", "replace"] {
            let field_path = entry_path.field(key);
            match fields.get(key) {
                None => out.push(
                    ValidationResult::error(format!("Merge entry {i} missing '{key}' field"))
                        .at(&field_path),
                ),
                Some(Value::String(s)) if key == "find" && s.trim().is_empty() => out.push(
                    ValidationResult::error(format!("Merge entry {i} field 'find' cannot be empty"))
                        .at(&field_path),
                ),
                Some(Value::String(_)) => {}
                Some(_) => out.push(
                    ValidationResult::error(format!(
                        "Merge entry {i} field '{key}' must be a string"
                    ))
                    .at(&field_path),
                ),
            }
        }
    }
}

fn check_placeholder_coverage(
    norm: &Normalized<'_>,
    scan: &PlaceholderScan,
    strict: bool,
    out: &mut Vec<ValidationResult>,
) {
    // A missing or non-list merge covers nothing.
    let covered: HashSet<&str> = norm
        .merge
        .and_then(Value::as_array)
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| entry.get("find").and_then(Value::as_str))
        .collect();

    for name in scan.names.iter().filter(|n| !covered.contains(n.as_str())) {
        out.push(
            ValidationResult::flagged(strict, messages::placeholder_no_merge(name))
                .at_str("merge")
                .with_suggestion(format!(
                    "Add {{\"find\": \"{name}\", \"replace\": \"...\"}} to merge"
                )),
        );
    }
}

fn check_placeholder_syntax(scan: &PlaceholderScan, strict: bool, out: &mut Vec<ValidationResult>) {
    for (path, value) in &scan.malformed {
        out.push(
            ValidationResult::flagged(strict, messages::invalid_placeholder(value))
                .at_str(path.clone()),
        );
    }
}

fn check_output(norm: &Normalized<'_>, out: &mut Vec<ValidationResult>) {
    let Some(output) = norm.output else {
        return;
    };
    if output.as_object().is_none() {
        out.push(ValidationResult::error("Output must be an object").at_str("output"));
        return;
    }

    if output.get("format").is_some_and(|f| f.as_str().is_none()) {
        out.push(
            ValidationResult::error("Output format must be a string").at_str("output.format"),
        );
    }

    if let Some(fps) = output.get("fps")
        && !fps.as_f64().is_some_and(|n| n.is_finite() && n > 0.0)
    {
        out.push(
            ValidationResult::error("Output fps must be a positive number").at_str("output.fps"),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/structural.rs"]
mod tests;
