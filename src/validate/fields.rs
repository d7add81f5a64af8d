use std::collections::BTreeMap;

use crate::document::path::FieldPath;
use crate::document::shape::Normalized;
use crate::document::value::{Map, Value};
use crate::report::model::{ValidationReport, ValidationResult};
use crate::rules::{
    self, ASPECT_RATIOS, ASSET_TYPES, EFFECTS, FILTERS, TRANSITIONS, Vocabulary, messages,
};
use crate::validate::Validator;

/// Value checks against the closed vocabularies in [`crate::rules`].
///
/// Wrong JSON types are always errors. Out-of-vocabulary strings are warnings, or errors when
/// `strict_mode` is set.
#[derive(Clone, Debug, Default)]
pub struct FieldValidator {
    strict_mode: bool,
}

impl FieldValidator {
    pub fn new(strict_mode: bool) -> Self {
        Self { strict_mode }
    }

    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Every accepted value, keyed by vocabulary name.
    pub fn valid_values_summary(&self) -> BTreeMap<&'static str, &'static [&'static str]> {
        rules::valid_values_summary()
    }

    /// Check one `output.aspectRatio` value.
    pub fn validate_aspect_ratio(
        &self,
        value: &Value,
        path: &FieldPath,
    ) -> Option<ValidationResult> {
        self.check_term(value, path, &ASPECT_RATIOS, "aspect ratio")
    }

    fn check_term(
        &self,
        value: &Value,
        path: &FieldPath,
        vocab: &Vocabulary,
        kind: &str,
    ) -> Option<ValidationResult> {
        let Some(s) = value.as_str() else {
            return Some(
                ValidationResult::error(format!("{} value must be a string", capitalize(kind)))
                    .at(path),
            );
        };
        if vocab.accepts(s) {
            return None;
        }
        Some(
            ValidationResult::flagged(
                self.strict_mode,
                messages::invalid_value(kind, s, &vocab.options()),
            )
            .at(path)
            .with_suggestion(vocab.suggestion()),
        )
    }

    fn check_clip(&self, clip: &Map, path: &FieldPath, out: &mut Vec<ValidationResult>) {
        if let Some(transition) = clip.get("transition") {
            let t_path = path.field("transition");
            if transition.as_object().is_none() {
                out.push(ValidationResult::error("Transition must be an object").at(&t_path));
            } else {
                for side in ["in", "out"] {
                    let Some(v) = transition.get(side).filter(|v| v.is_truthy()) else {
                        continue;
                    };
                    let side_path = t_path.field(side);
                    out.extend(self.check_term(v, &side_path, &TRANSITIONS, "transition"));
                }
            }
        }

        // Only null and "" mean unset; any other non-string is a type error.
        for (key, vocab) in [("effect", &EFFECTS), ("filter", &FILTERS)] {
            if let Some(v) = clip
                .get(key)
                .filter(|v| !v.is_null() && v.as_str() != Some(""))
            {
                out.extend(self.check_term(v, &path.field(key), vocab, key));
            }
        }

        if let Some(kind) = clip.get("asset").and_then(|a| a.get("type")) {
            let type_path = path.field("asset").field("type");
            out.extend(self.check_term(kind, &type_path, &ASSET_TYPES, "asset type"));
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Validator for FieldValidator {
    fn name(&self) -> &'static str {
        "fields"
    }

    #[tracing::instrument(skip_all, fields(strict = self.strict_mode))]
    fn validate(&self, doc: &Value) -> ValidationReport {
        let mut out = Vec::new();
        let Some(norm) = Normalized::new(doc) else {
            return ValidationReport::from_results(out);
        };

        let clips = norm.clips();
        for clip in &clips {
            self.check_clip(clip.clip, &clip.path, &mut out);
        }

        if let Some(ratio) = norm.output.and_then(|o| o.get("aspectRatio")) {
            let ratio_path = FieldPath::of(&["output", "aspectRatio"]);
            out.extend(self.validate_aspect_ratio(ratio, &ratio_path));
        }

        let report = ValidationReport::from_results(out);
        tracing::debug!(
            clips = clips.len(),
            errors = report.total_errors(),
            warnings = report.total_warnings(),
            "field validation finished"
        );
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/fields.rs"]
mod tests;
