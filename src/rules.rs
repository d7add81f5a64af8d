//! Closed vocabularies, the placeholder pattern, and message templates.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// A closed set of accepted values for one template field.
#[derive(Debug)]
pub struct Vocabulary {
    /// Plural noun used in summaries, e.g. `transitions`.
    pub name: &'static str,
    /// Canonical spellings, sorted case-insensitively.
    pub values: &'static [&'static str],
    /// Ratio tokens compare exactly; names compare ignoring ASCII case.
    pub case_sensitive: bool,
}

impl Vocabulary {
    pub fn accepts(&self, value: &str) -> bool {
        if self.case_sensitive {
            self.values.contains(&value)
        } else {
            self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
        }
    }

    /// Comma-separated list of every accepted value.
    pub fn options(&self) -> String {
        self.values.join(", ")
    }

    pub fn suggestion(&self) -> String {
        format!("Use one of: {}", self.options())
    }
}

pub static TRANSITIONS: Vocabulary = Vocabulary {
    name: "transitions",
    values: &[
        "carouselLeft",
        "carouselRight",
        "carouselUpFast",
        "fade",
        "fadeFast",
        "fadeSlow",
        "reveal",
        "revealFast",
        "revealSlow",
        "shuffleLeftBottom",
        "shuffleTopRight",
        "slideDown",
        "slideLeft",
        "slideLeftFast",
        "slideRight",
        "slideRightFast",
        "slideUp",
        "wipeLeft",
        "wipeLeftFast",
        "wipeRight",
        "wipeRightFast",
        "zoom",
        "zoomFast",
        "zoomSlow",
    ],
    case_sensitive: false,
};

pub static EFFECTS: Vocabulary = Vocabulary {
    name: "effects",
    values: &["kenBurns", "zoomIn", "zoomOut"],
    case_sensitive: false,
};

pub static FILTERS: Vocabulary = Vocabulary {
    name: "filters",
    values: &[
        "boost",
        "contrast",
        "darken",
        "greyscale",
        "lighten",
        "muted",
        "negative",
    ],
    case_sensitive: false,
};

pub static ASPECT_RATIOS: Vocabulary = Vocabulary {
    name: "aspect_ratios",
    values: &["16:9", "1:1", "4:3", "4:5", "9:16"],
    case_sensitive: true,
};

pub static ASSET_TYPES: Vocabulary = Vocabulary {
    name: "asset_types",
    values: &["audio", "html", "image", "text", "title", "video"],
    case_sensitive: false,
};

/// Asset types whose `src` must name a media file.
pub const MEDIA_ASSET_TYPES: [&str; 3] = ["video", "image", "audio"];

/// Every vocabulary, keyed by its name.
pub fn valid_values_summary() -> BTreeMap<&'static str, &'static [&'static str]> {
    [&TRANSITIONS, &EFFECTS, &FILTERS, &ASPECT_RATIOS, &ASSET_TYPES]
        .into_iter()
        .map(|v| (v.name, v.values))
        .collect()
}

/// `{{name}}`; the capture is the merge key.
pub static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"\{\{([^}]+)\}\}") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid placeholder regex: {err}"),
    });

/// A leading `scheme://` with a scheme of two or more characters.
static REMOTE_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]+://") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid scheme regex: {err}"),
    });

/// True for `scheme://...` references. Single-letter schemes are drive letters, and the rest of
/// the value is not parsed, so placeholders in a host or port still count as remote.
pub fn is_remote(text: &str) -> bool {
    REMOTE_SCHEME.is_match(text.trim_start())
}

/// Payloads of every well-formed placeholder in `text`, in order of appearance.
pub fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER_PATTERN
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
}

/// True when braces remain after removing every well-formed placeholder from `text`.
pub fn has_malformed_placeholder(text: &str) -> bool {
    let rest = PLACEHOLDER_PATTERN.replace_all(text, "");
    rest.contains('{') || rest.contains('}')
}

/// The payload when `text` is exactly one placeholder and nothing else.
pub fn sole_placeholder(text: &str) -> Option<&str> {
    let caps = PLACEHOLDER_PATTERN.captures(text)?;
    let whole = caps.get(0)?;
    if whole.start() == 0 && whole.end() == text.len() {
        caps.get(1).map(|m| m.as_str())
    } else {
        None
    }
}

pub mod messages {
    pub fn missing_required_field(field: &str) -> String {
        format!("Missing required field: '{field}'")
    }

    pub fn invalid_value(kind: &str, value: &str, options: &str) -> String {
        format!("Invalid {kind}: '{value}'. Valid options: {options}")
    }

    pub fn file_not_found(path: &str) -> String {
        format!("Media file not found: '{path}'")
    }

    pub fn file_not_accessible(path: &str, reason: &str) -> String {
        format!("Media file not accessible: '{path}' ({reason})")
    }

    pub fn file_accessible(path: &str) -> String {
        format!("File accessible: '{path}'")
    }

    pub fn invalid_json(error: &str) -> String {
        format!("Invalid JSON syntax: {error}")
    }

    pub fn invalid_placeholder(value: &str) -> String {
        format!("Invalid placeholder syntax: '{value}'. Use format: {{{{field}}}}")
    }

    pub fn placeholder_no_merge(name: &str) -> String {
        format!("No merge entry found for placeholder: '{name}'")
    }

    pub const EMPTY_TEMPLATE: &str = "Template cannot be empty";
    pub const EMPTY_MERGE: &str = "Merge array cannot be empty";
}

#[cfg(test)]
#[path = "../tests/unit/rules.rs"]
mod tests;
