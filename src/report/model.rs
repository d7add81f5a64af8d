use std::fmt;

use crate::document::path::FieldPath;

/// Outcome of a single check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warning,
    Error,
}

/// Severity used for counting. Always moves together with [`Status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Error => "ERROR",
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        })
    }
}

impl From<Level> for Status {
    fn from(level: Level) -> Self {
        match level {
            Level::Info => Status::Ok,
            Level::Warning => Status::Warning,
            Level::Error => Status::Error,
        }
    }
}

/// One finding. `status` is always derived from `level`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ValidationResult {
    status: Status,
    level: Level,
    /// Dotted/bracketed location, e.g. `template.timeline.tracks[0].clips[1].start`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationResult {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            status: Status::from(level),
            level,
            field: None,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// A defect that is a warning by default and an error under strict mode.
    pub fn flagged(strict: bool, message: impl Into<String>) -> Self {
        if strict {
            Self::error(message)
        } else {
            Self::warning(message)
        }
    }

    pub fn at(mut self, field: &FieldPath) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn at_str(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == Level::Warning
    }
}

/// Results of one validator pass plus derived counts.
///
/// There is no way to add or remove results after construction; build a new report instead.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    is_valid: bool,
    total_errors: usize,
    total_warnings: usize,
    results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let total_errors = results.iter().filter(|r| r.is_error()).count();
        let total_warnings = results.iter().filter(|r| r.is_warning()).count();
        Self {
            is_valid: total_errors == 0,
            total_errors,
            total_warnings,
            results,
        }
    }

    /// Concatenate the results of several reports in argument order.
    pub fn merge<I>(reports: I) -> Self
    where
        I: IntoIterator<Item = ValidationReport>,
    {
        Self::from_results(reports.into_iter().flat_map(|r| r.results).collect())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn total_errors(&self) -> usize {
        self.total_errors
    }

    pub fn total_warnings(&self) -> usize {
        self.total_warnings
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ValidationResult> {
        self.results
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.is_warning())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/report/model.rs"]
mod tests;
