use std::path::{Path, PathBuf};

use crate::document::value::Value;
use crate::foundation::config::ValidationConfig;
use crate::foundation::error::ClipcheckResult;
use crate::report::model::ValidationReport;
use crate::validate::Validator;
use crate::validate::fields::FieldValidator;
use crate::validate::files::FileChecker;
use crate::validate::structural::{self, StructuralValidator};

/// The structural, field and file passes configured from one [`ValidationConfig`].
///
/// Every pass runs on every document; their reports are merged in that order.
#[derive(Debug)]
pub struct Pipeline {
    structural: StructuralValidator,
    fields: FieldValidator,
    files: Option<FileChecker>,
}

impl Pipeline {
    /// `script_path` anchors relative media paths; see [`FileChecker::base_dir`].
    pub fn from_config(
        config: &ValidationConfig,
        script_path: Option<PathBuf>,
    ) -> ClipcheckResult<Self> {
        let files = if config.skip_file_validation {
            None
        } else {
            Some(FileChecker::from_config(config, script_path)?)
        };
        Ok(Self {
            structural: StructuralValidator::new(config.strict_mode),
            fields: FieldValidator::new(config.strict_mode),
            files,
        })
    }

    pub fn file_checker(&self) -> Option<&FileChecker> {
        self.files.as_ref()
    }

    /// The passes in execution order.
    pub fn validators(&self) -> Vec<&dyn Validator> {
        let mut out: Vec<&dyn Validator> = vec![&self.structural, &self.fields];
        if let Some(files) = &self.files {
            out.push(files);
        }
        out
    }

    #[tracing::instrument(skip_all)]
    pub fn run(&self, doc: &Value) -> ValidationReport {
        let reports = self.validators().into_iter().map(|v| {
            let report = v.validate(doc);
            tracing::debug!(
                validator = v.name(),
                results = report.results().len(),
                "pass finished"
            );
            report
        });
        ValidationReport::merge(reports)
    }

    /// Load `path` and run every pass. A file that cannot be read or parsed yields a report
    /// with a single error.
    pub fn run_file(&self, path: impl AsRef<Path>) -> ValidationReport {
        let path = path.as_ref();
        match Value::from_path(path) {
            Ok(doc) => self.run(&doc),
            Err(e) => structural::load_failure(path, &e),
        }
    }
}

/// Run every pass configured by `config` over `doc`, resolving media paths against the current
/// directory.
pub fn run_checks(doc: &Value, config: &ValidationConfig) -> ClipcheckResult<ValidationReport> {
    Ok(Pipeline::from_config(config, None)?.run(doc))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
