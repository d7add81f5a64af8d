//! Pre-render validation for JSON video templates.
//!
//! A template document is checked by three independent passes: [`StructuralValidator`] (shape,
//! required keys, placeholder coverage), [`FieldValidator`] (closed vocabularies) and
//! [`FileChecker`] (local media files). [`Pipeline`] runs them together and merges their
//! [`ValidationReport`]s.
#![forbid(unsafe_code)]

mod document;
mod foundation;
mod pipeline;
mod report;
pub mod rules;
mod validate;

pub use document::path::{FieldPath, PathElem};
pub use document::shape::{ClipRef, DocumentShape, Normalized};
pub use document::value::{Map, Value, Visitor, walk};
pub use foundation::config::{CONFIG_FILE_NAMES, DEFAULT_PARALLEL_THRESHOLD, ValidationConfig};
pub use foundation::error::{ClipcheckError, ClipcheckResult};
pub use pipeline::{Pipeline, run_checks};
pub use report::model::{Level, Status, ValidationReport, ValidationResult};
pub use report::text::{Verbosity, render_report, write_report};
pub use validate::Validator;
pub use validate::fields::FieldValidator;
pub use validate::files::{CONTENT_DIR_NAME, FileChecker, Outcome, Probe};
pub use validate::structural::StructuralValidator;
