//! The three independent validator passes.
//!
//! Each pass takes the whole document read-only and returns its own [`ValidationReport`]. Passes
//! never short-circuit on a defect: the point is to surface everything in one run.

use crate::document::value::Value;
use crate::report::model::ValidationReport;

pub(crate) mod fields;
pub(crate) mod files;
pub(crate) mod structural;

/// One validation pass over a template document.
pub trait Validator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Inspect `doc` and report every defect found.
    fn validate(&self, doc: &Value) -> ValidationReport;
}
