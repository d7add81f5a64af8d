//! Findings, reports, and their text presentation.

pub(crate) mod model;
pub(crate) mod text;
