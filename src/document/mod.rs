//! Untyped template tree, paths into it, and layout detection.

pub(crate) mod path;
pub(crate) mod shape;
pub(crate) mod value;
