use std::fmt;

use crate::report::model::{Status, ValidationReport, ValidationResult};

/// How much of a report to print. Never affects what was computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything, including OK results.
    Verbose,
}

impl Verbosity {
    fn shows(self, r: &ValidationResult) -> bool {
        match self {
            Verbosity::Quiet => r.status() == Status::Error,
            Verbosity::Normal => r.status() != Status::Ok,
            Verbosity::Verbose => true,
        }
    }
}

fn icon(status: Status) -> &'static str {
    match status {
        Status::Ok => "✓",
        Status::Warning => "⚠",
        Status::Error => "✗",
    }
}

/// Write the visible results of `report` followed by a summary block.
pub fn write_report<W: fmt::Write>(
    w: &mut W,
    report: &ValidationReport,
    verbosity: Verbosity,
) -> fmt::Result {
    for r in report.results().iter().filter(|r| verbosity.shows(r)) {
        match &r.field {
            Some(field) => writeln!(w, "  {} {}: {}", icon(r.status()), field, r.message)?,
            None => writeln!(w, "  {} {}", icon(r.status()), r.message)?,
        }
        if let Some(s) = &r.suggestion {
            writeln!(w, "    → {s}")?;
        }
    }

    let passed = report
        .results()
        .iter()
        .filter(|r| r.status() == Status::Ok)
        .count();
    writeln!(w)?;
    writeln!(w, "  ✓ Passed: {passed}")?;
    writeln!(w, "  ⚠ Warnings: {}", report.total_warnings())?;
    writeln!(w, "  ✗ Errors: {}", report.total_errors())?;
    writeln!(w)?;

    if !report.is_valid() {
        writeln!(
            w,
            "  Result: FAILED - fix {} error(s) before rendering",
            report.total_errors()
        )
    } else if report.total_warnings() > 0 {
        writeln!(
            w,
            "  Result: PASSED with {} warning(s)",
            report.total_warnings()
        )
    } else {
        writeln!(w, "  Result: PASSED - ready to render")
    }
}

pub fn render_report(report: &ValidationReport, verbosity: Verbosity) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report, verbosity);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/report/text.rs"]
mod tests;
