//! Console rendering of a [`RunReport`].
//!
//! ```text
//! 1 of 3 file(s) failed validation
//!
//! profiles/web.yaml
//!   - spec.replicas "three" is not of type "integer"
//!   - .spec.colour is not a thing
//! ```

use std::fmt;

use colored::Colorize;
use profcheck_schema::{format_violation, FileResult, Outcome};

use crate::run::RunReport;

/// Render the summary line followed by details for every failing file.
pub fn render_report(report: &RunReport) -> String {
    report.to_string()
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            let summary = format!("All {} file(s) are valid", self.total());
            return writeln!(f, "{}", summary.green());
        }

        let summary = format!("{} of {} file(s) failed validation", self.failed(), self.total());
        writeln!(f, "{}", summary.red())?;

        for failure in self.failures() {
            writeln!(f)?;
            write_failure(f, failure)?;
        }
        Ok(())
    }
}

fn write_failure(f: &mut fmt::Formatter<'_>, failure: &FileResult) -> fmt::Result {
    writeln!(f, "{}", failure.filename.bold())?;
    match &failure.outcome {
        Outcome::ReadError(reason) | Outcome::ParseError(reason) => {
            for line in reason.lines() {
                writeln!(f, "  {line}")?;
            }
        }
        Outcome::SchemaErrors(violations) => {
            for violation in violations {
                writeln!(f, "  - {}", format_violation(violation))?;
            }
        }
        Outcome::Valid => {}
    }
    Ok(())
}
