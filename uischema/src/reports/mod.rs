//! Report data structures for commands.
//!
//! Commands build reports, then either render them to an [`Output`] target
//! or serialize them as JSON.

mod check;
mod explain;
mod output;
mod validate;

use eyre::{Context, Result};
use serde::Serialize;

pub use check::CheckReport;
pub use explain::{ExplainReport, FieldInfo, Shape};
pub use output::{Report, TerminalOutput};
pub use validate::ValidateReport;

/// Print a report to the terminal, or as pretty JSON on stdout.
pub fn print<R: Report + Serialize>(report: &R, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(report).wrap_err("Failed to serialize report")?;
        println!("{}", rendered);
    } else {
        report.render(&mut TerminalOutput::new());
    }
    Ok(())
}
