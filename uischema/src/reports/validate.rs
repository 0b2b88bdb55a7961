//! Validate command report data structures.

use std::path::PathBuf;

use serde::Serialize;
use uischema_engine::ValidationResult;

use super::output::{Output, Report};

/// Report data from validating one value.
#[derive(Debug, Serialize)]
pub struct ValidateReport {
    /// Where the value was read from (`-` for stdin).
    pub source: PathBuf,
    /// Display form of the target expression.
    pub target: String,
    pub result: ValidationResult,
}

impl ValidateReport {
    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }
}

impl Report for ValidateReport {
    fn render(&self, out: &mut dyn Output) {
        let failures = self.result.failures();
        if failures.is_empty() {
            out.preformatted(&format!(
                "✓ {} is a valid {}",
                self.source.display(),
                self.target
            ));
            return;
        }

        for failure in failures {
            out.warning(&format!("error: {}", failure));
        }
        out.newline();
        out.preformatted(&format!(
            "✗ {} is not a valid {} ({} failure{})",
            self.source.display(),
            self.target,
            failures.len(),
            if failures.len() == 1 { "" } else { "s" }
        ));
    }
}
