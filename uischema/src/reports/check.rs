//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from catalogue checking.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Catalogue files, in registration order.
    pub catalogues: Vec<PathBuf>,
    /// Registered types, prelude included.
    pub types: usize,
    /// Resolution errors.
    pub errors: Vec<String>,
    /// Warning-level lint findings.
    pub warnings: Vec<String>,
    /// Info-level lint findings.
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        let files = self
            .catalogues
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if self.is_valid() {
            out.preformatted(&format!("✓ {} types in {} resolve", self.types, files));
        } else {
            out.preformatted(&format!(
                "✗ {} error{} in {}",
                self.errors.len(),
                if self.errors.len() == 1 { "" } else { "s" },
                files
            ));
        }
    }
}
