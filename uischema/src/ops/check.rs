//! Check operation - catalogue resolution and lints.

use std::path::PathBuf;

use uischema_engine::{Engine, Error, Severity};

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Resolves every definition, then runs the lints. Resolution errors are
/// reported individually rather than stopping at the first.
pub fn check(engine: &Engine, catalogues: &[PathBuf]) -> CheckReport {
    let mut errors = Vec::new();
    if let Err(e) = engine.check_all() {
        match *e {
            Error::Build { errors: inner, .. } => {
                errors.extend(inner.iter().map(ToString::to_string))
            }
            other => errors.push(other.to_string()),
        }
    }

    let mut warnings = Vec::new();
    let mut infos = Vec::new();
    for diag in engine.lint() {
        let msg = match &diag.location {
            Some(loc) => format!("[{}] {}\n  --> {}", diag.lint, diag.message, loc),
            None => format!("[{}] {}", diag.lint, diag.message),
        };
        match diag.severity {
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    tracing::debug!(
        errors = errors.len(),
        warnings = warnings.len(),
        infos = infos.len(),
        "check finished"
    );

    CheckReport {
        catalogues: catalogues.to_vec(),
        types: engine.registry().len(),
        errors,
        warnings,
        infos,
    }
}
