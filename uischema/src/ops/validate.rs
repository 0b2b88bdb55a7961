//! Validate operation - check one value against a type expression.

use std::path::Path;

use uischema_engine::{Engine, Result};
use uischema_ir::{TypeExpression, Value};

use crate::reports::ValidateReport;

/// Execute the validate operation.
///
/// Rejected data is a report, not an error; errors mean the target type
/// itself cannot be resolved or the value is not tree-shaped.
pub fn validate(
    engine: &Engine,
    target: &TypeExpression,
    value: &Value,
    source: &Path,
) -> Result<ValidateReport> {
    let result = engine.validate(value, target)?;
    tracing::debug!(target = %target, valid = result.is_valid(), "validated value");

    Ok(ValidateReport {
        source: source.to_path_buf(),
        target: target.to_string(),
        result,
    })
}
