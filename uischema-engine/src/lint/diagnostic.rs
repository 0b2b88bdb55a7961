//! Non-fatal findings about a catalogue.

use std::fmt;

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

impl Severity {
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A finding produced by one lint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the lint that produced this diagnostic.
    pub lint: &'static str,
    pub message: String,
    /// Definition or field the finding is about (e.g. `UI.Frame.subject`).
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn warning(lint: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            lint,
            message: message.into(),
            location: None,
        }
    }

    pub fn info(lint: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            lint,
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.lint, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (at {})", location)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let diag = Diagnostic::warning("unused-parameter", "parameter 'W' is never used")
            .at("UI.Frame");
        assert_eq!(
            diag.to_string(),
            "warning[unused-parameter]: parameter 'W' is never used (at UI.Frame)"
        );
        assert!(diag.severity.is_warning());
    }

    #[test]
    fn test_warnings_sort_first() {
        assert!(Severity::Warning < Severity::Info);
    }
}
