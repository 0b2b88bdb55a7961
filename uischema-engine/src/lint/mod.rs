//! Catalogue lints.

mod diagnostic;
pub mod lints;

pub use diagnostic::{Diagnostic, Severity};
pub use lints::{FieldRetractionLint, UnqualifiedNameLint, UnusedParameterLint};

use crate::{Registry, compose::Composer};

/// What a lint may look at.
pub struct LintContext<'a> {
    pub registry: &'a Registry,
    pub composer: &'a Composer,
}

/// A check that reports findings without failing the build.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// Check the catalogue and add any diagnostics.
    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>);
}

/// The built-in lints, in run order.
pub fn builtin() -> Vec<Box<dyn Lint>> {
    vec![
        Box::new(UnusedParameterLint),
        Box::new(FieldRetractionLint),
        Box::new(UnqualifiedNameLint),
    ]
}

/// Run the built-in lints. Warnings come before infos; otherwise lint order
/// and catalogue order are kept.
pub fn run(registry: &Registry, composer: &Composer) -> Vec<Diagnostic> {
    let cx = LintContext { registry, composer };
    let mut diagnostics = Vec::new();
    for lint in builtin() {
        lint.check(&cx, &mut diagnostics);
        tracing::trace!(lint = lint.name(), total = diagnostics.len(), "lint finished");
    }
    diagnostics.sort_by_key(|d| d.severity);
    diagnostics
}
