//! Lint for generic parameters nothing refers to.

use super::super::{Diagnostic, Lint, LintContext};

/// Warns about `$macro` parameters that no field, supertype or alias body
/// mentions. Such a parameter only splits the cache.
pub struct UnusedParameterLint;

impl Lint for UnusedParameterLint {
    fn name(&self) -> &'static str {
        "unused-parameter"
    }

    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for def in cx.registry.iter().filter(|d| d.is_generic()) {
            // another parameter's default does not count
            let used: Vec<&str> = def
                .shape_expressions()
                .into_iter()
                .flat_map(|expr| expr.referenced_names())
                .collect();

            for param in &def.params {
                if !used.contains(&param.name.as_str()) {
                    diagnostics.push(
                        Diagnostic::warning(
                            self.name(),
                            format!("parameter '{}' of '{}' is never used", param.name, def.name),
                        )
                        .at(&def.name),
                    );
                }
            }
        }
    }
}
