//! Lint for type names without a namespace.

use uischema_catalogue::PRELUDE_NAME;

use super::super::{Diagnostic, Lint, LintContext};

pub struct UnqualifiedNameLint;

impl Lint for UnqualifiedNameLint {
    fn name(&self) -> &'static str {
        "unqualified-name"
    }

    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for def in cx.registry.iter() {
            if def.name.contains('.') || cx.registry.catalogue_of(&def.name) == Some(PRELUDE_NAME) {
                continue;
            }
            diagnostics.push(
                Diagnostic::info(
                    self.name(),
                    format!("type '{}' has no namespace and may clash with the prelude", def.name),
                )
                .at(&def.name),
            );
        }
    }
}
