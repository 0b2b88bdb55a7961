//! Lint for fields typed `none`.

use uischema_ir::{Primitive, TypeExpression};

use super::super::{Diagnostic, Lint, LintContext};
use crate::compose::Bindings;

/// Reports fields typed `none`: an info when the field retracts an
/// inherited one, a warning when there is nothing to retract.
pub struct FieldRetractionLint;

impl Lint for FieldRetractionLint {
    fn name(&self) -> &'static str {
        "field-retraction"
    }

    fn check(&self, cx: &LintContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for def in cx.registry.iter() {
            let retracted: Vec<&str> = def
                .fields()
                .filter(|(_, field)| field.ty == TypeExpression::Primitive(Primitive::None))
                .map(|(name, _)| name)
                .collect();
            if retracted.is_empty() {
                continue;
            }

            // composition failures belong to `check_all`, not to this lint
            let inherited = def.supertype.as_ref().and_then(|supertype| {
                let bindings = Bindings::bind(def, &[]).ok()?;
                let members = match bindings.substitute(supertype) {
                    TypeExpression::Intersection(members) => members,
                    single => vec![single],
                };
                cx.composer.compose(&members).ok()
            });

            for field in retracted {
                let location = format!("{}.{}", def.name, field);
                let origin = inherited
                    .as_ref()
                    .and_then(|schema| schema.field(field))
                    .map(|f| f.origin.as_str());
                let diagnostic = match origin {
                    Some(origin) => Diagnostic::info(
                        self.name(),
                        format!("'{}' retracts field '{}' inherited from '{}'", def.name, field, origin),
                    ),
                    None => Diagnostic::warning(
                        self.name(),
                        format!("field '{}' is typed none but '{}' inherits no such field", field, def.name),
                    ),
                };
                diagnostics.push(diagnostic.at(location));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use uischema_catalogue::{Catalogue, RawDefinition};

    use super::*;
    use crate::lint::Severity;
    use crate::lint::lints::test_support::run_lint;

    #[test]
    fn test_retraction_of_inherited_field() {
        let catalogue = Catalogue::named("test")
            .define(
                "UI.Container",
                RawDefinition::table([("unchained", "Flag"), ("widgets", "[UI.Container]")]),
            )
            .define(
                "UI.Layout",
                RawDefinition::table([("$super", "UI.Container"), ("unchained", "none")]),
            );

        let diagnostics = run_lint(&FieldRetractionLint, catalogue);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Info);
        assert_eq!(
            diagnostics[0].message,
            "'UI.Layout' retracts field 'unchained' inherited from 'UI.Container'"
        );
        assert_eq!(diagnostics[0].location.as_deref(), Some("UI.Layout.unchained"));
    }

    #[test]
    fn test_retraction_without_inheritance() {
        let catalogue = Catalogue::named("test")
            .define("UI.Lonely", RawDefinition::table([("focus", "none")]));

        let diagnostics = run_lint(&FieldRetractionLint, catalogue);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
    }
}
