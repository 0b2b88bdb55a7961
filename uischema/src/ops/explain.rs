//! Explain operation - flattened view of one widget type.

use uischema_engine::{Engine, Result};
use uischema_ir::{Resolved, TypeExpression};

use crate::reports::{ExplainReport, FieldInfo, Shape};

/// Execute the explain operation for `name` applied to `args`.
pub fn explain(engine: &Engine, name: &str, args: &[TypeExpression]) -> Result<ExplainReport> {
    let resolved = engine.resolve_widget(name, args)?;

    let shape = match &*resolved {
        Resolved::Struct(schema) => Shape::Struct {
            instance: schema.name.clone(),
            lineage: schema.lineage.iter().cloned().collect(),
            fields: schema
                .fields
                .iter()
                .map(|(field, resolved)| FieldInfo {
                    name: field.clone(),
                    ty: resolved.ty.to_string(),
                    origin: resolved.origin.clone(),
                    annotations: resolved.annotations.to_string(),
                })
                .collect(),
        },
        Resolved::Alias(expr) => Shape::Alias {
            expands_to: expr.to_string(),
        },
    };

    Ok(ExplainReport {
        target: name.to_string(),
        catalogue: engine.registry().catalogue_of(name).map(str::to_string),
        shape,
        cache: engine.cache_stats(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uischema_engine::Error;

    use super::*;
    use crate::ops::test_support::{OMA_UI, STD_UI, engine};

    #[test]
    fn test_struct_lists_fields_with_origins() {
        let engine = engine(OMA_UI);
        let report = explain(&engine, "UI.Frame", &[]).expect("explain");

        let Shape::Struct {
            instance, fields, ..
        } = &report.shape
        else {
            panic!("UI.Frame should be a struct");
        };
        assert_eq!(instance, "UI.Frame");
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0].name, "hidden");
        assert_eq!(fields[0].origin, "UI.Widget");
        assert_eq!(report.catalogue.as_deref(), Some("Pub.Oma.UI.Types"));
    }

    #[test]
    fn test_alias_shows_expansion() {
        let engine = engine(STD_UI);
        let report = explain(&engine, "UI.Size", &[]).expect("explain");
        assert!(matches!(report.shape, Shape::Alias { .. }));
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let engine = engine(STD_UI);
        let err = explain(&engine, "UI.Nowhere", &[]).unwrap_err();
        assert!(matches!(*err, Error::UnknownType { .. }));
    }
}
