//! Resolved (composed and substituted) schemas.

use std::{fmt, sync::Arc};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::{AnnotationSet, TypeExpression};

/// A type name applied to a complete, default-filled argument list.
///
/// This is the unit of memoization: `Frame` and `Frame(UI.Widget)` produce the
/// same key when `UI.Widget` is the declared default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InstanceKey {
    pub name: String,
    pub args: Vec<TypeExpression>,
}

impl InstanceKey {
    pub fn new(name: impl Into<String>, args: Vec<TypeExpression>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return f.write_str(&self.name);
        }
        write!(f, "{}", TypeExpression::Generic(self.name.clone(), self.args.clone()))
    }
}

/// A field of a resolved schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    /// Field type with every generic parameter substituted.
    pub ty: TypeExpression,
    pub annotations: AnnotationSet,
    /// The instantiation whose own declaration supplied this field.
    pub origin: String,
}

impl ResolvedField {
    /// Returns true if both fields have the same type and annotations.
    pub fn agrees_with(&self, other: &ResolvedField) -> bool {
        self.ty == other.ty && self.annotations == other.annotations
    }
}

/// Flattened field table of a struct-shaped type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSchema {
    /// Display form of the instantiation, e.g. `UI.Frame(UI.Widget)`.
    pub name: String,
    pub fields: IndexMap<String, ResolvedField>,
    /// Every instantiation composed into this schema, including itself.
    pub lineage: IndexSet<String>,
}

impl ResolvedSchema {
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.get(name)
    }

    /// Annotations of a field, if the field exists.
    pub fn annotations(&self, field: &str) -> Option<&AnnotationSet> {
        self.fields.get(field).map(|f| &f.annotations)
    }

    /// Returns true if `instance` was composed into this schema.
    pub fn inherits(&self, instance: &str) -> bool {
        self.lineage.contains(instance)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Result of resolving a name.
///
/// Struct definitions (and aliases of intersections) yield a schema; every
/// other alias yields its substituted expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolved {
    Struct(Arc<ResolvedSchema>),
    Alias(TypeExpression),
}

impl Resolved {
    pub fn as_struct(&self) -> Option<&Arc<ResolvedSchema>> {
        match self {
            Resolved::Struct(schema) => Some(schema),
            Resolved::Alias(_) => None,
        }
    }

    pub fn as_alias(&self) -> Option<&TypeExpression> {
        match self {
            Resolved::Alias(expr) => Some(expr),
            Resolved::Struct(_) => None,
        }
    }
}
