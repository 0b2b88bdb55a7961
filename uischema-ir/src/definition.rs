//! Registered type definitions.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{AnnotationSet, TypeExpression};

/// A generic (macro) parameter of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericParameter {
    pub name: String,
    /// Bound when an application omits the argument.
    pub default: Option<TypeExpression>,
}

impl GenericParameter {
    pub fn new(name: impl Into<String>, default: Option<TypeExpression>) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}

/// A declared struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub ty: TypeExpression,
    pub annotations: AnnotationSet,
}

/// Shape of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionBody {
    /// Own fields in declaration order.
    Struct(IndexMap<String, FieldDef>),
    /// A pure expression.
    Alias(TypeExpression),
}

/// A named entry in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDefinition {
    pub name: String,
    pub params: Vec<GenericParameter>,
    /// Reference, generic application or intersection of those.
    pub supertype: Option<TypeExpression>,
    pub body: DefinitionBody,
}

impl TypeDefinition {
    /// A struct definition with no parameters or supertype.
    pub fn structure(name: impl Into<String>, fields: IndexMap<String, FieldDef>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            supertype: None,
            body: DefinitionBody::Struct(fields),
        }
    }

    /// An alias definition with no parameters.
    pub fn alias(name: impl Into<String>, expr: TypeExpression) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            supertype: None,
            body: DefinitionBody::Alias(expr),
        }
    }

    pub fn with_params(mut self, params: Vec<GenericParameter>) -> Self {
        self.params = params;
        self
    }

    pub fn with_supertype(mut self, supertype: TypeExpression) -> Self {
        self.supertype = Some(supertype);
        self
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.body, DefinitionBody::Struct(_))
    }

    pub fn is_generic(&self) -> bool {
        !self.params.is_empty()
    }

    /// Own fields; empty for aliases.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDef)> {
        let fields = match &self.body {
            DefinitionBody::Struct(fields) => Some(fields),
            DefinitionBody::Alias(_) => None,
        };
        fields
            .into_iter()
            .flat_map(|f| f.iter().map(|(name, field)| (name.as_str(), field)))
    }

    /// Expressions that shape an instance: supertype, alias body and field types.
    pub fn shape_expressions(&self) -> Vec<&TypeExpression> {
        let mut exprs: Vec<&TypeExpression> = self.supertype.iter().collect();
        match &self.body {
            DefinitionBody::Struct(fields) => exprs.extend(fields.values().map(|f| &f.ty)),
            DefinitionBody::Alias(expr) => exprs.push(expr),
        }
        exprs
    }

    /// Every expression this definition mentions, parameter defaults included.
    pub fn expressions(&self) -> Vec<&TypeExpression> {
        let mut exprs = self.shape_expressions();
        exprs.extend(self.params.iter().filter_map(|p| p.default.as_ref()));
        exprs
    }
}
