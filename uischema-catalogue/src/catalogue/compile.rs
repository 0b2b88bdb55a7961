//! Turning raw definitions into parsed [`TypeDefinition`]s.

use indexmap::IndexMap;
use uischema_ir::{DefinitionBody, FieldDef, GenericParameter, TypeDefinition, TypeExpression};

use super::{EMPTY_STRUCT, MACRO_KEY, RawDefinition, RawEntry, SUPER_KEY, TYPE_KEY};
use crate::{Error, Result, extract_annotations, parse};

impl RawDefinition {
    /// Parse every expression of this definition.
    ///
    /// A syntax error anywhere fails the whole definition; nothing is
    /// returned for a partially valid table.
    pub fn compile(&self, name: &str) -> Result<TypeDefinition> {
        match self {
            RawDefinition::Expr(raw) if raw.trim() == EMPTY_STRUCT => {
                Ok(TypeDefinition::structure(name, IndexMap::new()))
            }
            RawDefinition::Expr(raw) => {
                let expr = parse(raw).map_err(|e| Error::expression(name, e))?;
                Ok(TypeDefinition::alias(name, expr))
            }
            RawDefinition::Table(entries) => compile_table(name, entries),
        }
    }
}

fn compile_table(name: &str, entries: &IndexMap<String, RawEntry>) -> Result<TypeDefinition> {
    let mut params = Vec::new();
    let mut supertype = None;
    let mut alias = None;
    let mut fields = IndexMap::new();

    for (key, entry) in entries {
        let location = format!("{}.{}", name, key);
        match (key.as_str(), entry) {
            (MACRO_KEY, RawEntry::List(raw_params)) => {
                params = compile_params(name, raw_params)?;
            }
            (MACRO_KEY, RawEntry::Text(raw)) => {
                params = compile_params(name, std::slice::from_ref(raw))?;
            }
            (SUPER_KEY, RawEntry::Text(raw)) => {
                let expr = parse(raw).map_err(|e| Error::expression(&location, e))?;
                check_supertype(name, &expr)?;
                supertype = Some(expr);
            }
            (TYPE_KEY, RawEntry::Text(raw)) => {
                alias = Some(parse(raw).map_err(|e| Error::expression(&location, e))?);
            }
            (SUPER_KEY | TYPE_KEY, RawEntry::List(_)) => {
                return Err(Error::definition(name, format!("'{}' must be a string", key)));
            }
            (directive, _) if directive.starts_with('$') => {
                return Err(Error::definition(
                    name,
                    format!("unknown directive '{}'", directive),
                ));
            }
            (field, RawEntry::Text(raw)) => {
                let (ty, annotations) =
                    extract_annotations(raw).map_err(|e| Error::expression(&location, e))?;
                fields.insert(field.to_string(), FieldDef { ty, annotations });
            }
            (field, RawEntry::List(_)) => {
                return Err(Error::definition(
                    name,
                    format!("field '{}' must be a type string", field),
                ));
            }
        }
    }

    let body = match alias {
        Some(_) if !fields.is_empty() || supertype.is_some() => {
            return Err(Error::definition(
                name,
                format!("'{}' cannot be combined with fields or '{}'", TYPE_KEY, SUPER_KEY),
            ));
        }
        Some(expr) => DefinitionBody::Alias(expr),
        None => DefinitionBody::Struct(fields),
    };

    Ok(TypeDefinition {
        name: name.to_string(),
        params,
        supertype,
        body,
    })
}

/// Parse `NAME` or `NAME=DEFAULT` entries.
fn compile_params(name: &str, raw_params: &[String]) -> Result<Vec<GenericParameter>> {
    let mut params: Vec<GenericParameter> = Vec::with_capacity(raw_params.len());
    for raw in raw_params {
        let (param, default) = match raw.split_once('=') {
            Some((param, default)) => (param.trim(), Some(default)),
            None => (raw.trim(), None),
        };

        if !is_param_name(param) {
            return Err(Error::definition(
                name,
                format!("invalid generic parameter '{}'", raw),
            ));
        }
        if params.iter().any(|p| p.name == param) {
            return Err(Error::definition(
                name,
                format!("duplicate generic parameter '{}'", param),
            ));
        }

        let default = default
            .map(|d| parse(d).map_err(|e| Error::expression(format!("{}.{}.{}", name, MACRO_KEY, param), e)))
            .transpose()?;
        params.push(GenericParameter::new(param, default));
    }
    Ok(params)
}

fn is_param_name(param: &str) -> bool {
    let mut chars = param.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Supertypes must be names, generic applications, or intersections of those.
fn check_supertype(name: &str, expr: &TypeExpression) -> Result<()> {
    let valid = match expr {
        TypeExpression::Intersection(members) => members.iter().all(|m| m.head_name().is_some()),
        other => other.head_name().is_some(),
    };
    if valid {
        Ok(())
    } else {
        Err(Box::new(Error::InvalidSupertype {
            name: name.to_string(),
            expr: expr.to_string(),
        }))
    }
}
