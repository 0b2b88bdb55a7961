//! Generic parameter bindings.

use indexmap::IndexMap;
use uischema_ir::{TypeDefinition, TypeExpression};

use crate::{Error, Result};

/// Parameter name to bound expression, for one instantiation.
///
/// Bindings never leak between instantiations: a nested application gets its
/// arguments substituted by the caller and then binds its own parameters from
/// scratch, so two definitions may both call their parameter `W`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    bound: IndexMap<String, TypeExpression>,
}

impl Bindings {
    /// Bind `args` positionally to the parameters of `def`, filling the rest
    /// from defaults. Defaults may mention earlier parameters.
    pub fn bind(def: &TypeDefinition, args: &[TypeExpression]) -> Result<Self> {
        let arity = || {
            Box::new(Error::Arity {
                name: def.name.clone(),
                expected: def.params.len(),
                supplied: args.len(),
            })
        };
        if args.len() > def.params.len() {
            return Err(arity());
        }

        let mut bindings = Self::default();
        for (i, param) in def.params.iter().enumerate() {
            let bound = match (args.get(i), &param.default) {
                (Some(arg), _) => arg.clone(),
                (None, Some(default)) => bindings.substitute(default),
                // a parameter without a default must be supplied
                (None, None) => return Err(arity()),
            };
            bindings.bound.insert(param.name.clone(), bound);
        }
        Ok(bindings)
    }

    /// The complete argument list, in parameter order.
    pub fn args(&self) -> Vec<TypeExpression> {
        self.bound.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Replace every `Reference(param)` with its bound expression.
    pub fn substitute(&self, expr: &TypeExpression) -> TypeExpression {
        if self.is_empty() {
            return expr.clone();
        }
        match expr {
            TypeExpression::Reference(name) => match self.bound.get(name) {
                Some(bound) => bound.clone(),
                None => expr.clone(),
            },
            TypeExpression::Generic(name, args) => {
                TypeExpression::Generic(name.clone(), self.substitute_all(args))
            }
            TypeExpression::Union(members) => TypeExpression::Union(self.substitute_all(members)),
            TypeExpression::Intersection(members) => {
                TypeExpression::Intersection(self.substitute_all(members))
            }
            TypeExpression::Optional(inner) => TypeExpression::optional(self.substitute(inner)),
            TypeExpression::Sequence(inner) => TypeExpression::sequence(self.substitute(inner)),
            TypeExpression::Mapping(inner) => TypeExpression::mapping(self.substitute(inner)),
            TypeExpression::Primitive(_)
            | TypeExpression::Literal(_)
            | TypeExpression::EnumSet(_) => expr.clone(),
        }
    }

    fn substitute_all(&self, exprs: &[TypeExpression]) -> Vec<TypeExpression> {
        exprs.iter().map(|e| self.substitute(e)).collect()
    }
}
