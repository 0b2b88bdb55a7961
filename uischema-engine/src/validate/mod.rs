//! Structural validation of runtime values.

mod path;

use std::{fmt, sync::Arc};

use indexmap::IndexSet;
use serde::Serialize;
use uischema_ir::{Primitive, Resolved, ResolvedSchema, SharedValue, TypeExpression, Value};

use crate::{Error, Result, compose::Composer};

pub use path::{FieldPath, Segment};

/// What a value is checked against.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Schema(&'a ResolvedSchema),
    Expr(&'a TypeExpression),
}

impl<'a> From<&'a ResolvedSchema> for Target<'a> {
    fn from(schema: &'a ResolvedSchema) -> Self {
        Target::Schema(schema)
    }
}

impl<'a> From<&'a TypeExpression> for Target<'a> {
    fn from(expr: &'a TypeExpression) -> Self {
        Target::Expr(expr)
    }
}

impl<'a> From<&'a Arc<ResolvedSchema>> for Target<'a> {
    fn from(schema: &'a Arc<ResolvedSchema>) -> Self {
        Target::Schema(schema)
    }
}

impl<'a> From<&'a Resolved> for Target<'a> {
    fn from(resolved: &'a Resolved) -> Self {
        match resolved {
            Resolved::Struct(schema) => Target::Schema(schema),
            Resolved::Alias(expr) => Target::Expr(expr),
        }
    }
}

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    /// A required value is absent.
    Missing { expected: String },
    /// The runtime kind does not match.
    Kind { expected: String, found: String },
    /// A string that is not a member of the literal set.
    NotInSet { found: String, allowed: String },
    /// A value where the type only admits absence.
    NotAbsent { found: String },
    /// No union branch accepts the value.
    NoBranch { found: String, branches: Vec<String> },
    /// Aliases that expand forever without consuming the value.
    Unproductive { name: String },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Missing { expected } => write!(f, "missing required value of type {}", expected),
            Reason::Kind { expected, found } => write!(f, "expected {}, found {}", expected, found),
            Reason::NotInSet { found, allowed } => write!(f, "{} is not one of {}", found, allowed),
            Reason::NotAbsent { found } => write!(f, "expected no value, found {}", found),
            Reason::NoBranch { found, branches } => {
                write!(f, "{} matches none of: {}", found, branches.join(", "))
            }
            Reason::Unproductive { name } => {
                write!(f, "type '{}' never reaches a concrete shape", name)
            }
        }
    }
}

/// A rejected value and where it sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: FieldPath,
    pub reason: Reason,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Outcome of validating one value. Never an error: rejected data is data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "failures", rename_all = "lowercase")]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<Failure>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Failures in discovery order; empty when valid.
    pub fn failures(&self) -> &[Failure] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(failures) => failures,
        }
    }
}

/// Validate `value` against `target`, collecting every reachable failure.
///
/// Errors are reserved for problems with the schema (unknown or
/// uncomposable types) and for values that contain themselves.
pub fn validate(
    composer: &Composer,
    max_depth: usize,
    value: &Value,
    target: Target<'_>,
) -> Result<ValidationResult> {
    let mut validator = Validator::new(composer, max_depth);
    match target {
        Target::Schema(schema) => validator.check_struct(Some(value), schema)?,
        Target::Expr(expr) => validator.check(Some(value), expr)?,
    }
    tracing::trace!(failures = validator.failures.len(), "validated value");

    if validator.failures.is_empty() {
        Ok(ValidationResult::Valid)
    } else {
        Ok(ValidationResult::Invalid(validator.failures))
    }
}

struct Validator<'c> {
    composer: &'c Composer,
    max_depth: usize,
    path: FieldPath,
    failures: Vec<Failure>,
    /// Shared nodes entered so far in this pass, in entry order.
    visited: IndexSet<usize>,
    /// Named types expanded so far, with the address of the value they
    /// were expanded for.
    expanding: Vec<(String, usize)>,
}

impl<'c> Validator<'c> {
    fn new(composer: &'c Composer, max_depth: usize) -> Self {
        Self {
            composer,
            max_depth,
            path: FieldPath::root(),
            failures: Vec::new(),
            visited: IndexSet::new(),
            expanding: Vec::new(),
        }
    }

    fn fail(&mut self, reason: Reason) {
        self.failures.push(Failure {
            path: self.path.clone(),
            reason,
        });
    }

    /// Descend into a shared node, refusing one already entered in this
    /// pass. Values must be tree-shaped, so this catches both cycles and
    /// nodes shared between two parents.
    fn enter(
        &mut self,
        node: &SharedValue,
        check: impl FnOnce(&mut Self, Option<&Value>) -> Result<()>,
    ) -> Result<()> {
        if !self.visited.insert(node.id()) {
            return Err(Box::new(Error::CyclicValue {
                path: self.path.to_string(),
            }));
        }
        check(self, node.get())
    }

    fn check(&mut self, value: Option<&Value>, expr: &TypeExpression) -> Result<()> {
        let value = match value {
            Some(Value::Shared(node)) => {
                return self.enter(node, |this, inner| this.check(inner, expr));
            }
            Some(Value::Null) | None => None,
            present => present,
        };

        match expr {
            // absence is checked before anything is dereferenced
            TypeExpression::Optional(inner) => match value {
                None => Ok(()),
                Some(_) => self.check(value, inner),
            },
            TypeExpression::Primitive(Primitive::None) => {
                if let Some(found) = value {
                    self.fail(Reason::NotAbsent {
                        found: describe(Some(found)),
                    });
                }
                Ok(())
            }
            TypeExpression::Union(branches) => self.check_union(value, branches),
            TypeExpression::Reference(name) => self.check_named(value, expr, name, &[]),
            TypeExpression::Generic(name, args) => self.check_named(value, expr, name, args),
            TypeExpression::Intersection(members) => {
                let schema = self.composer.compose(members)?;
                self.check_struct(value, &schema)
            }
            _ => {
                let Some(value) = value else {
                    self.fail(Reason::Missing {
                        expected: expr.to_string(),
                    });
                    return Ok(());
                };
                self.check_present(value, expr)
            }
        }
    }

    fn check_present(&mut self, value: &Value, expr: &TypeExpression) -> Result<()> {
        match (expr, value) {
            (TypeExpression::Primitive(Primitive::Number), Value::Number(_))
            | (TypeExpression::Primitive(Primitive::String), Value::String(_))
            | (TypeExpression::Primitive(Primitive::Boolean), Value::Bool(_)) => {}
            (TypeExpression::Primitive(p), _) => self.fail(Reason::Kind {
                expected: p.to_string(),
                found: value.kind_name().to_string(),
            }),
            (TypeExpression::Literal(literal), _) => {
                if value.as_str() != Some(literal.as_str()) {
                    self.fail(Reason::NotInSet {
                        found: describe(Some(value)),
                        allowed: expr.to_string(),
                    });
                }
            }
            (TypeExpression::EnumSet(set), _) => {
                if !value.as_str().is_some_and(|s| set.contains(s)) {
                    self.fail(Reason::NotInSet {
                        found: describe(Some(value)),
                        allowed: set.to_string(),
                    });
                }
            }
            (TypeExpression::Sequence(inner), Value::List(items)) => {
                for (index, item) in items.iter().enumerate() {
                    self.path.push(Segment::Index(index));
                    let result = self.check(Some(item), inner);
                    self.path.pop();
                    result?;
                }
            }
            (TypeExpression::Mapping(inner), Value::Map(entries)) => {
                for (key, item) in entries {
                    self.path.push(Segment::Key(key.clone()));
                    let result = self.check(Some(item), inner);
                    self.path.pop();
                    result?;
                }
            }
            (TypeExpression::Sequence(_), _) => self.fail(Reason::Kind {
                expected: "list".to_string(),
                found: value.kind_name().to_string(),
            }),
            (TypeExpression::Mapping(_), _) => self.fail(Reason::Kind {
                expected: "map".to_string(),
                found: value.kind_name().to_string(),
            }),
            // handled by `check` before a value is required
            (
                TypeExpression::Optional(_)
                | TypeExpression::Union(_)
                | TypeExpression::Intersection(_)
                | TypeExpression::Reference(_)
                | TypeExpression::Generic(..),
                _,
            ) => {}
        }
        Ok(())
    }

    fn check_union(&mut self, value: Option<&Value>, branches: &[TypeExpression]) -> Result<()> {
        let mark = self.failures.len();
        // a rejected branch leaves no trace, so the next may revisit its nodes
        let seen = self.visited.len();
        for branch in branches {
            self.check(value, branch)?;
            if self.failures.len() == mark {
                return Ok(());
            }
            self.failures.truncate(mark);
            self.visited.truncate(seen);
        }
        self.fail(Reason::NoBranch {
            found: describe(value),
            branches: branches.iter().map(ToString::to_string).collect(),
        });
        Ok(())
    }

    fn check_named(
        &mut self,
        value: Option<&Value>,
        expr: &TypeExpression,
        name: &str,
        args: &[TypeExpression],
    ) -> Result<()> {
        let address = value.map_or(0, |v| v as *const Value as usize);
        let head = expr.to_string();

        // expansions for this same value sit at the top of the stack
        let unconsumed = self
            .expanding
            .iter()
            .rev()
            .take_while(|(_, a)| *a == address)
            .collect::<Vec<_>>();
        if unconsumed.len() >= self.max_depth || unconsumed.iter().any(|(h, _)| *h == head) {
            self.fail(Reason::Unproductive { name: head });
            return Ok(());
        }

        let resolved = self.composer.resolve(name, args)?;
        self.expanding.push((head, address));
        let result = match &*resolved {
            Resolved::Struct(schema) => self.check_struct(value, schema),
            Resolved::Alias(target) => self.check(value, target),
        };
        self.expanding.pop();
        result
    }

    fn check_struct(&mut self, value: Option<&Value>, schema: &ResolvedSchema) -> Result<()> {
        match value {
            Some(Value::Shared(node)) => {
                self.enter(node, |this, inner| this.check_struct(inner, schema))
            }
            None | Some(Value::Null) => {
                self.fail(Reason::Missing {
                    expected: schema.name.clone(),
                });
                Ok(())
            }
            Some(Value::Map(entries)) => {
                // unknown entries are ignored
                for (name, field) in &schema.fields {
                    self.path.push(Segment::Field(name.clone()));
                    let result = self.check(entries.get(name), &field.ty);
                    self.path.pop();
                    result?;
                }
                Ok(())
            }
            Some(other) => {
                self.fail(Reason::Kind {
                    expected: schema.name.clone(),
                    found: other.kind_name().to_string(),
                });
                Ok(())
            }
        }
    }
}

/// Render a value for a failure message.
fn describe(value: Option<&Value>) -> String {
    match value {
        None => "nothing".to_string(),
        Some(Value::String(s)) => format!("{:?}", s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.kind_name().to_string(),
    }
}
