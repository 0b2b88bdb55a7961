//! Intermediate representation types for uischema.
//!
//! This crate holds the data that flows between the catalogue parser, the
//! composition engine and the host applications that render or synchronize
//! widgets. Nothing here parses text or consults a registry.
//!
//! # Architecture
//!
//! ```text
//! catalogue (TOML) → uischema-catalogue (parsing) → uischema-ir (types) → uischema-engine
//! ```
//!
//! The IR types are designed to be:
//! - Immutable once built (expressions compare structurally)
//! - Cheap to share across threads (`Send + Sync`, no interior mutability
//!   except the late-bound [`SharedValue`] node)
//! - Independent of the catalogue file format

mod annotation;
mod definition;
mod expr;
mod schema;
mod value;

pub use annotation::{AnnotationSet, DataFlow, DelayPolicy, EventDirection};
pub use definition::{DefinitionBody, FieldDef, GenericParameter, TypeDefinition};
pub use expr::{LiteralSet, Primitive, TypeExpression};
pub use schema::{InstanceKey, Resolved, ResolvedField, ResolvedSchema};
pub use value::{SharedValue, Value};
