//! Parsing for uischema catalogues.
//!
//! This crate turns text into IR: the compact type-expression grammar, the
//! `@key=value` annotation tags trailing field types, and the catalogue table
//! format hosts use to ship their widget types.
//!
//! ```text
//! "UI.Decorator(W)+UI.Sizeable"  →  parse()               →  TypeExpression
//! "number? @data=both"           →  extract_annotations()  →  (TypeExpression, AnnotationSet)
//! catalogue.toml                 →  Catalogue              →  RawDefinition::compile() → TypeDefinition
//! ```
//!
//! Nothing here consults a registry: unknown names parse fine and are only
//! reported when the engine composes them.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod annotation;
mod catalogue;
mod error;
mod expr;

pub use annotation::extract_annotations;
pub use catalogue::{
    Catalogue, CatalogueMeta, EMPTY_STRUCT, MACRO_KEY, PRELUDE_NAME, RawDefinition, RawEntry,
    SUPER_KEY, TYPE_KEY, parse_catalogue,
};
pub use error::{Error, Result, SourceContext, SyntaxError};
pub use expr::parse;
