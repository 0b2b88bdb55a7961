//! Registry, composer and validator for uischema widget catalogues.
//!
//! ```text
//! Catalogue → Registry::register_all → Engine
//!                                        ├─ resolve_widget / resolve_struct   (memoized)
//!                                        ├─ validate                          (collects failures)
//!                                        ├─ field_annotations
//!                                        └─ check_all / lint
//! ```
//!
//! Registration parses every expression once; after that the registry is
//! frozen and shared. Resolution composes supertypes and substitutes generic
//! arguments, caching each default-filled instantiation.
//!
//! ```
//! use uischema_catalogue::Catalogue;
//! use uischema_engine::{Engine, EngineConfig};
//! use uischema_ir::Value;
//!
//! let catalogue: Catalogue = r#"
//!     [types."UI.Widget"]
//!     hidden = "Flag"
//!     status = "Text?"
//! "#.parse().unwrap();
//!
//! let engine = Engine::load(&[catalogue], EngineConfig::default()).unwrap();
//! let widget = engine.resolve_struct("UI.Widget", &[]).unwrap();
//! let value = Value::map([("status", Value::from("ready"))]);
//! assert!(engine.validate(&value, &*widget).unwrap().is_valid());
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod compose;
mod engine;
mod error;
pub mod lint;
mod registry;
pub mod validate;

pub use compose::{CacheStats, Composer};
pub use engine::{Engine, EngineConfig};
pub use error::{Error, Result};
pub use lint::{Diagnostic, Severity};
pub use registry::Registry;
pub use validate::{Failure, FieldPath, Reason, Target, ValidationResult};
