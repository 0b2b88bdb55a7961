//! Built-in catalogue lints.

mod field_retraction;
mod unqualified_name;
mod unused_parameter;

pub use field_retraction::FieldRetractionLint;
pub use unqualified_name::UnqualifiedNameLint;
pub use unused_parameter::UnusedParameterLint;
