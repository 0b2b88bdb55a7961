//! Core operations.
//!
//! This module contains the work behind each subcommand, separated from
//! argument parsing and output rendering.

pub mod check;
pub mod explain;
pub mod validate;

pub use check::check;
pub use explain::explain;
pub use validate::validate;
