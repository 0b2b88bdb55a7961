//! Type expression grammar.

mod lexer;
mod parser;

pub use parser::parse;
