//! The schema front end.
//!
//! Reads the declaration subset of a TypeScript file: namespaces, interfaces,
//! type aliases and enums with constant initializers. Everything else is
//! skipped at statement granularity.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::SourceFile;
pub use error::ParseError;
pub use parser::parse;
