//! Node factory generator.
//!
//! Reads the AST declarations of a TypeScript compiler (`types.ts`) and
//! generates a `create<Kind>` and an `update<Kind>` function for every
//! syntax kind annotated with `@kind(SyntaxKind.<Kind>)`.
//!
//! ```txt
//!        +--------+              +----------+
//! str -> | schema | - AST ---->  | analysis | - Vec<SyntaxNodeKind> -+
//!        +--------+              +----------+                       |
//!                                                                   v
//!                                                              +------+
//!                                                   String <-  | emit |
//!                                                              +------+
//! ```
//!
//! # Examples
//!
//! ```rust
//! use factorygen::Config;
//! let input = r#"
//! const enum SyntaxKind { Identifier, Block }
//! interface Node { kind: SyntaxKind; }
//! interface NodeArray<T> { length: number; }
//! interface ModifiersArray extends NodeArray<Node> { flags: number; }
//! interface Declaration extends Node { name?: Identifier; }
//! // @kind(SyntaxKind.Identifier)
//! interface Identifier extends Node { text: string; }
//! // @kind(SyntaxKind.Block)
//! interface Block extends Node { statements: NodeArray<Node>; }
//! "#;
//! let output = factorygen::generate(input, &Config::default()).unwrap();
//! assert!(output.contains("export function createBlock(statements?: NodeArray<Node>): Block {"));
//! ```

// Pedantic warnings
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines, clippy::must_use_candidate)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]

pub mod analysis;
pub mod config;
pub mod emit;
pub mod errors;
pub mod schema;
pub mod utils;

use log::info;

pub use analysis::SyntaxNodeKind;
pub use config::Config;
pub use errors::GenerateError;

/// Parses and analyzes a schema, returning its node kinds sorted by value.
pub fn analyze(input: &str, config: &Config) -> Result<Vec<SyntaxNodeKind>, GenerateError> {
    let (file, errors) = schema::parse(input);
    if !errors.is_empty() {
        return Err(GenerateError::Parse(errors));
    }
    let semantic = analysis::bind(input, &file);
    let well_known = analysis::resolve_well_known(&semantic, &config.well_known);
    let Some(kind_enum) = well_known.kind_enum else {
        return Err(GenerateError::MissingKindEnum {
            name: config.well_known.kind_enum.clone(),
        });
    };
    let kinds = analysis::extract_kinds(&semantic, well_known, kind_enum, config)?;
    info!(
        "found {} node kinds in {} declarations",
        kinds.len(),
        semantic.decls.len()
    );
    Ok(kinds)
}

/// Generates the factory source file for a schema.
pub fn generate(input: &str, config: &Config) -> Result<String, GenerateError> {
    let kinds = analyze(input, config)?;
    Ok(emit::emit_factory(&kinds, config))
}
