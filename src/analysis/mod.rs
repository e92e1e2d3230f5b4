//! The analysis of a parsed schema.
//!
//! ```txt
//!        +--------+              +----------+
//! AST -> | binder | - Semantic -> | resolver | - WellKnown --+
//!        +--------+              +----------+               |
//!                                                           v
//!               +-------------------------------------------------+
//!               | extractor                                       |
//!               |   checker: properties of declared types         |
//!               |   classifier, oracle: the fields of each kind   |
//!               +-------------------------------------------------+
//!                                       |
//!                                       v
//!                              Vec<SyntaxNodeKind>
//! ```

pub mod binder;
pub mod checker;
pub mod classifier;
pub mod extractor;
pub mod index;
pub mod model;
pub mod oracle;
pub mod resolver;
pub mod semantic;

pub use binder::bind;
pub use extractor::extract_kinds;
pub use model::{FieldClass, FieldDescriptor, SyntaxNodeKind};
pub use resolver::{resolve_well_known, WellKnown};
pub use semantic::Semantic;
