//! Rendering of the factory source file.

pub mod factory;
pub mod writer;

pub use factory::emit_factory;
pub use writer::TextWriter;
