//! The classified node kinds.

use std::fmt;

use compact_str::CompactString;

use super::index::SymbolId;

/// A node kind together with the shape of its factory functions.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNodeKind {
    /// Name of the kind enum member.
    pub name: CompactString,
    /// Value of the kind enum member, `None` if not constant.
    pub value: Option<f64>,
    /// The interface or type alias declaring the shape.
    pub declaring_symbol: SymbolId,
    pub declaring_type: CompactString,
    /// Included fields in emission order.
    pub members: Vec<FieldDescriptor>,
    /// Whether any member is a child.
    pub has_children: bool,
    /// Number of leading non-optional members, counted in declaration order.
    pub min_argument_count: usize,
}

/// A field of a node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: CompactString,
    /// Source text of the declared type.
    pub type_text: String,
    pub is_optional: bool,
    pub class: FieldClass,
    /// Passed to the constructor, but not compared by the updater.
    pub is_factory_only: bool,
}

impl FieldDescriptor {
    /// Name of the generated parameter. `arguments` is reserved in functions.
    pub fn param_name(&self) -> &str {
        if self.name == "arguments" {
            "_arguments"
        } else {
            &self.name
        }
    }
}

/// Classification of a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    Plain,
    Node,
    NodeArray,
    ModifiersArray,
}

impl FieldClass {
    pub fn is_child(self) -> bool {
        self != FieldClass::Plain
    }
}

impl fmt::Display for FieldClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldClass::Plain => "plain",
            FieldClass::Node => "node",
            FieldClass::NodeArray => "node array",
            FieldClass::ModifiersArray => "modifiers array",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for SyntaxNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{} = {}", self.name, value)?,
            None => write!(f, "{}", self.name)?,
        }
        writeln!(
            f,
            " ({}, min arguments {})",
            self.declaring_type, self.min_argument_count
        )?;
        for member in &self.members {
            write!(
                f,
                "    {}{}: {} [{}",
                member.name,
                if member.is_optional { "?" } else { "" },
                member.type_text,
                member.class,
            )?;
            if member.is_factory_only {
                write!(f, ", factory only")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
