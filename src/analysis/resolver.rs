//! Resolution of the well-known declarations.

use log::warn;

use crate::config::WellKnownNames;

use super::{
    index::SymbolId,
    semantic::{DeclKind, Semantic},
};

/// Symbols of the well-known declarations, `None` when not declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WellKnown {
    /// The base node interface.
    pub node: Option<SymbolId>,
    /// The node array interface.
    pub node_array: Option<SymbolId>,
    /// The modifiers array interface.
    pub modifiers_array: Option<SymbolId>,
    /// The declaration marker interface.
    pub declaration: Option<SymbolId>,
    /// The node kind enum.
    pub kind_enum: Option<SymbolId>,
}

/// Finds the well-known interfaces and the kind enum by name.
///
/// Declarations are visited in source order, including those nested in
/// namespaces, and the last match of a name wins.
pub fn resolve_well_known(semantic: &Semantic<'_>, names: &WellKnownNames) -> WellKnown {
    let mut well_known = WellKnown::default();
    for decl in &semantic.decls {
        let symbol_id = Some(decl.symbol_id);
        match decl.kind {
            DeclKind::Interface(interface) => {
                let name = interface.name.name.as_str();
                if name == names.node {
                    well_known.node = symbol_id;
                } else if name == names.node_array {
                    well_known.node_array = symbol_id;
                } else if name == names.modifiers_array {
                    well_known.modifiers_array = symbol_id;
                } else if name == names.declaration {
                    well_known.declaration = symbol_id;
                }
            }
            DeclKind::Enum(decl) if decl.name.name == names.kind_enum => {
                well_known.kind_enum = symbol_id;
            }
            _ => (),
        }
    }

    for (found, name) in [
        (well_known.node, &names.node),
        (well_known.node_array, &names.node_array),
        (well_known.modifiers_array, &names.modifiers_array),
        (well_known.declaration, &names.declaration),
    ] {
        if found.is_none() {
            warn!("well-known interface `{name}` not found");
        }
    }
    well_known
}
