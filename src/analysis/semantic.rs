//! The semantic information of a schema.

use compact_str::CompactString;
use index_vec::IndexVec;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use text_size::TextRange;

use crate::schema::ast::{
    EntityName, EnumDecl, EnumMember, InterfaceDecl, NamespaceDecl, TypeAliasDecl,
};

use super::index::{DeclId, SymbolId};

/// Name to symbol bindings of a scope.
pub type SymbolTable = IndexMap<CompactString, SymbolId, FxBuildHasher>;

/// Semantic information of a schema.
///
/// [`Semantic`] contains the results of binding a schema, including the
/// [symbol] table and the [declaration] list in source order. It borrows the
/// AST it was built from.
///
/// [symbol]: Symbol
/// [declaration]: Declaration
#[derive(Debug, Clone)]
pub struct Semantic<'a> {
    /// The source text.
    pub source: &'a str,
    pub symbols: IndexVec<SymbolId, Symbol>,
    /// Every declaration, in source order.
    pub decls: IndexVec<DeclId, Declaration<'a>>,
    /// Bindings of the file scope.
    pub globals: SymbolTable,
}

impl<'a> Semantic<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            symbols: IndexVec::new(),
            decls: IndexVec::new(),
            globals: SymbolTable::default(),
        }
    }

    /// The source text of `range`.
    pub fn text(&self, range: TextRange) -> &'a str {
        &self.source[range]
    }

    /// The bindings of `scope`, the file scope when `None`.
    pub fn table(&self, scope: Option<SymbolId>) -> &SymbolTable {
        match scope {
            Some(symbol_id) => &self.symbols[symbol_id].exports,
            None => &self.globals,
        }
    }

    /// Looks `name` up in `scope`, then in each enclosing scope up to the file scope.
    pub fn lookup(&self, mut scope: Option<SymbolId>, name: &str) -> Option<SymbolId> {
        loop {
            if let Some(symbol_id) = self.table(scope).get(name) {
                return Some(*symbol_id);
            }
            scope = self.symbols[scope?].parent;
        }
    }

    /// Resolves a possibly qualified name from `scope`.
    ///
    /// The first part is looked up through the scope chain, the rest through
    /// the members of the previous part.
    pub fn resolve_entity_name(
        &self,
        scope: Option<SymbolId>,
        name: &EntityName,
    ) -> Option<SymbolId> {
        let (first, rest) = name.parts.split_first()?;
        let mut symbol_id = self.lookup(scope, &first.name)?;
        for part in rest {
            symbol_id = *self.symbols[symbol_id].exports.get(&part.name)?;
        }
        Some(symbol_id)
    }
}

/// The semantic information of a symbol.
///
/// Declarations with the same name in the same scope share one symbol.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// The name of the symbol.
    pub name: CompactString,
    /// The kind of symbol, decided by its first declaration.
    pub kind: SymbolKind,
    /// Declarations merged into the symbol, in source order.
    pub declarations: Vec<DeclId>,
    /// The namespace or enum it belongs in, `None` for the file scope.
    pub parent: Option<SymbolId>,
    /// Members of a namespace or an enum.
    pub exports: SymbolTable,
    /// Constant value of an enum member.
    pub value: Option<f64>,
}

/// The kind of symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Interface,
    TypeAlias,
    Enum,
    EnumMember,
}

/// A declaration bound to a symbol.
#[derive(Debug, Clone)]
pub struct Declaration<'a> {
    pub kind: DeclKind<'a>,
    /// The symbol it declares.
    pub symbol_id: SymbolId,
    /// The namespace or enum it is declared in, `None` for the file scope.
    pub scope: Option<SymbolId>,
    /// Leading comment ranges.
    pub comments: &'a [TextRange],
}

/// The kind of declaration.
#[derive(Debug, Clone, Copy)]
pub enum DeclKind<'a> {
    Namespace(&'a NamespaceDecl),
    Interface(&'a InterfaceDecl),
    TypeAlias(&'a TypeAliasDecl),
    Enum(&'a EnumDecl),
    EnumMember(&'a EnumMember),
}

impl DeclKind<'_> {
    pub fn symbol_kind(self) -> SymbolKind {
        match self {
            DeclKind::Namespace(_) => SymbolKind::Namespace,
            DeclKind::Interface(_) => SymbolKind::Interface,
            DeclKind::TypeAlias(_) => SymbolKind::TypeAlias,
            DeclKind::Enum(_) => SymbolKind::Enum,
            DeclKind::EnumMember(_) => SymbolKind::EnumMember,
        }
    }
}
