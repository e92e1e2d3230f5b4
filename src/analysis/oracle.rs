//! The subtype oracle.
//!
//! Decides whether a declaration or a type expression is a subtype of a
//! target symbol by walking the declarations syntactically:
//!
//! - an interface is a subtype if any type of its *first* heritage clause is;
//! - a type alias is a subtype if its aliased type is;
//! - a union is a subtype if any constituent is;
//! - a type reference is a subtype if it names the target, or if the first
//!   declaration of the symbol it names is a subtype.
//!
//! Everything else is not a subtype.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    errors::GenerateError,
    schema::ast::{EntityName, Ty, TyKind},
};

use super::{
    index::{DeclId, SymbolId},
    semantic::{DeclKind, Semantic},
};

pub struct SubtypeOracle<'s, 'a> {
    semantic: &'s Semantic<'a>,
    cache: FxHashMap<(SymbolId, SymbolId), bool>,
    resolving: FxHashSet<(SymbolId, SymbolId)>,
}

impl<'s, 'a> SubtypeOracle<'s, 'a> {
    pub fn new(semantic: &'s Semantic<'a>) -> Self {
        Self {
            semantic,
            cache: FxHashMap::default(),
            resolving: FxHashSet::default(),
        }
    }

    /// Checks if the declaration is a subtype of `target`.
    /// Always `false` when the target was not found.
    pub fn is_decl_subtype_of(
        &mut self,
        decl_id: DeclId,
        target: Option<SymbolId>,
    ) -> Result<bool, GenerateError> {
        match target {
            Some(target) => self.decl_subtype(decl_id, target),
            None => Ok(false),
        }
    }

    /// Checks if a type expression written inside `site` is a subtype of `target`.
    /// Always `false` when the target was not found.
    pub fn is_type_subtype_of(
        &mut self,
        ty: &Ty,
        site: DeclId,
        target: Option<SymbolId>,
    ) -> Result<bool, GenerateError> {
        match target {
            Some(target) => self.type_subtype(ty, site, target),
            None => Ok(false),
        }
    }

    fn decl_subtype(&mut self, decl_id: DeclId, target: SymbolId) -> Result<bool, GenerateError> {
        match self.semantic.decls[decl_id].kind {
            DeclKind::Interface(decl) => {
                let Some(clause) = decl.heritage_clauses.first() else {
                    return Ok(false);
                };
                for base in &clause.types {
                    if self.name_subtype(&base.expression, decl_id, target)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            DeclKind::TypeAlias(decl) => self.type_subtype(&decl.ty, decl_id, target),
            _ => Ok(false),
        }
    }

    fn type_subtype(&mut self, ty: &Ty, site: DeclId, target: SymbolId) -> Result<bool, GenerateError> {
        match &ty.kind {
            TyKind::Union(types) => {
                for ty in types {
                    if self.type_subtype(ty, site, target)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            TyKind::Reference(reference) => self.name_subtype(&reference.name, site, target),
            _ => Ok(false),
        }
    }

    fn name_subtype(
        &mut self,
        name: &EntityName,
        site: DeclId,
        target: SymbolId,
    ) -> Result<bool, GenerateError> {
        match self.semantic.resolve_type_name(site, name) {
            Some(symbol_id) => self.symbol_subtype(symbol_id, target),
            None => Ok(false),
        }
    }

    fn symbol_subtype(&mut self, symbol_id: SymbolId, target: SymbolId) -> Result<bool, GenerateError> {
        if symbol_id == target {
            return Ok(true);
        }
        if let Some(result) = self.cache.get(&(symbol_id, target)) {
            return Ok(*result);
        }
        let semantic = self.semantic;
        let symbol = &semantic.symbols[symbol_id];
        if !self.resolving.insert((symbol_id, target)) {
            return Err(GenerateError::CyclicType {
                name: symbol.name.clone(),
            });
        }
        let result = match symbol.declarations.first() {
            Some(decl_id) => self.decl_subtype(*decl_id, target),
            None => Ok(false),
        };
        self.resolving.remove(&(symbol_id, target));

        let result = result?;
        self.cache.insert((symbol_id, target), result);
        Ok(result)
    }
}
