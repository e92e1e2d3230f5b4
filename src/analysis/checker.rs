//! Name resolution and property enumeration.

use std::rc::Rc;

use compact_str::CompactString;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use text_size::TextRange;

use crate::{
    errors::GenerateError,
    schema::ast::{EntityName, HeritageToken, Member, MemberKind, Ty, TyKind, TypeParam},
};

use super::{
    index::{DeclId, SymbolId},
    semantic::{DeclKind, Semantic, SymbolKind},
};

impl<'a> Semantic<'a> {
    /// Type parameters of a declaration.
    fn type_params(&self, decl_id: DeclId) -> &'a [TypeParam] {
        match self.decls[decl_id].kind {
            DeclKind::Interface(decl) => &decl.type_params,
            DeclKind::TypeAlias(decl) => &decl.type_params,
            _ => &[],
        }
    }

    /// Resolves a type name written inside the declaration `site`.
    ///
    /// A single name matching one of the site's type parameters, and any name
    /// that is not declared in the schema, resolve to `None`.
    pub fn resolve_type_name(&self, site: DeclId, name: &EntityName) -> Option<SymbolId> {
        if let [ident] = name.parts.as_slice() {
            if self
                .type_params(site)
                .iter()
                .any(|param| param.name.name == ident.name)
            {
                return None;
            }
        }
        self.resolve_entity_name(self.decls[site].scope, name)
    }
}

/// A property of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property<'a> {
    pub name: CompactString,
    /// The declared type, `None` for a malformed declaration.
    pub ty: Option<&'a Ty>,
    pub optional: bool,
    /// Leading comment ranges of the member.
    pub comments: &'a [TextRange],
    /// The interface declaring it, `None` for type literal members.
    pub owner: Option<SymbolId>,
    /// The declaration names in `ty` resolve from.
    pub site: DeclId,
}

type PropertyMap<'a> = IndexMap<CompactString, Property<'a>, FxBuildHasher>;

/// Enumerates the properties of declared types, own and inherited.
pub struct Checker<'s, 'a> {
    semantic: &'s Semantic<'a>,
    properties: FxHashMap<SymbolId, Rc<[Property<'a>]>>,
    resolving: FxHashSet<SymbolId>,
}

impl<'s, 'a> Checker<'s, 'a> {
    pub fn new(semantic: &'s Semantic<'a>) -> Self {
        Self {
            semantic,
            properties: FxHashMap::default(),
            resolving: FxHashSet::default(),
        }
    }

    /// The properties of an interface or type alias symbol.
    ///
    /// An interface lists its own members first, in declaration order over
    /// all merged declarations, then the properties of each `extends` base
    /// not already present.
    pub fn properties_of_symbol(
        &mut self,
        symbol_id: SymbolId,
    ) -> Result<Rc<[Property<'a>]>, GenerateError> {
        if let Some(properties) = self.properties.get(&symbol_id) {
            return Ok(Rc::clone(properties));
        }
        let semantic = self.semantic;
        let symbol = &semantic.symbols[symbol_id];
        if !self.resolving.insert(symbol_id) {
            return Err(GenerateError::CyclicType {
                name: symbol.name.clone(),
            });
        }
        let result = match symbol.kind {
            SymbolKind::Interface => self.interface_properties(symbol_id),
            SymbolKind::TypeAlias => match symbol.declarations.first() {
                Some(&site) => match semantic.decls[site].kind {
                    DeclKind::TypeAlias(alias) => self.type_properties(&alias.ty, site),
                    _ => Ok(PropertyMap::default()),
                },
                None => Ok(PropertyMap::default()),
            },
            _ => Ok(PropertyMap::default()),
        };
        self.resolving.remove(&symbol_id);

        let properties: Rc<[Property<'a>]> = result?.into_values().collect();
        self.properties.insert(symbol_id, Rc::clone(&properties));
        Ok(properties)
    }

    fn interface_properties(&mut self, symbol_id: SymbolId) -> Result<PropertyMap<'a>, GenerateError> {
        let semantic = self.semantic;
        let mut properties = PropertyMap::default();
        let declarations = &semantic.symbols[symbol_id].declarations;
        for decl_id in declarations {
            if let DeclKind::Interface(decl) = semantic.decls[*decl_id].kind {
                for member in &decl.members {
                    if let Some(property) = member_property(member, Some(symbol_id), *decl_id) {
                        properties.entry(property.name.clone()).or_insert(property);
                    }
                }
            }
        }
        for decl_id in declarations {
            let DeclKind::Interface(decl) = semantic.decls[*decl_id].kind else {
                continue;
            };
            let bases = decl
                .heritage_clauses
                .iter()
                .filter(|clause| clause.token == HeritageToken::Extends)
                .flat_map(|clause| &clause.types);
            for base in bases {
                let Some(base_id) = semantic.resolve_type_name(*decl_id, &base.expression) else {
                    continue;
                };
                for property in self.properties_of_symbol(base_id)?.iter() {
                    if !properties.contains_key(&property.name) {
                        properties.insert(property.name.clone(), property.clone());
                    }
                }
            }
        }
        Ok(properties)
    }

    /// The properties of a type expression written inside `site`.
    fn type_properties(&mut self, ty: &'a Ty, site: DeclId) -> Result<PropertyMap<'a>, GenerateError> {
        match &ty.kind {
            TyKind::Reference(reference) => {
                match self.semantic.resolve_type_name(site, &reference.name) {
                    Some(symbol_id) => Ok(self
                        .properties_of_symbol(symbol_id)?
                        .iter()
                        .map(|property| (property.name.clone(), property.clone()))
                        .collect()),
                    None => Ok(PropertyMap::default()),
                }
            }
            TyKind::Paren(inner) => self.type_properties(inner, site),
            TyKind::Literal(members) => {
                let mut properties = PropertyMap::default();
                for member in members {
                    if let Some(property) = member_property(member, None, site) {
                        properties.entry(property.name.clone()).or_insert(property);
                    }
                }
                Ok(properties)
            }
            TyKind::Intersection(types) => {
                let mut properties = PropertyMap::default();
                for ty in types {
                    for (name, property) in self.type_properties(ty, site)? {
                        properties.entry(name).or_insert(property);
                    }
                }
                Ok(properties)
            }
            TyKind::Union(types) => {
                let Some((first, rest)) = types.split_first() else {
                    return Ok(PropertyMap::default());
                };
                let mut properties = self.type_properties(first, site)?;
                for ty in rest {
                    let other = self.type_properties(ty, site)?;
                    properties.retain(|name, _| other.contains_key(name));
                }
                for property in properties.values_mut() {
                    property.owner = None;
                }
                Ok(properties)
            }
            _ => Ok(PropertyMap::default()),
        }
    }
}

/// The property declared by an interface or type literal member.
///
/// A method counts as a property typed by its return type.
fn member_property(member: &Member, owner: Option<SymbolId>, site: DeclId) -> Option<Property<'_>> {
    let (name, ty, optional) = match &member.kind {
        MemberKind::Property(property) => (&property.name, property.ty.as_ref(), property.optional),
        MemberKind::Method(method) => (
            &method.name,
            method.signature.returns.as_deref(),
            method.optional,
        ),
        MemberKind::Call(_) | MemberKind::Construct(_) | MemberKind::Index => return None,
    };
    Some(Property {
        name: name.name.clone(),
        ty,
        optional,
        comments: &member.comments,
        owner,
        site,
    })
}
