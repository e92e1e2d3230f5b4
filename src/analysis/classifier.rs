//! The field classifier.

use log::trace;

use crate::{
    config::Config,
    errors::GenerateError,
    schema::ast::{Ty, TyKind},
};

use super::{
    checker::Property,
    index::{DeclId, SymbolId},
    model::{FieldClass, FieldDescriptor},
    oracle::SubtypeOracle,
    resolver::WellKnown,
    semantic::Semantic,
};

/// The fields of one kind, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedMembers {
    pub members: Vec<FieldDescriptor>,
    pub min_argument_count: usize,
}

/// Decides which fields of a kind get factory parameters, and their order.
pub struct Classifier<'c, 's, 'a> {
    config: &'c Config,
    well_known: WellKnown,
    semantic: &'s Semantic<'a>,
    oracle: SubtypeOracle<'s, 'a>,
}

impl<'c, 's, 'a> Classifier<'c, 's, 'a> {
    pub fn new(config: &'c Config, well_known: WellKnown, semantic: &'s Semantic<'a>) -> Self {
        Self {
            config,
            well_known,
            semantic,
            oracle: SubtypeOracle::new(semantic),
        }
    }

    /// Checks if the first declaration of the symbol is a subtype of the
    /// declaration marker. Only such types keep their modifier fields.
    pub fn is_declaration(&mut self, symbol_id: SymbolId) -> Result<bool, GenerateError> {
        match self.semantic.symbols[symbol_id].declarations.first() {
            Some(decl_id) => self
                .oracle
                .is_decl_subtype_of(*decl_id, self.well_known.declaration),
            None => Ok(false),
        }
    }

    /// Classifies the properties of `declaring_type` for `kind`.
    ///
    /// Included fields are the children and the factory-only fields, stably
    /// sorted so that fields in the order override list come first.
    pub fn classify_members(
        &mut self,
        kind: &str,
        declaring_type: &str,
        is_declaration: bool,
        properties: &[Property<'a>],
    ) -> Result<ClassifiedMembers, GenerateError> {
        let mut members = Vec::new();
        let mut min_argument_count = 0;
        for property in properties {
            if self.is_excluded(kind, declaring_type, is_declaration, property) {
                trace!("{kind}: excluded `{}`", property.name);
                continue;
            }
            let Some(ty) = property.ty else {
                trace!("{kind}: `{}` has no type", property.name);
                continue;
            };

            let class = self.classify(ty, property.site)?;
            let is_factory_only = self.is_factory_only(declaring_type, property);
            if !class.is_child() && !is_factory_only {
                trace!("{kind}: `{}` is not a child", property.name);
                continue;
            }
            members.push(FieldDescriptor {
                name: property.name.clone(),
                type_text: self.semantic.text(ty.range).to_owned(),
                is_optional: property.optional,
                class,
                is_factory_only,
            });
            if !property.optional {
                min_argument_count = members.len();
            }
        }

        let overrides = &self.config.member_order_overrides;
        let mut indexed: Vec<(usize, FieldDescriptor)> = members.into_iter().enumerate().collect();
        indexed.sort_by_key(|(index, member)| {
            (
                overrides.position(kind, &member.name).unwrap_or(usize::MAX),
                *index,
            )
        });
        Ok(ClassifiedMembers {
            members: indexed.into_iter().map(|(_, member)| member).collect(),
            min_argument_count,
        })
    }

    /// Applies the exclusion table, then the first matching name rule.
    fn is_excluded(
        &self,
        kind: &str,
        declaring_type: &str,
        is_declaration: bool,
        property: &Property<'a>,
    ) -> bool {
        let name = property.name.as_str();
        let rules = &self.config.fields;
        if self.config.member_excludes.contains(kind, name) {
            true
        } else if contains(&rules.modifier_fields, name) {
            !is_declaration || contains(&rules.modifier_exempt_types, declaring_type)
        } else if name == rules.optional_marker_field {
            contains(&rules.optional_marker_exempt_types, declaring_type)
        } else {
            (self.well_known.node.is_some() && property.owner == self.well_known.node)
                || name == rules.parent_field
        }
    }

    /// Classifies a type expression written inside `site`.
    pub fn classify(&mut self, ty: &Ty, site: DeclId) -> Result<FieldClass, GenerateError> {
        if let TyKind::Reference(reference) = &ty.kind {
            let symbol_id = self.semantic.resolve_type_name(site, &reference.name);
            if symbol_id.is_some() && symbol_id == self.well_known.node_array {
                return Ok(FieldClass::NodeArray);
            }
            if symbol_id.is_some() && symbol_id == self.well_known.modifiers_array {
                return Ok(FieldClass::ModifiersArray);
            }
        }
        if self.oracle.is_type_subtype_of(ty, site, self.well_known.node)? {
            Ok(FieldClass::Node)
        } else {
            Ok(FieldClass::Plain)
        }
    }

    fn is_factory_only(&self, declaring_type: &str, property: &Property<'a>) -> bool {
        let tag = self.config.annotations.factory_param_tag.as_str();
        let annotated = property
            .comments
            .iter()
            .any(|range| self.semantic.text(*range).contains(tag));
        annotated
            || self
                .config
                .metadata
                .factory_params
                .get(declaring_type)
                .is_some_and(|names| contains(names, &property.name))
    }
}

fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|x| x == name)
}
