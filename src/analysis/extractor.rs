//! The node kind extractor.
//!
//! Reads the `@kind(SyntaxKind.Member)` annotations in the leading comments of
//! interfaces and type aliases, and builds one [`SyntaxNodeKind`] per
//! annotated kind.

use std::cmp::Ordering;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{config::Config, errors::GenerateError, utils::Join};

use super::{
    checker::Checker,
    classifier::Classifier,
    index::SymbolId,
    model::SyntaxNodeKind,
    resolver::WellKnown,
    semantic::{DeclKind, Declaration, Semantic},
};

lazy_static! {
    static ref DEFAULT_KIND_PATTERN: Regex =
        Regex::new(r"@kind\s*\(\s*SyntaxKind\.([A-Za-z0-9_]+)\s*\)").unwrap();
}

/// The kind annotation pattern for a tag and a kind enum name.
pub fn kind_pattern(kind_tag: &str, kind_enum: &str) -> Result<Regex, regex::Error> {
    if kind_tag == "@kind" && kind_enum == "SyntaxKind" {
        return Ok(DEFAULT_KIND_PATTERN.clone());
    }
    Regex::new(&format!(
        r"{}\s*\(\s*{}\.([A-Za-z0-9_]+)\s*\)",
        regex::escape(kind_tag),
        regex::escape(kind_enum),
    ))
}

/// Extracts and classifies every annotated kind, sorted by kind value.
///
/// Kinds whose value is not constant come last.
pub fn extract_kinds(
    semantic: &Semantic<'_>,
    well_known: WellKnown,
    kind_enum: SymbolId,
    config: &Config,
) -> Result<Vec<SyntaxNodeKind>, GenerateError> {
    let pattern = kind_pattern(&config.annotations.kind_tag, &config.well_known.kind_enum)?;
    let mut checker = Checker::new(semantic);
    let mut classifier = Classifier::new(config, well_known, semantic);
    let mut kinds = Vec::new();

    for (decl_id, decl) in semantic.decls.iter_enumerated() {
        if !matches!(decl.kind, DeclKind::Interface(_) | DeclKind::TypeAlias(_)) {
            continue;
        }
        let mut kind_ids = annotated_kinds(semantic, decl, kind_enum, &pattern);
        // Merged declarations share one metadata entry, read on the first.
        if semantic.symbols[decl.symbol_id].declarations.first() == Some(&decl_id) {
            for kind_id in metadata_kinds(semantic, decl, kind_enum, config) {
                if !kind_ids.contains(&kind_id) {
                    kind_ids.push(kind_id);
                }
            }
        }
        if kind_ids.is_empty() {
            continue;
        }

        let symbol_id = decl.symbol_id;
        let declaring_type = &semantic.symbols[symbol_id].name;
        let is_declaration = classifier.is_declaration(symbol_id)?;
        let properties = checker.properties_of_symbol(symbol_id)?;
        for kind_id in kind_ids {
            let kind = &semantic.symbols[kind_id];
            let classified = classifier.classify_members(
                &kind.name,
                declaring_type,
                is_declaration,
                &properties,
            )?;
            debug!(
                "{} ({declaring_type}): {}",
                kind.name,
                classified.members.iter().map(|member| &member.name).join(", "),
            );
            kinds.push(SyntaxNodeKind {
                name: kind.name.clone(),
                value: kind.value,
                declaring_symbol: symbol_id,
                declaring_type: declaring_type.clone(),
                has_children: classified.members.iter().any(|member| member.class.is_child()),
                members: classified.members,
                min_argument_count: classified.min_argument_count,
            });
        }
    }

    kinds.sort_by(|a, b| compare_values(a.value, b.value));
    Ok(kinds)
}

/// Kinds named by the annotations in the leading comments of a declaration.
///
/// Names that are not members of the kind enum are ignored.
fn annotated_kinds(
    semantic: &Semantic<'_>,
    decl: &Declaration<'_>,
    kind_enum: SymbolId,
    pattern: &Regex,
) -> Vec<SymbolId> {
    let members = &semantic.symbols[kind_enum].exports;
    decl.comments
        .iter()
        .flat_map(|range| pattern.captures_iter(semantic.text(*range)))
        .filter_map(|captures| members.get(&captures[1]).copied())
        .collect()
}

/// Kinds listed for a declaration in the metadata table.
fn metadata_kinds(
    semantic: &Semantic<'_>,
    decl: &Declaration<'_>,
    kind_enum: SymbolId,
    config: &Config,
) -> Vec<SymbolId> {
    let members = &semantic.symbols[kind_enum].exports;
    let name = &semantic.symbols[decl.symbol_id].name;
    config
        .metadata
        .kinds
        .get(name.as_str())
        .into_iter()
        .flatten()
        .filter_map(|kind| members.get(kind.as_str()).copied())
        .collect()
}

fn compare_values(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(pattern: &Regex, text: &str) -> Vec<String> {
        pattern
            .captures_iter(text)
            .map(|captures| captures[1].to_owned())
            .collect()
    }

    #[test]
    fn test_kind_pattern() {
        let pattern = kind_pattern("@kind", "SyntaxKind").unwrap();
        assert_eq!(
            captured(&pattern, "/** @kind(SyntaxKind.Block) @kind( SyntaxKind.Empty_1 ) */"),
            vec!["Block", "Empty_1"]
        );
        assert_eq!(captured(&pattern, "// @kind(SyntaxKind.Blöck)"), Vec::<String>::new());
        assert_eq!(captured(&pattern, "// @kind(NodeKind.Block)"), Vec::<String>::new());

        let pattern = kind_pattern("@node", "NodeKind").unwrap();
        assert_eq!(captured(&pattern, "// @node(NodeKind.Block)"), vec!["Block"]);
        assert_eq!(captured(&pattern, "// @node(NodeKind.Ünit)"), Vec::<String>::new());
    }
}
