//! Generator configuration.
//!
//! Every table the generator consults lives here. The defaults reproduce the
//! tables of the TypeScript compiler's own factory generator, so an empty
//! configuration file is equivalent to no configuration file at all.

use indexmap::IndexMap;
use serde::Deserialize;

/// The generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub well_known: WellKnownNames,
    pub annotations: Annotations,
    /// Fields never emitted for a kind.
    pub member_excludes: MemberNameMap,
    /// Fields emitted first for a kind, in this order.
    pub member_order_overrides: MemberNameMap,
    pub fields: FieldRules,
    pub metadata: Metadata,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            well_known: WellKnownNames::default(),
            annotations: Annotations::default(),
            member_excludes: MemberNameMap::default_excludes(),
            member_order_overrides: MemberNameMap::default_order_overrides(),
            fields: FieldRules::default(),
            metadata: Metadata::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Reads a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(input: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(input)
    }
}

/// Names of the declarations all classification depends on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WellKnownNames {
    pub node: String,
    pub node_array: String,
    pub modifiers_array: String,
    pub declaration: String,
    pub kind_enum: String,
}

impl Default for WellKnownNames {
    fn default() -> Self {
        Self {
            node: "Node".to_owned(),
            node_array: "NodeArray".to_owned(),
            modifiers_array: "ModifiersArray".to_owned(),
            declaration: "Declaration".to_owned(),
            kind_enum: "SyntaxKind".to_owned(),
        }
    }
}

/// Markers read from documentation comments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Annotations {
    /// Followed by `(<kind enum>.<Member>)`.
    pub kind_tag: String,
    pub factory_param_tag: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            kind_tag: "@kind".to_owned(),
            factory_param_tag: "@factoryparam".to_owned(),
        }
    }
}

/// A map from kind name to field names, with `*` as the fallback entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct MemberNameMap(pub IndexMap<String, Vec<String>>);

impl MemberNameMap {
    pub const WILDCARD: &'static str = "*";

    fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        MemberNameMap(
            entries
                .iter()
                .map(|(kind, names)| {
                    (
                        (*kind).to_owned(),
                        names.iter().map(|name| (*name).to_owned()).collect(),
                    )
                })
                .collect(),
        )
    }

    /// The list for `kind`, or the wildcard list when `kind` has no entry.
    /// A kind entry replaces the wildcard list, the two are never merged.
    pub fn get(&self, kind: &str) -> &[String] {
        self.0
            .get(kind)
            .or_else(|| self.0.get(Self::WILDCARD))
            .map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, kind: &str, name: &str) -> bool {
        self.get(kind).iter().any(|x| x == name)
    }

    /// Position of `name` in the list for `kind`.
    pub fn position(&self, kind: &str, name: &str) -> Option<usize> {
        self.get(kind).iter().position(|x| x == name)
    }

    pub fn default_excludes() -> Self {
        const DECORATORS_MODIFIERS_NAME: &[&str] = &["decorators", "modifiers", "name"];
        const DECORATORS_MODIFIERS: &[&str] = &["decorators", "modifiers"];
        const ACCESSOR: &[&str] = &["typeParameters", "questionToken", "asteriskToken"];
        Self::from_entries(&[
            (Self::WILDCARD, &[]),
            ("TypeLiteral", DECORATORS_MODIFIERS_NAME),
            ("CallSignature", DECORATORS_MODIFIERS_NAME),
            ("ConstructSignature", DECORATORS_MODIFIERS_NAME),
            ("IndexSignature", &["typeParameters", "name"]),
            ("FunctionType", DECORATORS_MODIFIERS_NAME),
            ("ConstructorType", DECORATORS_MODIFIERS_NAME),
            ("PropertySignature", &["decorators", "modifiers", "initializer"]),
            ("MethodSignature", &["decorators", "modifiers", "asteriskToken", "body"]),
            ("MethodDeclaration", &["questionToken"]),
            ("GetAccessor", ACCESSOR),
            ("SetAccessor", ACCESSOR),
            ("Constructor", &["asteriskToken", "questionToken", "typeParameters", "name"]),
            ("BindingElement", DECORATORS_MODIFIERS),
            ("ObjectLiteralExpression", DECORATORS_MODIFIERS_NAME),
            ("ArrowFunction", &["asteriskToken", "name"]),
            ("ImportSpecifier", DECORATORS_MODIFIERS),
            ("ExportSpecifier", DECORATORS_MODIFIERS),
            ("ExportAssignment", &["name"]),
            ("ExportDeclaration", &["name"]),
            ("MissingDeclaration", &["name"]),
            ("PropertyAssignment", DECORATORS_MODIFIERS),
            ("ShorthandPropertyAssignment", DECORATORS_MODIFIERS),
            ("EnumMember", DECORATORS_MODIFIERS),
            ("JSDocRecordType", DECORATORS_MODIFIERS_NAME),
            ("JSDocRecordMember", &["decorators", "modifiers", "questionToken", "initializer"]),
            ("JSDocFunctionType", &["decorators", "modifiers", "name", "typeParameters"]),
        ])
    }

    pub fn default_order_overrides() -> Self {
        const FUNCTION: &[&str] = &[
            "decorators",
            "modifiers",
            "asteriskToken",
            "name",
            "typeParameters",
            "parameters",
            "type",
        ];
        const ACCESSOR: &[&str] = &[
            "decorators",
            "modifiers",
            "asteriskToken",
            "name",
            "parameters",
            "type",
            "body",
        ];
        Self::from_entries(&[
            (Self::WILDCARD, &["decorators", "modifiers"]),
            ("MethodSignature", &["name", "questionToken"]),
            ("DoStatement", &["statement", "expression"]),
            ("FunctionExpression", FUNCTION),
            ("ArrowFunction", &["decorators", "modifiers", "typeParameters", "parameters", "type"]),
            ("FunctionDeclaration", FUNCTION),
            ("Constructor", &["decorators", "modifiers", "parameters", "type", "body"]),
            (
                "MethodDeclaration",
                &[
                    "decorators",
                    "modifiers",
                    "asteriskToken",
                    "name",
                    "typeParameters",
                    "parameters",
                    "type",
                    "body",
                ],
            ),
            ("GetAccessor", ACCESSOR),
            ("SetAccessor", ACCESSOR),
        ])
    }
}

/// Name-driven special cases of field classification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldRules {
    /// Only kept on declaration subtypes.
    pub modifier_fields: Vec<String>,
    /// Declaring types whose modifier fields are always dropped.
    pub modifier_exempt_types: Vec<String>,
    pub optional_marker_field: String,
    /// Declaring types whose optional marker field is dropped.
    pub optional_marker_exempt_types: Vec<String>,
    /// The parent back-reference, always dropped.
    pub parent_field: String,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            modifier_fields: vec!["decorators".to_owned(), "modifiers".to_owned()],
            modifier_exempt_types: vec!["TypeParameterDeclaration".to_owned()],
            optional_marker_field: "questionToken".to_owned(),
            optional_marker_exempt_types: vec![
                "FunctionExpression".to_owned(),
                "FunctionDeclaration".to_owned(),
                "ArrowFunction".to_owned(),
            ],
            parent_field: "parent".to_owned(),
        }
    }
}

/// Structured metadata, used alongside the comment annotations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Metadata {
    /// Declaration name to kind names.
    pub kinds: IndexMap<String, Vec<String>>,
    /// Declaration name to factory-only field names.
    pub factory_params: IndexMap<String, Vec<String>>,
}

/// Line break sequence of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLine {
    #[default]
    Lf,
    Crlf,
}

impl NewLine {
    pub fn as_str(self) -> &'static str {
        match self {
            NewLine::Lf => "\n",
            NewLine::Crlf => "\r\n",
        }
    }
}

/// Shape of the generated file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub column_wrap: usize,
    pub indent_size: usize,
    pub new_line: NewLine,
    /// Nested namespaces wrapping the output, outermost first.
    pub namespaces: Vec<String>,
    /// Paths of `/// <reference path="..." />` directives.
    pub references: Vec<String>,
    /// The document kind that gets no factory functions.
    pub root_kind: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            column_wrap: 150,
            indent_size: 4,
            new_line: NewLine::Lf,
            namespaces: vec!["ts".to_owned(), "factory".to_owned()],
            references: vec!["parser.ts".to_owned(), "factory.ts".to_owned()],
            root_kind: "SourceFile".to_owned(),
        }
    }
}
