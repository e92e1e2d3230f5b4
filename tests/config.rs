use factorygen::config::{Config, MemberNameMap, NewLine};

#[test]
fn test_empty_config_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.well_known.node, "Node");
    assert_eq!(config.well_known.kind_enum, "SyntaxKind");
    assert_eq!(config.annotations.kind_tag, "@kind");
    assert_eq!(config.output.column_wrap, 150);
    assert_eq!(config.output.indent_size, 4);
    assert_eq!(config.output.new_line, NewLine::Lf);
    assert_eq!(config.output.root_kind, "SourceFile");
}

#[test]
fn test_member_name_map() {
    let excludes = MemberNameMap::default_excludes();
    assert!(excludes.contains("TypeLiteral", "name"));
    assert!(excludes.contains("IndexSignature", "typeParameters"));
    assert!(!excludes.contains("Identifier", "name"));

    let overrides = MemberNameMap::default_order_overrides();
    assert_eq!(overrides.position("Block", "modifiers"), Some(1));
    assert_eq!(overrides.position("DoStatement", "expression"), Some(1));
    // A kind entry replaces the wildcard entry.
    assert_eq!(overrides.position("DoStatement", "decorators"), None);
    assert_eq!(overrides.position("MethodSignature", "questionToken"), Some(1));
}

#[test]
fn test_partial_config() {
    let config = Config::from_json(
        r#"{
            "well_known": { "node": "AstNode" },
            "output": { "column_wrap": 120, "new_line": "crlf" }
        }"#,
    )
    .unwrap();
    assert_eq!(config.well_known.node, "AstNode");
    assert_eq!(config.well_known.node_array, "NodeArray");
    assert_eq!(config.output.column_wrap, 120);
    assert_eq!(config.output.new_line, NewLine::Crlf);
    assert_eq!(config.output.namespaces, vec!["ts", "factory"]);
    assert_eq!(config.member_excludes, MemberNameMap::default_excludes());
}

#[test]
fn test_member_name_map_order() {
    let config = Config::from_json(
        r#"{ "member_order_overrides": { "Call": ["b", "a"], "*": ["z"] } }"#,
    )
    .unwrap();
    let keys: Vec<&str> = config
        .member_order_overrides
        .0
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["Call", "*"]);
    assert_eq!(config.member_order_overrides.position("Call", "a"), Some(1));
    assert_eq!(config.member_order_overrides.position("Other", "z"), Some(0));
}

#[test]
fn test_unknown_fields() {
    assert!(Config::from_json(r#"{ "unknown": 1 }"#).is_err());
    assert!(Config::from_json(r#"{ "output": { "wrap": 1 } }"#).is_err());
    assert!(Config::from_json(r#"{ "output": { "new_line": "cr" } }"#).is_err());
}
