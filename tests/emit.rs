use factorygen::{
    analysis::{index::SymbolId, FieldClass, FieldDescriptor, SyntaxNodeKind},
    config::NewLine,
    emit::emit_factory,
    generate, Config,
};

fn field(name: &str, type_text: &str, class: FieldClass) -> FieldDescriptor {
    FieldDescriptor {
        name: name.into(),
        type_text: type_text.to_owned(),
        is_optional: false,
        class,
        is_factory_only: false,
    }
}

fn kind(name: &str, declaring_type: &str, members: Vec<FieldDescriptor>) -> SyntaxNodeKind {
    SyntaxNodeKind {
        name: name.into(),
        value: None,
        declaring_symbol: SymbolId::new(0),
        declaring_type: declaring_type.into(),
        has_children: members.iter().any(|member| member.class.is_child()),
        min_argument_count: members.len(),
        members,
    }
}

/// Lines of the output between the helpers and the namespace ends.
fn body(output: &str) -> Vec<&str> {
    let lines: Vec<&str> = output.lines().collect();
    lines[27..lines.len() - 2].to_vec()
}

#[test]
fn test_generate_fixture() {
    let input = include_str!("schema/types.ts");
    let expected = include_str!("schema/factory.generated.ts");
    let output = generate(input, &Config::default()).unwrap();
    assert_eq!(output, expected);
    assert!(!output.contains("SourceFile"));
}

#[test]
fn test_generate_is_deterministic() {
    let input = include_str!("schema/types.ts");
    let config = Config::default();
    assert_eq!(
        generate(input, &config).unwrap(),
        generate(input, &config).unwrap()
    );
}

#[test]
fn test_helper_blank_lines_keep_indent() {
    let output = emit_factory(&[], &Config::default());
    assert!(output.contains(
        "                flags &= oldNode.modifiers.flags;\n            }\n            \n            if (newNode.modifiers) {\n"
    ));
    assert!(output.contains(
        "                flags |= newNode.modifiers.flags;\n            }\n            \n            newNode.flags = flags;\n"
    ));

    let config = Config::from_json(r#"{ "output": { "indent_size": 2 } }"#).unwrap();
    let output = emit_factory(&[], &config);
    assert!(output.contains("\n      }\n      \n      if (newNode.modifiers) {\n"));
}

#[test]
fn test_empty_kind() {
    let output = emit_factory(&[kind("Empty", "EmptyNode", vec![])], &Config::default());
    assert_eq!(
        body(&output),
        vec![
            "        export function createEmpty(): EmptyNode {",
            "            return createNode<EmptyNode>(SyntaxKind.Empty);",
            "        }",
        ]
    );
}

#[test]
fn test_single_member() {
    let members = vec![field("modifiers", "ModifiersArray", FieldClass::ModifiersArray)];
    let output = emit_factory(&[kind("Mods", "Mods", members)], &Config::default());
    assert_eq!(
        body(&output),
        vec![
            "        export function createMods(modifiers?: ModifiersArray): Mods {",
            "            let node = createNode<Mods>(SyntaxKind.Mods);",
            "            setModifiers(node, modifiers);",
            "            return node;",
            "        }",
            "        export function updateMods(node: Mods, modifiers: ModifiersArray): Mods {",
            "            if (modifiers !== node.modifiers) {",
            "                let newNode = createMods(modifiers);",
            "                return updateFrom(node, newNode);",
            "            }",
            "            return node;",
            "        }",
        ]
    );
}

#[test]
fn test_factory_only_members() {
    let mut flag = field("flag", "boolean", FieldClass::Plain);
    flag.is_factory_only = true;
    let child = field("child", "Node", FieldClass::Node);

    let output = emit_factory(
        &[kind("Flagged", "Flagged", vec![flag.clone(), child])],
        &Config::default(),
    );
    let lines = body(&output);
    assert_eq!(
        lines[0],
        "        export function createFlagged(flag?: boolean, child?: Node): Flagged {"
    );
    assert!(lines.contains(
        &"        export function updateFlagged(node: Flagged, child: Node): Flagged {"
    ));
    assert!(lines.contains(&"            if (child !== node.child) {"));
    assert!(lines.contains(&"                let newNode = createFlagged(node.flag, child);"));

    // Only factory-only members, nothing to compare.
    let mut only = kind("Only", "Only", vec![flag]);
    only.has_children = true;
    let output = emit_factory(&[only], &Config::default());
    assert!(!output.contains("updateOnly"));
}

#[test]
fn test_plain_members_have_no_updater() {
    let members = vec![field("text", "string", FieldClass::Plain)];
    let output = emit_factory(&[kind("Text", "Text", members)], &Config::default());
    assert!(output.contains("export function createText(text?: string): Text {"));
    assert!(!output.contains("updateText"));
}

#[test]
fn test_root_kind() {
    let members = vec![field("statements", "NodeArray<Statement>", FieldClass::NodeArray)];
    let kinds = [kind("Document", "Document", members)];
    let output = emit_factory(&kinds, &Config::default());
    assert!(output.contains("createDocument"));

    let mut config = Config::default();
    config.output.root_kind = "Document".to_owned();
    let output = emit_factory(&kinds, &config);
    assert!(!output.contains("Document"));
}

#[test]
fn test_wrap() {
    let members = vec![
        field("first", "NodeArray<AVeryLongTypeName>", FieldClass::NodeArray),
        field("second", "NodeArray<AVeryLongTypeName>", FieldClass::NodeArray),
        field("third", "NodeArray<AVeryLongTypeName>", FieldClass::NodeArray),
    ];
    let mut config = Config::default();
    config.output.column_wrap = 100;
    let output = emit_factory(&[kind("Long", "Long", members)], &config);
    let lines = body(&output);
    assert_eq!(
        lines[..2],
        [
            "        export function createLong(first?: NodeArray<AVeryLongTypeName>, ",
            "            second?: NodeArray<AVeryLongTypeName>, third?: NodeArray<AVeryLongTypeName>): Long {",
        ]
    );
    assert_eq!(lines[2], "            let node = createNode<Long>(SyntaxKind.Long);");
    let update = lines
        .iter()
        .position(|line| line.contains("export function updateLong"))
        .unwrap();
    assert_eq!(
        lines[update..update + 5],
        [
            "        export function updateLong(node: Long, first: NodeArray<AVeryLongTypeName>, ",
            "            second: NodeArray<AVeryLongTypeName>, third: NodeArray<AVeryLongTypeName>): Long {",
            "            if (first !== node.first || second !== node.second || third !== node.third) {",
            "                let newNode = createLong(first, second, third);",
            "                return updateFrom(node, newNode);",
        ]
    );
}

#[test]
fn test_output_config() {
    let config = Config::from_json(
        r#"{
            "output": {
                "new_line": "crlf",
                "indent_size": 2,
                "namespaces": ["api"],
                "references": []
            },
            "well_known": { "kind_enum": "NodeKind" }
        }"#,
    )
    .unwrap();
    let output = emit_factory(&[kind("Empty", "Empty", vec![])], &config);
    assert!(output.starts_with(
        "// <auto-generated />\r\nnamespace api {\r\n  function setModifiers("
    ));
    assert!(output.contains(
        "\r\n  export function createEmpty(): Empty {\r\n    return createNode<Empty>(NodeKind.Empty);\r\n  }\r\n"
    ));
    assert!(output.ends_with("\r\n}\r\n"));
    assert!(!output.replace("\r\n", "").contains('\n'));
}
