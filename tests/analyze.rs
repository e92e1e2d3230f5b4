use factorygen::{
    analysis::{FieldClass, SyntaxNodeKind},
    analyze, Config, GenerateError,
};

const SCHEMA: &str = include_str!("schema/types.ts");

const PRELUDE: &str = r#"
const enum SyntaxKind {
    Unknown,
    Identifier,
    Block,
    Call,
    Function,
    A = 1 << 4,
    B,
    C = B * 2 + ~0,
    D = "d",
    E,
}
interface Node {
    kind: SyntaxKind;
    flags: number;
    decorators?: NodeArray<Node>;
    modifiers?: ModifiersArray;
    parent?: Node;
}
interface NodeArray<T> { length: number; }
interface ModifiersArray extends NodeArray<Node> { flags: number; }
interface Declaration extends Node { name?: Identifier; }
interface Identifier extends Node { text: string; }
"#;

fn find<'a>(kinds: &'a [SyntaxNodeKind], name: &str) -> &'a SyntaxNodeKind {
    kinds
        .iter()
        .find(|kind| kind.name == name)
        .unwrap_or_else(|| panic!("kind {name} not found"))
}

fn member_names(kind: &SyntaxNodeKind) -> Vec<&str> {
    kind.members.iter().map(|member| member.name.as_str()).collect()
}

#[test]
fn test_kind_order() {
    let kinds = analyze(SCHEMA, &Config::default()).unwrap();
    let names: Vec<&str> = kinds.iter().map(|kind| kind.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Identifier",
            "QualifiedName",
            "ArrayLiteralExpression",
            "CallExpression",
            "Block",
            "EmptyStatement",
            "DoStatement",
            "BreakStatement",
            "ContinueStatement",
            "FunctionDeclaration",
            "Decorator",
            "SourceFile",
        ]
    );
    assert_eq!(find(&kinds, "Identifier").value, Some(10.0));
    assert_eq!(find(&kinds, "Decorator").value, Some(20.0));
    assert_eq!(find(&kinds, "SourceFile").value, Some(256.0));
}

#[test]
fn test_members() {
    let kinds = analyze(SCHEMA, &Config::default()).unwrap();
    assert_eq!(member_names(find(&kinds, "Identifier")), Vec::<&str>::new());
    assert_eq!(member_names(find(&kinds, "Block")), vec!["statements"]);
    assert_eq!(
        member_names(find(&kinds, "DoStatement")),
        vec!["statement", "expression"]
    );
    assert_eq!(
        member_names(find(&kinds, "FunctionDeclaration")),
        vec![
            "decorators",
            "modifiers",
            "asteriskToken",
            "name",
            "typeParameters",
            "parameters",
            "type",
            "body",
        ]
    );
    assert_eq!(
        member_names(find(&kinds, "SourceFile")),
        vec!["decorators", "modifiers", "statements", "name"]
    );
}

#[test]
fn test_field_classes() {
    let kinds = analyze(SCHEMA, &Config::default()).unwrap();
    let function = find(&kinds, "FunctionDeclaration");
    let classes: Vec<FieldClass> = function.members.iter().map(|member| member.class).collect();
    assert_eq!(
        classes,
        vec![
            FieldClass::NodeArray,
            FieldClass::ModifiersArray,
            FieldClass::Node,
            FieldClass::Node,
            FieldClass::NodeArray,
            FieldClass::NodeArray,
            FieldClass::Node,
            FieldClass::Node,
        ]
    );
    assert_eq!(function.members[4].type_text, "NodeArray<TypeParameterDeclaration>");

    let qualified_name = find(&kinds, "QualifiedName");
    assert_eq!(qualified_name.members[0].type_text, "EntityName");
    assert_eq!(qualified_name.members[0].class, FieldClass::Node);

    let array = find(&kinds, "ArrayLiteralExpression");
    assert_eq!(member_names(array), vec!["elements", "multiLine"]);
    assert_eq!(array.members[1].class, FieldClass::Plain);
    assert!(array.members[1].is_factory_only);
    assert!(!array.members[0].is_factory_only);

    let call = find(&kinds, "CallExpression");
    assert_eq!(call.members[2].param_name(), "_arguments");
}

#[test]
fn test_min_argument_count() {
    let kinds = analyze(SCHEMA, &Config::default()).unwrap();
    let counts: Vec<(&str, usize)> = kinds
        .iter()
        .map(|kind| (kind.name.as_str(), kind.min_argument_count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Identifier", 0),
            ("QualifiedName", 2),
            ("ArrayLiteralExpression", 1),
            ("CallExpression", 3),
            ("Block", 1),
            ("EmptyStatement", 0),
            ("DoStatement", 2),
            ("BreakStatement", 0),
            ("ContinueStatement", 0),
            ("FunctionDeclaration", 3),
            ("Decorator", 1),
            ("SourceFile", 1),
        ]
    );
}

#[test]
fn test_shared_declaring_type() {
    let kinds = analyze(SCHEMA, &Config::default()).unwrap();
    let break_statement = find(&kinds, "BreakStatement");
    let continue_statement = find(&kinds, "ContinueStatement");
    assert_eq!(break_statement.declaring_type, "BreakOrContinueStatement");
    assert_eq!(continue_statement.declaring_type, "BreakOrContinueStatement");
    assert_eq!(break_statement.declaring_symbol, continue_statement.declaring_symbol);
    assert_eq!(break_statement.members, continue_statement.members);
    assert!(break_statement.has_children);
    assert!(!find(&kinds, "Identifier").has_children);
}

#[test]
fn test_enum_values() {
    let input = format!(
        "{PRELUDE}
// @kind(SyntaxKind.E)
// @kind(SyntaxKind.D)
// @kind(SyntaxKind.C)
// @kind(SyntaxKind.B)
// @kind(SyntaxKind.A)
interface Leaf extends Node {{}}
"
    );
    let kinds = analyze(&input, &Config::default()).unwrap();
    let values: Vec<(&str, Option<f64>)> = kinds
        .iter()
        .map(|kind| (kind.name.as_str(), kind.value))
        .collect();
    assert_eq!(
        values,
        vec![
            ("A", Some(16.0)),
            ("B", Some(17.0)),
            ("C", Some(33.0)),
            ("E", None),
            ("D", None),
        ]
    );
}

#[test]
fn test_union_classification() {
    let input = format!(
        "{PRELUDE}
// @kind(SyntaxKind.Block)
interface Block extends Node {{
    a: string | Identifier;
    b: string | number;
    c?: (Identifier);
    d(): Identifier;
}}
"
    );
    let kinds = analyze(&input, &Config::default()).unwrap();
    let block = find(&kinds, "Block");
    assert_eq!(member_names(block), vec!["a", "d"]);
    assert_eq!(block.members[1].type_text, "Identifier");
}

#[test]
fn test_type_alias_kind() {
    let input = format!(
        "{PRELUDE}
// @kind(SyntaxKind.Call)
type CallLike = Node & {{ callee: Identifier; args: NodeArray<Node>; }};
"
    );
    let kinds = analyze(&input, &Config::default()).unwrap();
    let call = find(&kinds, "Call");
    assert_eq!(call.declaring_type, "CallLike");
    assert_eq!(member_names(call), vec!["callee", "args"]);
}

#[test]
fn test_declaration_marker() {
    let input = format!(
        "{PRELUDE}
// @kind(SyntaxKind.Function)
interface FunctionLike extends Declaration {{
    body: Node;
}}
"
    );
    let kinds = analyze(&input, &Config::default()).unwrap();
    assert_eq!(
        member_names(find(&kinds, "Function")),
        vec!["decorators", "modifiers", "body", "name"]
    );

    let mut config = Config::default();
    config.well_known.declaration = "Missing".to_owned();
    let kinds = analyze(&input, &config).unwrap();
    assert_eq!(member_names(find(&kinds, "Function")), vec!["body", "name"]);
}

#[test]
fn test_modifier_exempt_type() {
    let input = format!(
        "{PRELUDE}
// @kind(SyntaxKind.Function)
interface TypeParameterDeclaration extends Declaration {{
    constraint?: Node;
}}
"
    );
    let kinds = analyze(&input, &Config::default()).unwrap();
    assert_eq!(
        member_names(find(&kinds, "Function")),
        vec!["constraint", "name"]
    );

    let mut config = Config::default();
    config.fields.modifier_exempt_types.clear();
    let kinds = analyze(&input, &config).unwrap();
    assert_eq!(
        member_names(find(&kinds, "Function")),
        vec!["decorators", "modifiers", "constraint", "name"]
    );
}

#[test]
fn test_redeclared_parent() {
    let input = format!(
        "{PRELUDE}
// @kind(SyntaxKind.Block)
interface Block extends Node {{
    parent: Block;
    statements: NodeArray<Node>;
}}
"
    );
    let kinds = analyze(&input, &Config::default()).unwrap();
    assert_eq!(member_names(find(&kinds, "Block")), vec!["statements"]);

    let mut config = Config::default();
    config.fields.parent_field = "owner".to_owned();
    let kinds = analyze(&input, &config).unwrap();
    assert_eq!(
        member_names(find(&kinds, "Block")),
        vec!["parent", "statements"]
    );
}

#[test]
fn test_metadata() {
    let input = format!(
        "{PRELUDE}
interface Block extends Node {{
    statements: NodeArray<Node>;
    multiLine?: boolean;
}}
"
    );
    assert_eq!(analyze(&input, &Config::default()).unwrap(), vec![]);

    let config = Config::from_json(
        r#"{ "metadata": { "kinds": { "Block": ["Block", "NotAKind"] },
                           "factory_params": { "Block": ["multiLine"] } } }"#,
    )
    .unwrap();
    let kinds = analyze(&input, &config).unwrap();
    assert_eq!(kinds.len(), 1);
    let block = find(&kinds, "Block");
    assert_eq!(member_names(block), vec!["statements", "multiLine"]);
    assert!(block.members[1].is_factory_only);
    assert_eq!(block.min_argument_count, 1);
}

#[test]
fn test_member_excludes() {
    let input = format!(
        "{PRELUDE}
// @kind(SyntaxKind.Block)
interface Block extends Node {{
    statements: NodeArray<Node>;
    label?: Identifier;
}}
"
    );
    let config = Config::from_json(r#"{ "member_excludes": { "Block": ["label"] } }"#).unwrap();
    let kinds = analyze(&input, &config).unwrap();
    assert_eq!(member_names(find(&kinds, "Block")), vec!["statements"]);
}

#[test]
fn test_missing_kind_enum() {
    let err = analyze("interface Node {}", &Config::default()).unwrap_err();
    assert_eq!(
        err,
        GenerateError::MissingKindEnum {
            name: "SyntaxKind".to_owned()
        }
    );
}

#[test]
fn test_parse_error() {
    let err = analyze("type A = ;", &Config::default()).unwrap_err();
    assert!(matches!(err, GenerateError::Parse(errors) if errors.len() == 1));
}

#[test]
fn test_cyclic_type() {
    let input = format!(
        "{PRELUDE}
// @kind(SyntaxKind.Block)
interface A extends B {{ x: Node; }}
interface B extends A {{}}
"
    );
    let err = analyze(&input, &Config::default()).unwrap_err();
    assert!(matches!(err, GenerateError::CyclicType { .. }));
}
