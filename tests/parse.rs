use factorygen::schema::{
    ast::{BinaryOp, ConstExpr, HeritageToken, MemberKind, StmtKind, TyKind},
    parse, ParseError,
};

#[test]
fn test_parse_fixture() {
    let input = include_str!("schema/types.ts");
    let (file, errors) = parse(input);
    assert_eq!(errors, vec![]);
    assert_eq!(file.statements.len(), 1);
    let StmtKind::Namespace(namespace) = &file.statements[0].kind else {
        panic!("expected a namespace");
    };
    assert_eq!(namespace.name.last().name, "ts");
    let others = namespace
        .body
        .iter()
        .filter(|stmt| stmt.kind == StmtKind::Other)
        .count();
    assert_eq!(others, 2);
}

#[test]
fn test_interface() {
    let input = r#"
interface Foo<T extends Node = Node> extends Bar<T>, Baz implements Qux {
    readonly a?: string;
    b: NodeArray<T>[];
    "quoted": number,
    method<U>(x: U, ...rest: any[]): Foo<U>;
    (call: number): void;
    new (x: string): Foo<T>;
    [key: string]: any;
}
"#;
    let (file, errors) = parse(input);
    assert_eq!(errors, vec![]);
    let StmtKind::Interface(decl) = &file.statements[0].kind else {
        panic!("expected an interface");
    };
    assert_eq!(decl.name.name, "Foo");
    assert_eq!(decl.type_params.len(), 1);
    assert!(decl.type_params[0].constraint.is_some());
    assert!(decl.type_params[0].default.is_some());

    assert_eq!(decl.heritage_clauses.len(), 2);
    assert_eq!(decl.heritage_clauses[0].token, HeritageToken::Extends);
    assert_eq!(decl.heritage_clauses[0].types.len(), 2);
    assert_eq!(decl.heritage_clauses[0].types[0].type_args.len(), 1);
    assert_eq!(decl.heritage_clauses[1].token, HeritageToken::Implements);

    let names: Vec<_> = decl
        .members
        .iter()
        .map(|member| member.name().map(|name| name.name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![Some("a"), Some("b"), Some("quoted"), Some("method"), None, None, None]
    );
    let MemberKind::Property(a) = &decl.members[0].kind else {
        panic!("expected a property");
    };
    assert!(a.readonly && a.optional);
    let MemberKind::Property(b) = &decl.members[1].kind else {
        panic!("expected a property");
    };
    assert!(matches!(b.ty.as_ref().map(|ty| &ty.kind), Some(TyKind::Array(_))));
    let MemberKind::Method(method) = &decl.members[3].kind else {
        panic!("expected a method");
    };
    assert_eq!(method.signature.params.len(), 2);
    assert!(method.signature.params[1].rest);
    assert!(matches!(decl.members[4].kind, MemberKind::Call(_)));
    assert!(matches!(decl.members[5].kind, MemberKind::Construct(_)));
    assert!(matches!(decl.members[6].kind, MemberKind::Index));
}

#[test]
fn test_type_alias() {
    let input = r#"
type A = | B | C<D>;
type E = F & { g: H };
type I = (j: K) => L;
type M = "m" | -1 | typeof N | keyof O | P["q"] | [R, S?] | this;
"#;
    let (file, errors) = parse(input);
    assert_eq!(errors, vec![]);
    let kinds: Vec<_> = file
        .statements
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::TypeAlias(alias) => &alias.ty.kind,
            _ => panic!("expected a type alias"),
        })
        .collect();
    assert!(matches!(kinds[0], TyKind::Union(types) if types.len() == 2));
    assert!(matches!(kinds[1], TyKind::Intersection(types) if types.len() == 2));
    assert!(matches!(kinds[2], TyKind::Function { is_constructor: false, .. }));
    assert!(matches!(kinds[3], TyKind::Union(types) if types.len() == 7));
}

#[test]
fn test_type_text_range() {
    let input = "interface A { b: NodeArray<Expression> | undefined; }";
    let (file, errors) = parse(input);
    assert_eq!(errors, vec![]);
    let StmtKind::Interface(decl) = &file.statements[0].kind else {
        panic!("expected an interface");
    };
    let MemberKind::Property(b) = &decl.members[0].kind else {
        panic!("expected a property");
    };
    let range = b.ty.as_ref().map(|ty| ty.range).unwrap();
    assert_eq!(&input[range], "NodeArray<Expression> | undefined");
}

#[test]
fn test_enum() {
    let input = r#"
const enum Flags {
    None,
    A = 1 << 2,
    B = A | 4,
    C = "c",
}
"#;
    let (file, errors) = parse(input);
    assert_eq!(errors, vec![]);
    let StmtKind::Enum(decl) = &file.statements[0].kind else {
        panic!("expected an enum");
    };
    assert!(decl.is_const);
    assert_eq!(decl.members.len(), 4);
    assert_eq!(decl.members[0].initializer, None);
    assert!(matches!(
        decl.members[1].initializer,
        Some(ConstExpr::Binary { op: BinaryOp::Shl, .. })
    ));
    assert!(matches!(
        decl.members[2].initializer,
        Some(ConstExpr::Binary { op: BinaryOp::BitOr, .. })
    ));
    assert_eq!(decl.members[3].initializer, Some(ConstExpr::Str("c".into())));
}

#[test]
fn test_leading_comments() {
    let input = r#"
interface A {} // trailing
// first
/* second */
interface B {}
"#;
    let (file, errors) = parse(input);
    assert_eq!(errors, vec![]);
    let comments: Vec<&str> = file.statements[1]
        .comments
        .iter()
        .map(|range| &input[*range])
        .collect();
    assert_eq!(comments, vec!["// first", "/* second */"]);
}

#[test]
fn test_skip_statements() {
    let input = r#"
import x = require("x");
function f(a: number): void { if (a) { return; } }
declare let y: number;
class C { m() {} }
interface D {}
"#;
    let (file, errors) = parse(input);
    assert_eq!(errors, vec![]);
    assert_eq!(file.statements.len(), 5);
    assert!(matches!(file.statements[4].kind, StmtKind::Interface(_)));
}

#[test]
fn test_parse_errors() {
    let (_, errors) = parse("type A = ;");
    assert!(matches!(errors[0], ParseError::UnexpectedToken { .. }));

    let (_, errors) = parse("/* open");
    assert!(matches!(errors[0], ParseError::UnterminatedBlockComment { .. }));

    let (file, errors) = parse("interface A { a: ; b: string; }\ninterface B {}");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        file.statements.last().map(|stmt| &stmt.kind),
        Some(StmtKind::Interface(_))
    ));
}
