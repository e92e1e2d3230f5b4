//! The schema Abstract Syntax Tree (AST).
//!
//! Only the declaration subset of the language is represented. Statements that
//! are not declarations are kept as [`StmtKind::Other`] with their range.

use std::fmt;

use compact_str::CompactString;
use text_size::TextRange;

use crate::utils::Join;

/// The root AST node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    pub statements: Vec<Stmt>,
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: CompactString,
    pub range: TextRange,
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A possibly qualified name, e.g. `ts.SyntaxKind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityName {
    pub parts: Vec<Ident>,
    pub range: TextRange,
}

impl EntityName {
    /// The rightmost identifier.
    pub fn last(&self) -> &Ident {
        // The parser never produces an empty entity name.
        &self.parts[self.parts.len() - 1]
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.iter().join("."))
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub range: TextRange,
    /// Leading comment ranges, see [`crate::schema::parse`].
    pub comments: Vec<TextRange>,
}

/// Kind of statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    Namespace(Box<NamespaceDecl>),
    Interface(Box<InterfaceDecl>),
    TypeAlias(Box<TypeAliasDecl>),
    Enum(Box<EnumDecl>),
    /// Anything else, skipped without interpretation.
    Other,
}

/// `namespace a.b { ... }` or `module a { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub name: EntityName,
    pub body: Vec<Stmt>,
}

/// `interface Name<T> extends Base { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: Ident,
    pub type_params: Vec<TypeParam>,
    pub heritage_clauses: Vec<HeritageClause>,
    pub members: Vec<Member>,
}

/// `type Name<T> = Ty;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAliasDecl {
    pub name: Ident,
    pub type_params: Vec<TypeParam>,
    pub ty: Ty,
}

/// `enum Name { ... }` or `const enum Name { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: Ident,
    pub is_const: bool,
    pub members: Vec<EnumMember>,
}

/// An enum member with optional initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: Ident,
    pub initializer: Option<ConstExpr>,
    pub range: TextRange,
    pub comments: Vec<TextRange>,
}

/// A type parameter, `T extends C = D`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: Ident,
    pub constraint: Option<Ty>,
    pub default: Option<Ty>,
}

/// Token of a heritage clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeritageToken {
    Extends,
    Implements,
}

/// `extends A, B<C>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeritageClause {
    pub token: HeritageToken,
    pub types: Vec<ExprWithTypeArgs>,
    pub range: TextRange,
}

/// An entry of a heritage clause, e.g. `NodeArray<Node>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprWithTypeArgs {
    pub expression: EntityName,
    pub type_args: Vec<Ty>,
    pub range: TextRange,
}

/// A member of an interface or a type literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub range: TextRange,
    /// Leading comment ranges.
    pub comments: Vec<TextRange>,
}

impl Member {
    /// The name of a property or method member.
    pub fn name(&self) -> Option<&Ident> {
        match &self.kind {
            MemberKind::Property(property) => Some(&property.name),
            MemberKind::Method(method) => Some(&method.name),
            MemberKind::Call(_) | MemberKind::Construct(_) | MemberKind::Index => None,
        }
    }
}

/// Kind of member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// `name?: Ty`
    Property(PropertySignature),
    /// `name?(params): Ty`
    Method(MethodSignature),
    /// `(params): Ty`
    Call(Signature),
    /// `new (params): Ty`
    Construct(Signature),
    /// `[key: string]: Ty` or `[K in T]: Ty`
    Index,
}

/// `readonly name?: Ty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    pub name: Ident,
    pub optional: bool,
    pub readonly: bool,
    /// Missing for malformed declarations such as `name;`.
    pub ty: Option<Ty>,
}

/// `name?<T>(params): Ty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: Ident,
    pub optional: bool,
    pub signature: Signature,
}

/// Type parameters, parameters and return type of a callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub type_params: Vec<TypeParam>,
    pub params: Vec<Param>,
    pub returns: Option<Box<Ty>>,
}

/// A parameter of a signature or function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Ident,
    pub rest: bool,
    pub optional: bool,
    pub ty: Option<Ty>,
}

/// A type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ty {
    pub kind: TyKind,
    pub range: TextRange,
}

/// Kind of type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TyKind {
    /// `A.B<C>`
    Reference(TypeReference),
    /// `A | B`
    Union(Vec<Ty>),
    /// `A & B`
    Intersection(Vec<Ty>),
    /// `T[]`
    Array(Box<Ty>),
    /// `T[K]`
    IndexedAccess { object: Box<Ty>, index: Box<Ty> },
    /// `[A, B]`
    Tuple(Vec<Ty>),
    /// `(T)`
    Paren(Box<Ty>),
    /// `(a: A) => R` or `new (a: A) => R`
    Function {
        is_constructor: bool,
        signature: Signature,
    },
    /// `{ a: A }`
    Literal(Vec<Member>),
    /// `"a"`, `1`, `-1`
    LiteralValue,
    /// `string`, `number`, `any`, ...
    Keyword(KeywordType),
    /// `this`
    This,
    /// `typeof a.b`
    Query(EntityName),
    /// `keyof T`
    Keyof(Box<Ty>),
    /// `x is T`
    Predicate { param: Ident, ty: Box<Ty> },
}

/// `A.B<C>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    pub name: EntityName,
    pub type_args: Vec<Ty>,
}

/// Predefined type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordType {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
}

impl KeywordType {
    pub fn from_name(name: &str) -> Option<KeywordType> {
        let keyword = match name {
            "any" => KeywordType::Any,
            "unknown" => KeywordType::Unknown,
            "never" => KeywordType::Never,
            "void" => KeywordType::Void,
            "undefined" => KeywordType::Undefined,
            "null" => KeywordType::Null,
            "string" => KeywordType::String,
            "number" => KeywordType::Number,
            "boolean" => KeywordType::Boolean,
            "bigint" => KeywordType::BigInt,
            "symbol" => KeywordType::Symbol,
            "object" => KeywordType::Object,
            _ => return None,
        };
        Some(keyword)
    }
}

/// A constant expression of an enum member initializer.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstExpr {
    Number(f64),
    Str(CompactString),
    /// `A` or `E.A`
    Name(EntityName),
    Unary {
        op: UnaryOp,
        operand: Box<ConstExpr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<ConstExpr>,
        right: Box<ConstExpr>,
    },
}

// Number literals are never NaN, so the equality is total.
impl Eq for ConstExpr {}

/// Unary operator of a constant expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Neg,
    /// `~`
    BitNot,
}

/// Binary operator of a constant expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
}

impl BinaryOp {
    /// Binding power, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::BitOr => 1,
            BinaryOp::BitXor => 2,
            BinaryOp::BitAnd => 3,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 6,
        }
    }
}
