//! The binder.
//!
//! Builds the symbol table of a schema and evaluates enum constant values.
//!
//! Enum values follow ECMAScript number semantics: arithmetic is done on
//! `f64`, bitwise operators convert their operands to 32-bit integers first.

use compact_str::CompactString;
use text_size::TextRange;

use crate::schema::ast::*;

use super::{
    index::SymbolId,
    semantic::{DeclKind, Declaration, Semantic, Symbol, SymbolKind, SymbolTable},
};

/// Build the symbol table of `file`.
pub fn bind<'a>(source: &'a str, file: &'a SourceFile) -> Semantic<'a> {
    let mut binder = Binder {
        semantic: Semantic::new(source),
    };
    binder.bind_stmts(&file.statements, None);
    binder.semantic
}

struct Binder<'a> {
    semantic: Semantic<'a>,
}

impl<'a> Binder<'a> {
    fn table_mut(&mut self, scope: Option<SymbolId>) -> &mut SymbolTable {
        match scope {
            Some(symbol_id) => &mut self.semantic.symbols[symbol_id].exports,
            None => &mut self.semantic.globals,
        }
    }

    /// Binds a declaration to the symbol named `name` in `scope`, creating it if needed.
    fn declare(
        &mut self,
        scope: Option<SymbolId>,
        name: &CompactString,
        kind: DeclKind<'a>,
        comments: &'a [TextRange],
    ) -> SymbolId {
        let symbol_id = match self.semantic.table(scope).get(name) {
            Some(symbol_id) => *symbol_id,
            None => {
                let symbol_id = self.semantic.symbols.push(Symbol {
                    name: name.clone(),
                    kind: kind.symbol_kind(),
                    declarations: Vec::new(),
                    parent: scope,
                    exports: SymbolTable::default(),
                    value: None,
                });
                self.table_mut(scope).insert(name.clone(), symbol_id);
                symbol_id
            }
        };
        let decl_id = self.semantic.decls.push(Declaration {
            kind,
            symbol_id,
            scope,
            comments,
        });
        self.semantic.symbols[symbol_id].declarations.push(decl_id);
        symbol_id
    }

    fn bind_stmts(&mut self, stmts: &'a [Stmt], scope: Option<SymbolId>) {
        for stmt in stmts {
            let comments = stmt.comments.as_slice();
            match &stmt.kind {
                StmtKind::Namespace(decl) => {
                    // `namespace a.b {}` declares `b` inside `a`.
                    let mut inner = scope;
                    for part in &decl.name.parts {
                        inner = Some(self.declare(
                            inner,
                            &part.name,
                            DeclKind::Namespace(decl),
                            comments,
                        ));
                    }
                    self.bind_stmts(&decl.body, inner);
                }
                StmtKind::Interface(decl) => {
                    self.declare(scope, &decl.name.name, DeclKind::Interface(decl), comments);
                }
                StmtKind::TypeAlias(decl) => {
                    self.declare(scope, &decl.name.name, DeclKind::TypeAlias(decl), comments);
                }
                StmtKind::Enum(decl) => {
                    let enum_id =
                        self.declare(scope, &decl.name.name, DeclKind::Enum(decl), comments);
                    self.bind_enum_members(enum_id, decl);
                }
                StmtKind::Other => (),
            }
        }
    }

    /// Binds enum members in order, so an initializer only sees earlier members.
    fn bind_enum_members(&mut self, enum_id: SymbolId, decl: &'a EnumDecl) {
        let mut prev: Option<Option<f64>> = None;
        for member in &decl.members {
            let value = match &member.initializer {
                Some(initializer) => self.evaluate(initializer, Some(enum_id)),
                None => match prev {
                    None => Some(0.0),
                    Some(prev) => prev.map(|value| value + 1.0),
                },
            };
            let member_id = self.declare(
                Some(enum_id),
                &member.name.name,
                DeclKind::EnumMember(member),
                &member.comments,
            );
            self.semantic.symbols[member_id].value = value;
            prev = Some(value);
        }
    }

    fn evaluate(&self, expr: &ConstExpr, scope: Option<SymbolId>) -> Option<f64> {
        match expr {
            ConstExpr::Number(value) => Some(*value),
            ConstExpr::Str(_) => None,
            ConstExpr::Name(name) => {
                let symbol_id = self.semantic.resolve_entity_name(scope, name)?;
                let symbol = &self.semantic.symbols[symbol_id];
                if symbol.kind == SymbolKind::EnumMember {
                    symbol.value
                } else {
                    None
                }
            }
            ConstExpr::Unary { op, operand } => {
                let value = self.evaluate(operand, scope)?;
                Some(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Neg => -value,
                    UnaryOp::BitNot => f64::from(!to_int32(value)),
                })
            }
            ConstExpr::Binary { op, left, right } => {
                let left = self.evaluate(left, scope)?;
                let right = self.evaluate(right, scope)?;
                Some(eval_binary(*op, left, right))
            }
        }
    }
}

fn eval_binary(op: BinaryOp, left: f64, right: f64) -> f64 {
    let shift = to_uint32(right) & 0x1F;
    match op {
        BinaryOp::BitOr => f64::from(to_int32(left) | to_int32(right)),
        BinaryOp::BitXor => f64::from(to_int32(left) ^ to_int32(right)),
        BinaryOp::BitAnd => f64::from(to_int32(left) & to_int32(right)),
        BinaryOp::Shl => f64::from(to_int32(left).wrapping_shl(shift)),
        BinaryOp::Shr => f64::from(to_int32(left) >> shift),
        BinaryOp::UShr => f64::from(to_uint32(left) >> shift),
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => left / right,
        BinaryOp::Rem => left % right,
    }
}

/// ECMAScript `ToUint32`.
fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// ECMAScript `ToInt32`.
fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int32_conversion() {
        assert_eq!(to_int32(-1.0), -1);
        assert_eq!(to_int32(4_294_967_295.0), -1);
        assert_eq!(to_uint32(-1.0), u32::MAX);
        assert_eq!(to_int32(2.9), 2);
        assert_eq!(to_int32(f64::NAN), 0);
    }

    #[test]
    fn test_eval_binary() {
        assert_eq!(eval_binary(BinaryOp::Shl, 1.0, 31.0), -2_147_483_648.0);
        assert_eq!(eval_binary(BinaryOp::UShr, -1.0, 28.0), 15.0);
        assert_eq!(eval_binary(BinaryOp::Shr, -16.0, 2.0), -4.0);
        assert_eq!(eval_binary(BinaryOp::Shl, 1.0, 33.0), 2.0);
        assert_eq!(eval_binary(BinaryOp::BitOr, 1.5, 2.0), 3.0);
        assert_eq!(eval_binary(BinaryOp::Div, 1.0, 2.0), 0.5);
    }
}
