//! The parser.

use compact_str::CompactString;
use text_size::{TextRange, TextSize};

use super::{
    ast::*,
    error::ParseError,
    lexer::tokenize,
    token::{Token, TokenKind},
};

/// Parse the input into AST.
///
/// Every declaration and member records its leading comments. A comment is
/// leading only if a line break separates it from the previous token, except
/// at the very start of the input where every comment counts. So a trailing
/// `// note` on the line of the previous member is never attributed to the
/// next one.
pub fn parse(input: &str) -> (SourceFile, Vec<ParseError>) {
    Parser::new(input, tokenize(input).collect()).parse()
}

struct Parser<'input> {
    input: &'input str,
    tokens: Vec<Token>,
    /// Index of the current token. Trivia before it has been skipped.
    pos: usize,
    prev_token_end: TextSize,
    expected_kinds: Vec<TokenKind>,
    errors: Vec<ParseError>,
}

impl<'input> Parser<'input> {
    /// Constructs a new `Parser` with the full token list.
    fn new(input: &'input str, tokens: Vec<Token>) -> Self {
        let mut errors = Vec::new();
        let tokens = tokens
            .into_iter()
            .filter(|token| {
                let error = match token.kind {
                    TokenKind::UnterminatedBlockComment => ParseError::UnterminatedBlockComment {
                        range: token.range,
                    },
                    TokenKind::UnterminatedStr => ParseError::UnterminatedStr { range: token.range },
                    TokenKind::Unknown => ParseError::UnknownToken { range: token.range },
                    _ => return true,
                };
                errors.push(error);
                false
            })
            .collect();
        let mut parser = Self {
            input,
            tokens,
            pos: 0,
            prev_token_end: TextSize::default(),
            expected_kinds: Vec::new(),
            errors,
        };
        parser.eat_trivia();
        parser
    }

    /// Returns the current token.
    fn current_token(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    /// Returns the kind of the current token.
    fn current_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Returns the range of the current token.
    fn current_range(&self) -> Option<TextRange> {
        self.current_token().map(|token| token.range)
    }

    /// Returns the source text of the current token.
    fn current_text(&self) -> &'input str {
        self.current_range()
            .map(|range| &self.input[range])
            .unwrap_or_default()
    }

    /// Returns the kind of the `n`th significant token after the current one.
    fn nth_kind(&self, n: usize) -> TokenKind {
        self.tokens[self.pos..]
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .nth(n)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Moves to the next token.
    fn bump(&mut self) {
        self.expected_kinds.clear();
        if let Some(range) = self.current_range() {
            self.prev_token_end = range.end();
            self.pos += 1;
        }
        self.eat_trivia();
    }

    /// Skips all trivia tokens.
    fn eat_trivia(&mut self) {
        while self
            .current_token()
            .is_some_and(|token| token.kind.is_trivia())
        {
            self.pos += 1;
        }
    }

    /// Index of the first trivia token directly before the current token.
    fn trivia_start(&self) -> usize {
        let mut first = self.pos;
        while first > 0 && self.tokens[first - 1].kind.is_trivia() {
            first -= 1;
        }
        first
    }

    /// Collects the leading comment ranges of the current token.
    fn leading_comments(&self) -> Vec<TextRange> {
        let first = self.trivia_start();
        let mut collecting = first == 0;
        let mut comments = Vec::new();
        for token in &self.tokens[first..self.pos] {
            match token.kind {
                TokenKind::Eol => collecting = true,
                kind if kind.is_comment() && collecting => comments.push(token.range),
                _ => (),
            }
        }
        comments
    }

    /// Checks if a line break separates the current token from the previous one.
    fn has_preceding_line_break(&self) -> bool {
        self.tokens[self.trivia_start()..self.pos]
            .iter()
            .any(|token| token.kind == TokenKind::Eol)
    }

    /// Checks if the current token is `t` without recording an expectation.
    fn at(&self, t: TokenKind) -> bool {
        self.current_kind().unwrap_or(TokenKind::Eof) == t
    }

    /// Checks if the current token is `t`, and returns `true` if so.
    /// This method will automatically add `t` to `expected_kinds` if `t` is not encountered.
    fn check(&mut self, t: TokenKind) -> bool {
        let is_present = self.at(t);
        if !is_present {
            self.expected_kinds.push(t);
        }
        is_present
    }

    /// Consumes a token 't' if it exists. Returns whether the given token was present.
    fn eat(&mut self, t: TokenKind) -> bool {
        let is_present = self.check(t);
        if is_present {
            self.bump();
        }
        is_present
    }

    /// Expects and consumes the token `t`. Signals an error if the next token is not `t`.
    fn expect(&mut self, t: TokenKind) -> Result<(), ParseError> {
        let is_present = self.eat(t);
        if !is_present {
            return Err(self.unexpected());
        }
        Ok(())
    }

    /// Returns an error for an unexpected token.
    fn unexpected(&mut self) -> ParseError {
        let (found, range) = self
            .current_token()
            .map(|token| (token.kind, token.range))
            .unwrap_or((TokenKind::Eof, TextRange::empty(self.prev_token_end)));

        ParseError::UnexpectedToken {
            expected: self.expected_kinds.clone(),
            found,
            range,
        }
    }

    /// Start a new range.
    fn start_range(&self) -> TextSize {
        self.current_range()
            .map(TextRange::start)
            .unwrap_or(self.prev_token_end)
    }

    /// End a new range.
    fn end_range(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_token_end.max(start))
    }

    /// Skips a balanced token run.
    ///
    /// The run ends after a `;` at depth 0, or after the `}` that brings the
    /// depth back to 0. An unmatched close delimiter is left in place.
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        while let Some(kind) = self.current_kind() {
            if kind.is_close_delimiter() {
                if depth == 0 {
                    return;
                }
                depth -= 1;
                self.bump();
                if depth == 0 && kind == TokenKind::CloseBrace {
                    return;
                }
            } else if kind.is_open_delimiter() {
                depth += 1;
                self.bump();
            } else if kind == TokenKind::Semi && depth == 0 {
                self.bump();
                return;
            } else {
                self.bump();
            }
        }
    }

    /// Skips a delimited group, e.g. `[key: string]`, including the delimiters.
    fn skip_group(&mut self, open: TokenKind) -> Result<(), ParseError> {
        self.expect(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current_kind() {
                None => return Err(self.unexpected()),
                Some(kind) if kind.is_open_delimiter() => depth += 1,
                Some(kind) if kind.is_close_delimiter() => depth -= 1,
                Some(_) => (),
            }
            self.bump();
        }
        Ok(())
    }

    /// Recovers from an error so that the loop calling it always makes progress.
    fn recover(&mut self, end: TokenKind) {
        let pos = self.pos;
        self.skip_balanced();
        if self.pos == pos && !self.at(end) && !self.at(TokenKind::Eof) {
            self.bump();
        }
    }

    /// Parse token list into AST.
    fn parse(mut self) -> (SourceFile, Vec<ParseError>) {
        let statements = self.parse_stmts(TokenKind::Eof);
        (SourceFile { statements }, self.errors)
    }

    /// Parses one or more items separated by `,`.
    fn parse_items<T, F: Fn(&mut Self) -> Result<T, ParseError>>(
        &mut self,
        parse_func: F,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        loop {
            items.push(parse_func(self)?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// Parses zero or more items separated by `,` between `start` and `end`.
    /// Allowing trailing `,`. The `end` will be consumed.
    fn parse_items_between<T, F: Fn(&mut Self) -> Result<T, ParseError>>(
        &mut self,
        start: TokenKind,
        parse_func: F,
        end: TokenKind,
    ) -> Result<Vec<T>, ParseError> {
        self.expect(start)?;
        let mut items = Vec::new();
        while !self.eat(end) {
            items.push(parse_func(self)?);
            if self.eat(end) {
                break;
            }
            self.expect(TokenKind::Comma)?;
        }
        Ok(items)
    }

    fn parse_stmts(&mut self, end_token: TokenKind) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.eat(end_token) {
            if self.at(TokenKind::Eof) {
                let e = self.unexpected();
                self.errors.push(e);
                break;
            }
            match self.parse_stmt() {
                Ok(Some(stmt)) => stmts.push(stmt),
                Ok(None) => (),
                Err(e) => {
                    self.errors.push(e);
                    self.recover(end_token);
                }
            }
        }
        stmts
    }

    fn parse_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        let comments = self.leading_comments();
        let start = self.start_range();
        if self.eat(TokenKind::Semi) {
            return Ok(None);
        }
        if self.current_kind().is_some_and(TokenKind::is_close_delimiter) {
            return Err(self.unexpected());
        }

        let mut is_const = false;
        loop {
            match self.current_kind() {
                Some(
                    TokenKind::Export
                    | TokenKind::Declare
                    | TokenKind::Default
                    | TokenKind::Abstract,
                ) => self.bump(),
                Some(TokenKind::Const) if self.nth_kind(1) == TokenKind::Enum => {
                    is_const = true;
                    self.bump();
                }
                _ => break,
            }
        }

        let next = self.nth_kind(1);
        let kind = match self.current_kind() {
            Some(TokenKind::Namespace | TokenKind::Module) if next.is_ident_or_keyword() => {
                StmtKind::Namespace(Box::new(self.parse_namespace()?))
            }
            Some(TokenKind::Interface) if next.is_ident_or_keyword() => {
                StmtKind::Interface(Box::new(self.parse_interface()?))
            }
            Some(TokenKind::Type) if next.is_ident_or_keyword() => {
                StmtKind::TypeAlias(Box::new(self.parse_type_alias()?))
            }
            Some(TokenKind::Enum) if next.is_ident_or_keyword() => {
                StmtKind::Enum(Box::new(self.parse_enum(is_const)?))
            }
            _ => {
                self.skip_balanced();
                StmtKind::Other
            }
        };
        let range = self.end_range(start);
        Ok(Some(Stmt {
            kind,
            range,
            comments,
        }))
    }

    fn parse_namespace(&mut self) -> Result<NamespaceDecl, ParseError> {
        self.bump();
        let name = self.parse_entity_name()?;
        self.expect(TokenKind::OpenBrace)?;
        let body = self.parse_stmts(TokenKind::CloseBrace);
        Ok(NamespaceDecl { name, body })
    }

    fn parse_interface(&mut self) -> Result<InterfaceDecl, ParseError> {
        self.expect(TokenKind::Interface)?;
        let name = self.parse_ident_or_keyword()?;
        let type_params = self.parse_type_params()?;
        let mut heritage_clauses = Vec::new();
        loop {
            let start = self.start_range();
            let token = if self.eat(TokenKind::Extends) {
                HeritageToken::Extends
            } else if self.eat(TokenKind::Implements) {
                HeritageToken::Implements
            } else {
                break;
            };
            let types = self.parse_items(Self::parse_expr_with_type_args)?;
            let range = self.end_range(start);
            heritage_clauses.push(HeritageClause {
                token,
                types,
                range,
            });
        }
        let members = self.parse_members()?;
        Ok(InterfaceDecl {
            name,
            type_params,
            heritage_clauses,
            members,
        })
    }

    fn parse_expr_with_type_args(&mut self) -> Result<ExprWithTypeArgs, ParseError> {
        let start = self.start_range();
        let expression = self.parse_entity_name()?;
        let type_args = self.parse_type_args()?;
        let range = self.end_range(start);
        Ok(ExprWithTypeArgs {
            expression,
            type_args,
            range,
        })
    }

    fn parse_type_alias(&mut self) -> Result<TypeAliasDecl, ParseError> {
        self.expect(TokenKind::Type)?;
        let name = self.parse_ident_or_keyword()?;
        let type_params = self.parse_type_params()?;
        self.expect(TokenKind::Assign)?;
        let ty = self.parse_type()?;
        self.eat(TokenKind::Semi);
        Ok(TypeAliasDecl {
            name,
            type_params,
            ty,
        })
    }

    fn parse_enum(&mut self, is_const: bool) -> Result<EnumDecl, ParseError> {
        self.expect(TokenKind::Enum)?;
        let name = self.parse_ident_or_keyword()?;
        self.expect(TokenKind::OpenBrace)?;
        let mut members = Vec::new();
        while !self.eat(TokenKind::CloseBrace) {
            let comments = self.leading_comments();
            let start = self.start_range();
            let member_name = self.parse_property_name()?;
            let initializer = if self.eat(TokenKind::Assign) {
                Some(self.parse_const_expr(0)?)
            } else {
                None
            };
            let range = self.end_range(start);
            members.push(EnumMember {
                name: member_name,
                initializer,
                range,
                comments,
            });
            if !self.eat(TokenKind::Comma) {
                self.expect(TokenKind::CloseBrace)?;
                break;
            }
        }
        Ok(EnumDecl {
            name,
            is_const,
            members,
        })
    }

    /// Parses the members of an interface or a type literal, including braces.
    fn parse_members(&mut self) -> Result<Vec<Member>, ParseError> {
        self.expect(TokenKind::OpenBrace)?;
        let mut members = Vec::new();
        while !self.eat(TokenKind::CloseBrace) {
            if self.at(TokenKind::Eof) {
                return Err(self.unexpected());
            }
            let comments = self.leading_comments();
            let start = self.start_range();
            match self.parse_member_kind() {
                Ok(kind) => {
                    if !self.eat(TokenKind::Semi) {
                        self.eat(TokenKind::Comma);
                    }
                    let range = self.end_range(start);
                    members.push(Member {
                        kind,
                        range,
                        comments,
                    });
                }
                Err(e) => {
                    self.errors.push(e);
                    self.recover(TokenKind::CloseBrace);
                }
            }
        }
        Ok(members)
    }

    fn parse_member_kind(&mut self) -> Result<MemberKind, ParseError> {
        match self.current_kind() {
            Some(TokenKind::OpenBracket) => {
                self.skip_group(TokenKind::OpenBracket)?;
                if self.at(TokenKind::OpenParen) || self.at(TokenKind::Lt) {
                    // Computed method name, e.g. `[Symbol.iterator](): T`.
                    self.parse_signature()?;
                    return Ok(MemberKind::Index);
                }
                if self.at(TokenKind::Add) || self.at(TokenKind::Sub) {
                    self.bump();
                }
                self.eat(TokenKind::Question);
                if self.eat(TokenKind::Colon) {
                    self.parse_type()?;
                }
                Ok(MemberKind::Index)
            }
            Some(TokenKind::OpenParen | TokenKind::Lt) => {
                Ok(MemberKind::Call(self.parse_signature()?))
            }
            Some(TokenKind::New) if matches!(self.nth_kind(1), TokenKind::OpenParen | TokenKind::Lt) => {
                self.bump();
                Ok(MemberKind::Construct(self.parse_signature()?))
            }
            _ => {
                let readonly = self.at(TokenKind::Readonly) && self.is_property_name_start(1);
                if readonly {
                    self.bump();
                }
                let name = self.parse_property_name()?;
                let optional = self.eat(TokenKind::Question);
                if !optional {
                    self.eat(TokenKind::Exclamation);
                }
                if self.at(TokenKind::OpenParen) || self.at(TokenKind::Lt) {
                    let signature = self.parse_signature()?;
                    return Ok(MemberKind::Method(MethodSignature {
                        name,
                        optional,
                        signature,
                    }));
                }
                let ty = if self.eat(TokenKind::Colon) {
                    Some(self.parse_type()?)
                } else {
                    None
                };
                Ok(MemberKind::Property(PropertySignature {
                    name,
                    optional,
                    readonly,
                    ty,
                }))
            }
        }
    }

    fn is_property_name_start(&self, n: usize) -> bool {
        let kind = self.nth_kind(n);
        kind.is_ident_or_keyword() || matches!(kind, TokenKind::Str | TokenKind::Number)
    }

    /// Parses `<T>(params): R`, the return type is optional.
    fn parse_signature(&mut self) -> Result<Signature, ParseError> {
        let type_params = self.parse_type_params()?;
        let params =
            self.parse_items_between(TokenKind::OpenParen, Self::parse_param, TokenKind::CloseParen)?;
        let returns = if self.eat(TokenKind::Colon) {
            Some(Box::new(self.parse_return_type()?))
        } else {
            None
        };
        Ok(Signature {
            type_params,
            params,
            returns,
        })
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let rest = self.eat(TokenKind::Ellipsis);
        if self.at(TokenKind::Readonly) && self.nth_kind(1).is_ident_or_keyword() {
            self.bump();
        }
        let name = if self.at(TokenKind::OpenBrace) || self.at(TokenKind::OpenBracket) {
            // Binding patterns have no single name.
            let start = self.start_range();
            let open = self.current_kind().unwrap_or(TokenKind::OpenBrace);
            self.skip_group(open)?;
            Ident {
                name: CompactString::default(),
                range: self.end_range(start),
            }
        } else {
            self.parse_ident_or_keyword()?
        };
        let optional = self.eat(TokenKind::Question);
        let ty = if self.eat(TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        if self.eat(TokenKind::Assign) {
            self.parse_const_expr(0)?;
        }
        Ok(Param {
            name,
            rest,
            optional,
            ty,
        })
    }

    fn parse_type_params(&mut self) -> Result<Vec<TypeParam>, ParseError> {
        if !self.at(TokenKind::Lt) {
            return Ok(Vec::new());
        }
        self.parse_items_between(TokenKind::Lt, Self::parse_type_param, TokenKind::Gt)
    }

    fn parse_type_param(&mut self) -> Result<TypeParam, ParseError> {
        // `const T`, `in T` and `out T` variance modifiers.
        while (self.at(TokenKind::Const) || matches!(self.current_text(), "in" | "out"))
            && self.nth_kind(1).is_ident_or_keyword()
        {
            self.bump();
        }
        let name = self.parse_ident_or_keyword()?;
        let constraint = if self.eat(TokenKind::Extends) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let default = if self.eat(TokenKind::Assign) {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(TypeParam {
            name,
            constraint,
            default,
        })
    }

    fn parse_type_args(&mut self) -> Result<Vec<Ty>, ParseError> {
        if !self.at(TokenKind::Lt) {
            return Ok(Vec::new());
        }
        self.parse_items_between(TokenKind::Lt, Self::parse_type, TokenKind::Gt)
    }

    /// Parses a return type, which may be a type predicate `x is T`.
    fn parse_return_type(&mut self) -> Result<Ty, ParseError> {
        let is_predicate = (self.at(TokenKind::Ident) || self.at(TokenKind::This))
            && self.nth_kind(1) == TokenKind::Ident
            && self.nth_text(1) == "is";
        if !is_predicate {
            return self.parse_type();
        }
        let start = self.start_range();
        let param = self.parse_ident_or_keyword()?;
        self.bump();
        let ty = Box::new(self.parse_type()?);
        Ok(Ty {
            kind: TyKind::Predicate { param, ty },
            range: self.end_range(start),
        })
    }

    /// Returns the source text of the `n`th significant token after the current one.
    fn nth_text(&self, n: usize) -> &'input str {
        self.tokens[self.pos..]
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .nth(n)
            .map(|token| &self.input[token.range])
            .unwrap_or_default()
    }

    fn parse_type(&mut self) -> Result<Ty, ParseError> {
        if self.is_start_of_function_type() {
            return self.parse_function_type(false);
        }
        if self.at(TokenKind::New) {
            return self.parse_function_type(true);
        }
        self.parse_union_or_intersection(TokenKind::VBar)
    }

    /// Checks for `<T>(...) =>` or `(...) =>`.
    fn is_start_of_function_type(&self) -> bool {
        match self.current_kind() {
            Some(TokenKind::Lt) => true,
            Some(TokenKind::OpenParen) => {
                let mut depth = 0usize;
                let mut significant = self.tokens[self.pos..]
                    .iter()
                    .filter(|token| !token.kind.is_trivia());
                for token in significant.by_ref() {
                    if token.kind.is_open_delimiter() {
                        depth += 1;
                    } else if token.kind.is_close_delimiter() {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            break;
                        }
                    }
                }
                significant
                    .next()
                    .is_some_and(|token| token.kind == TokenKind::FatArrow)
            }
            _ => false,
        }
    }

    fn parse_function_type(&mut self, is_constructor: bool) -> Result<Ty, ParseError> {
        let start = self.start_range();
        if is_constructor {
            self.expect(TokenKind::New)?;
        }
        let type_params = self.parse_type_params()?;
        let params =
            self.parse_items_between(TokenKind::OpenParen, Self::parse_param, TokenKind::CloseParen)?;
        self.expect(TokenKind::FatArrow)?;
        let returns = Some(Box::new(self.parse_return_type()?));
        Ok(Ty {
            kind: TyKind::Function {
                is_constructor,
                signature: Signature {
                    type_params,
                    params,
                    returns,
                },
            },
            range: self.end_range(start),
        })
    }

    /// Parses `A | B` when `operator` is `|`, and `A & B` when it is `&`.
    ///
    /// A leading operator always produces a union or intersection node, even
    /// with a single constituent.
    fn parse_union_or_intersection(&mut self, operator: TokenKind) -> Result<Ty, ParseError> {
        let start = self.start_range();
        let has_leading_operator = self.eat(operator);
        let first = self.parse_constituent(operator)?;
        if !self.at(operator) && !has_leading_operator {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(operator) {
            types.push(self.parse_constituent(operator)?);
        }
        let kind = if operator == TokenKind::VBar {
            TyKind::Union(types)
        } else {
            TyKind::Intersection(types)
        };
        Ok(Ty {
            kind,
            range: self.end_range(start),
        })
    }

    fn parse_constituent(&mut self, operator: TokenKind) -> Result<Ty, ParseError> {
        if self.is_start_of_function_type() {
            return self.parse_function_type(false);
        }
        if operator == TokenKind::VBar {
            self.parse_union_or_intersection(TokenKind::Ampersand)
        } else {
            self.parse_postfix_type()
        }
    }

    fn parse_postfix_type(&mut self) -> Result<Ty, ParseError> {
        let start = self.start_range();
        let mut ty = self.parse_primary_type()?;
        while self.at(TokenKind::OpenBracket) && !self.has_preceding_line_break() {
            self.bump();
            let kind = if self.eat(TokenKind::CloseBracket) {
                TyKind::Array(Box::new(ty))
            } else {
                let index = self.parse_type()?;
                self.expect(TokenKind::CloseBracket)?;
                TyKind::IndexedAccess {
                    object: Box::new(ty),
                    index: Box::new(index),
                }
            };
            ty = Ty {
                kind,
                range: self.end_range(start),
            };
        }
        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> Result<Ty, ParseError> {
        let start = self.start_range();
        let kind = match self.current_kind() {
            Some(TokenKind::OpenParen) => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect(TokenKind::CloseParen)?;
                TyKind::Paren(Box::new(inner))
            }
            Some(TokenKind::OpenBrace) => TyKind::Literal(self.parse_members()?),
            Some(TokenKind::OpenBracket) => TyKind::Tuple(self.parse_items_between(
                TokenKind::OpenBracket,
                Self::parse_tuple_element,
                TokenKind::CloseBracket,
            )?),
            Some(TokenKind::Str | TokenKind::Number | TokenKind::Template) => {
                self.bump();
                TyKind::LiteralValue
            }
            Some(TokenKind::Sub) if self.nth_kind(1) == TokenKind::Number => {
                self.bump();
                self.bump();
                TyKind::LiteralValue
            }
            Some(TokenKind::This) => {
                self.bump();
                TyKind::This
            }
            Some(TokenKind::Typeof) => {
                self.bump();
                TyKind::Query(self.parse_entity_name()?)
            }
            Some(TokenKind::Keyof) => {
                self.bump();
                TyKind::Keyof(Box::new(self.parse_postfix_type()?))
            }
            Some(TokenKind::Readonly) => {
                // `readonly T[]` has the shape of the array it modifies.
                self.bump();
                let inner = self.parse_postfix_type()?;
                return Ok(Ty {
                    kind: inner.kind,
                    range: self.end_range(start),
                });
            }
            Some(TokenKind::Ident) => {
                let text = self.current_text();
                let keyword = KeywordType::from_name(text);
                if matches!(text, "true" | "false") {
                    self.bump();
                    TyKind::LiteralValue
                } else if let Some(keyword) = keyword.filter(|_| self.nth_kind(1) != TokenKind::Dot) {
                    self.bump();
                    TyKind::Keyword(keyword)
                } else {
                    let name = self.parse_entity_name()?;
                    let type_args = self.parse_type_args()?;
                    TyKind::Reference(TypeReference { name, type_args })
                }
            }
            _ => {
                self.expected_kinds.extend([
                    TokenKind::Ident,
                    TokenKind::OpenParen,
                    TokenKind::OpenBrace,
                    TokenKind::OpenBracket,
                ]);
                return Err(self.unexpected());
            }
        };
        Ok(Ty {
            kind,
            range: self.end_range(start),
        })
    }

    /// Parses `T`, `name: T`, `name?: T` or `...T` inside a tuple.
    fn parse_tuple_element(&mut self) -> Result<Ty, ParseError> {
        self.eat(TokenKind::Ellipsis);
        let is_labeled = self.current_kind().is_some_and(TokenKind::is_ident_or_keyword)
            && (self.nth_kind(1) == TokenKind::Colon
                || (self.nth_kind(1) == TokenKind::Question && self.nth_kind(2) == TokenKind::Colon));
        if is_labeled {
            self.bump();
            self.eat(TokenKind::Question);
            self.expect(TokenKind::Colon)?;
        }
        let ty = self.parse_type()?;
        self.eat(TokenKind::Question);
        Ok(ty)
    }

    fn parse_ident_or_keyword(&mut self) -> Result<Ident, ParseError> {
        if !self.current_kind().is_some_and(TokenKind::is_ident_or_keyword) {
            self.expected_kinds.push(TokenKind::Ident);
            return Err(self.unexpected());
        }
        Ok(self.bump_ident())
    }

    /// Consumes the current token as an identifier.
    fn bump_ident(&mut self) -> Ident {
        let range = self.current_range().unwrap_or_default();
        let name = CompactString::new(&self.input[range]);
        self.bump();
        Ident { name, range }
    }

    /// Parses an identifier, a keyword, a string or a number used as a name.
    fn parse_property_name(&mut self) -> Result<Ident, ParseError> {
        match self.current_kind() {
            Some(TokenKind::Str) => {
                let range = self.current_range().unwrap_or_default();
                let text = &self.input[range];
                let name = CompactString::new(&text[1..text.len() - 1]);
                self.bump();
                Ok(Ident { name, range })
            }
            Some(TokenKind::Number) => Ok(self.bump_ident()),
            _ => self.parse_ident_or_keyword(),
        }
    }

    fn parse_entity_name(&mut self) -> Result<EntityName, ParseError> {
        let start = self.start_range();
        let mut parts = vec![self.parse_ident_or_keyword()?];
        while self.eat(TokenKind::Dot) {
            parts.push(self.parse_ident_or_keyword()?);
        }
        Ok(EntityName {
            parts,
            range: self.end_range(start),
        })
    }

    /// Returns the binary operator at the current position and how many tokens it spans.
    ///
    /// Shift operators are lexed as adjacent `<` or `>` tokens.
    fn peek_binary_op(&self) -> Option<(BinaryOp, usize)> {
        let adjacent = |n: usize, kind: TokenKind| {
            self.tokens
                .get(self.pos + n)
                .is_some_and(|token| token.kind == kind)
        };
        let op = match self.current_kind()? {
            TokenKind::VBar => (BinaryOp::BitOr, 1),
            TokenKind::Caret => (BinaryOp::BitXor, 1),
            TokenKind::Ampersand => (BinaryOp::BitAnd, 1),
            TokenKind::Add => (BinaryOp::Add, 1),
            TokenKind::Sub => (BinaryOp::Sub, 1),
            TokenKind::Mul => (BinaryOp::Mul, 1),
            TokenKind::Div => (BinaryOp::Div, 1),
            TokenKind::Rem => (BinaryOp::Rem, 1),
            TokenKind::Lt if adjacent(1, TokenKind::Lt) => (BinaryOp::Shl, 2),
            TokenKind::Gt if adjacent(1, TokenKind::Gt) && adjacent(2, TokenKind::Gt) => {
                (BinaryOp::UShr, 3)
            }
            TokenKind::Gt if adjacent(1, TokenKind::Gt) => (BinaryOp::Shr, 2),
            _ => return None,
        };
        Some(op)
    }

    /// Parses a constant expression by precedence climbing.
    fn parse_const_expr(&mut self, min_precedence: u8) -> Result<ConstExpr, ParseError> {
        let mut left = self.parse_const_unary()?;
        while let Some((op, len)) = self.peek_binary_op() {
            if op.precedence() <= min_precedence {
                break;
            }
            for _ in 0..len {
                self.bump();
            }
            let right = self.parse_const_expr(op.precedence())?;
            left = ConstExpr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_const_unary(&mut self) -> Result<ConstExpr, ParseError> {
        let op = match self.current_kind() {
            Some(TokenKind::Add) => UnaryOp::Plus,
            Some(TokenKind::Sub) => UnaryOp::Neg,
            Some(TokenKind::Tilde) => UnaryOp::BitNot,
            _ => return self.parse_const_primary(),
        };
        self.bump();
        let operand = self.parse_const_unary()?;
        Ok(ConstExpr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_const_primary(&mut self) -> Result<ConstExpr, ParseError> {
        match self.current_kind() {
            Some(TokenKind::Number) => {
                let Some(value) = parse_number(self.current_text()) else {
                    return Err(self.unexpected());
                };
                self.bump();
                Ok(ConstExpr::Number(value))
            }
            Some(TokenKind::Str) => {
                let name = self.parse_property_name()?;
                Ok(ConstExpr::Str(name.name))
            }
            Some(TokenKind::OpenParen) => {
                self.bump();
                let expr = self.parse_const_expr(0)?;
                self.expect(TokenKind::CloseParen)?;
                Ok(expr)
            }
            _ => Ok(ConstExpr::Name(self.parse_entity_name()?)),
        }
    }
}

/// Parses the text of a number literal.
fn parse_number(text: &str) -> Option<f64> {
    let text = text.replace('_', "");
    let radix = match text.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return text.parse().ok(),
    };
    u64::from_str_radix(&text[2..], radix)
        .ok()
        .map(|value| value as f64)
}
