//! The token.

use std::fmt;

use text_size::TextRange;

/// Parsed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Token { kind, range }
    }
}

/// Enum representing common lexeme types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords:
    /// "export"
    Export,
    /// "declare"
    Declare,
    /// "default"
    Default,
    /// "abstract"
    Abstract,
    /// "const"
    Const,
    /// "namespace"
    Namespace,
    /// "module"
    Module,
    /// "interface"
    Interface,
    /// "type"
    Type,
    /// "enum"
    Enum,
    /// "extends"
    Extends,
    /// "implements"
    Implements,
    /// "readonly"
    Readonly,
    /// "new"
    New,
    /// "typeof"
    Typeof,
    /// "keyof"
    Keyof,
    /// "this"
    This,

    // Multi-char tokens:
    /// "=>"
    FatArrow,
    /// "..."
    Ellipsis,

    // One-char tokens:
    /// ","
    Comma,
    /// ";"
    Semi,
    /// "."
    Dot,
    /// "("
    OpenParen,
    /// ")"
    CloseParen,
    /// "{"
    OpenBrace,
    /// "}"
    CloseBrace,
    /// "["
    OpenBracket,
    /// "]"
    CloseBracket,
    /// "@"
    At,
    /// "~"
    Tilde,
    /// "?"
    Question,
    /// ":"
    Colon,
    /// "="
    Assign,
    /// "!"
    Exclamation,
    /// "<"
    Lt,
    /// ">"
    Gt,
    /// "&"
    Ampersand,
    /// "|"
    VBar,
    /// "+"
    Add,
    /// "-"
    Sub,
    /// "*"
    Mul,
    /// "/"
    Div,
    /// "%"
    Rem,
    /// "^"
    Caret,

    // Literals:
    /// Identifier.
    Ident,
    /// "12", "0x1F", "1.5e3"
    Number,
    /// "'abc'", "\"abc\""
    Str,
    /// "`abc`"
    Template,

    // Trivia:
    /// "// comment"
    LineComment,
    /// `/* block comment */`
    BlockComment,
    /// Any whitespace characters sequence except line breaks.
    Whitespace,
    /// End of line (`\n`).
    Eol,

    // Errors:
    /// `/* block comment` without `*/`.
    UnterminatedBlockComment,
    /// A string literal without closing quote.
    UnterminatedStr,
    /// Unknown token, not expected by the lexer, e.g. "#"
    Unknown,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Trivia tokens are kept by the lexer, but skipped by the parser.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::LineComment | TokenKind::BlockComment | TokenKind::Whitespace | TokenKind::Eol
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Keywords are still valid property names, as in `type?: TypeNode`.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Export
                | TokenKind::Declare
                | TokenKind::Default
                | TokenKind::Abstract
                | TokenKind::Const
                | TokenKind::Namespace
                | TokenKind::Module
                | TokenKind::Interface
                | TokenKind::Type
                | TokenKind::Enum
                | TokenKind::Extends
                | TokenKind::Implements
                | TokenKind::Readonly
                | TokenKind::New
                | TokenKind::Typeof
                | TokenKind::Keyof
                | TokenKind::This
        )
    }

    pub fn is_ident_or_keyword(self) -> bool {
        self == TokenKind::Ident || self.is_keyword()
    }

    /// Open delimiters tracked when skipping a balanced token run.
    pub fn is_open_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::OpenParen | TokenKind::OpenBrace | TokenKind::OpenBracket
        )
    }

    /// Close delimiters tracked when skipping a balanced token run.
    pub fn is_close_delimiter(self) -> bool {
        matches!(
            self,
            TokenKind::CloseParen | TokenKind::CloseBrace | TokenKind::CloseBracket
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Export => "export",
            TokenKind::Declare => "declare",
            TokenKind::Default => "default",
            TokenKind::Abstract => "abstract",
            TokenKind::Const => "const",
            TokenKind::Namespace => "namespace",
            TokenKind::Module => "module",
            TokenKind::Interface => "interface",
            TokenKind::Type => "type",
            TokenKind::Enum => "enum",
            TokenKind::Extends => "extends",
            TokenKind::Implements => "implements",
            TokenKind::Readonly => "readonly",
            TokenKind::New => "new",
            TokenKind::Typeof => "typeof",
            TokenKind::Keyof => "keyof",
            TokenKind::This => "this",
            TokenKind::FatArrow => "=>",
            TokenKind::Ellipsis => "...",
            TokenKind::Comma => ",",
            TokenKind::Semi => ";",
            TokenKind::Dot => ".",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::At => "@",
            TokenKind::Tilde => "~",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Assign => "=",
            TokenKind::Exclamation => "!",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Ampersand => "&",
            TokenKind::VBar => "|",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::Rem => "%",
            TokenKind::Caret => "^",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number literal",
            TokenKind::Str => "string literal",
            TokenKind::Template => "template literal",
            TokenKind::LineComment => "line comment",
            TokenKind::BlockComment => "block comment",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Eol => "end of line",
            TokenKind::UnterminatedBlockComment => "unterminated block comment",
            TokenKind::UnterminatedStr => "unterminated string",
            TokenKind::Unknown => "unknown token",
            TokenKind::Eof => "end of file",
        };
        write!(f, "{s}")
    }
}
