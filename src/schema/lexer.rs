//! The lexer.

use std::str::Chars;

use text_size::{TextRange, TextSize};

use super::token::{
    Token,
    TokenKind::{self, *},
};

/// Peekable iterator over a char sequence.
///
/// Next characters can be peeked via `first` method,
/// and position can be shifted forward via `bump` method.
struct Cursor<'a> {
    /// The input string.
    input: &'a str,
    /// Iterator over chars. Slightly faster than a &str.
    chars: Chars<'a>,
    #[cfg(debug_assertions)]
    prev: char,
}

const EOF_CHAR: char = '\0';

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Cursor<'a> {
        Cursor {
            input,
            chars: input.chars(),
            #[cfg(debug_assertions)]
            prev: EOF_CHAR,
        }
    }

    /// Returns the last eaten symbol (or `'\0'` in release builds).
    /// (For debug assertions only.)
    fn prev(&self) -> char {
        #[cfg(debug_assertions)]
        {
            self.prev
        }

        #[cfg(not(debug_assertions))]
        {
            EOF_CHAR
        }
    }

    /// Peeks the next symbol from the input stream without consuming it.
    /// If requested position doesn't exist, `EOF_CHAR` is returned.
    /// However, getting `EOF_CHAR` doesn't always mean actual end of file,
    /// it should be checked with `is_eof` method.
    fn first(&self) -> char {
        // `.next()` optimizes better than `.nth(0)`
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    /// Peeks the second symbol from the input stream without consuming it.
    fn second(&self) -> char {
        // `.next()` optimizes better than `.nth(1)`
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().unwrap_or(EOF_CHAR)
    }

    /// Checks if there is nothing more to consume.
    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    /// Returns position of cursor.
    fn pos(&self) -> TextSize {
        // Inputs larger than 4 GiB are rejected by `tokenize`.
        TextSize::new((self.input.len() - self.chars.as_str().len()) as u32)
    }

    /// Moves to the next character.
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;

        #[cfg(debug_assertions)]
        {
            self.prev = c;
        }

        Some(c)
    }

    /// Eats `c` if it matches.
    fn eat(&mut self, c: char) -> bool {
        if self.first() == c {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Eats symbols while predicate returns true or until the end of file is reached.
    fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while predicate(self.first()) && !self.is_eof() {
            self.bump();
        }
    }
}

/// Creates an iterator that produces tokens from the input string.
///
/// Trivia tokens are included, the parser needs them to attach leading comments.
///
/// # Panics
///
/// Panics if the input is larger than `u32::MAX` bytes.
pub fn tokenize(input: &str) -> impl Iterator<Item = Token> + '_ {
    assert!(u32::try_from(input.len()).is_ok(), "input is too large");
    let mut cursor = Cursor::new(input);
    std::iter::from_fn(move || {
        let token = cursor.advance_token();
        if token.kind != TokenKind::Eof {
            Some(token)
        } else {
            None
        }
    })
}

/// True if `c` is a line break according to the ECMAScript definition.
pub fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// True if `c` is a whitespace other than a line break.
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        // Usual ASCII suspects
        '\u{0009}'   // \t
        | '\u{000B}' // vertical tab
        | '\u{000C}' // form feed
        | '\u{0020}' // space

        // NO-BREAK SPACE from latin1
        | '\u{00A0}'

        // NEXT LINE from latin1
        | '\u{0085}'

        // Dedicated whitespace characters from Unicode
        | '\u{1680}'
        | '\u{2000}'..='\u{200B}'
        | '\u{202F}'
        | '\u{205F}'
        | '\u{3000}'

        // ZERO WIDTH NO-BREAK SPACE (byte order mark)
        | '\u{FEFF}'
    )
}

/// True if `c` is valid as a first character of an identifier.
pub fn is_id_start(c: char) -> bool {
    // This is XID_Start OR '_' OR '$'.
    c == '_' || c == '$' || unicode_ident::is_xid_start(c)
}

/// True if `c` is valid as a non-first character of an identifier.
pub fn is_id_continue(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

impl Cursor<'_> {
    /// Parses a token from the input string.
    fn advance_token(&mut self) -> Token {
        let start = self.pos();
        let Some(first_char) = self.bump() else {
            return Token::new(TokenKind::Eof, TextRange::empty(start));
        };
        let token_kind = match first_char {
            // Div, comment or block comment.
            '/' => match self.first() {
                '/' => self.line_comment(),
                '*' => self.block_comment(),
                _ => Div,
            },

            // Assign or FatArrow.
            '=' => {
                if self.eat('>') {
                    FatArrow
                } else {
                    Assign
                }
            }

            // Dot, Ellipsis or a number like `.5`.
            '.' => {
                if self.first() == '.' && self.second() == '.' {
                    self.bump();
                    self.bump();
                    Ellipsis
                } else if self.first().is_ascii_digit() {
                    self.eat_decimal_digits();
                    self.number_suffix()
                } else {
                    Dot
                }
            }

            // Line breaks.
            c if is_line_break(c) => self.eol(),

            // Whitespace sequence.
            c if is_whitespace(c) => self.whitespace(),

            // Identifier or keyword.
            c if is_id_start(c) => self.ident_or_keyword(start),

            // Numeric literal.
            c @ '0'..='9' => self.number(c),

            // String literal.
            c @ ('"' | '\'') => self.string(c),

            // Template literal.
            '`' => self.template(),

            // One-symbol tokens.
            ',' => Comma,
            ';' => Semi,
            '(' => OpenParen,
            ')' => CloseParen,
            '{' => OpenBrace,
            '}' => CloseBrace,
            '[' => OpenBracket,
            ']' => CloseBracket,
            '@' => At,
            '~' => Tilde,
            '?' => Question,
            ':' => Colon,
            '!' => Exclamation,
            '<' => Lt,
            '>' => Gt,
            '&' => Ampersand,
            '|' => VBar,
            '+' => Add,
            '-' => Sub,
            '*' => Mul,
            '%' => Rem,
            '^' => Caret,

            // Unknown character.
            _ => Unknown,
        };
        let end = self.pos();
        Token::new(token_kind, TextRange::new(start, end))
    }

    fn eol(&mut self) -> TokenKind {
        debug_assert!(is_line_break(self.prev()));
        self.eat_while(is_line_break);
        Eol
    }

    fn line_comment(&mut self) -> TokenKind {
        debug_assert!(self.prev() == '/' && self.first() == '/');
        self.bump();
        self.eat_while(|c| !is_line_break(c));
        LineComment
    }

    fn block_comment(&mut self) -> TokenKind {
        debug_assert!(self.prev() == '/' && self.first() == '*');
        self.bump();

        // Block comments do not nest.
        while let Some(c) = self.bump() {
            if c == '*' && self.eat('/') {
                return BlockComment;
            }
        }

        UnterminatedBlockComment
    }

    fn whitespace(&mut self) -> TokenKind {
        debug_assert!(is_whitespace(self.prev()));
        self.eat_while(is_whitespace);
        Whitespace
    }

    fn ident_or_keyword(&mut self, start: TextSize) -> TokenKind {
        debug_assert!(is_id_start(self.prev()));
        self.eat_while(is_id_continue);

        let range = TextRange::new(start, self.pos());
        match &self.input[range] {
            "export" => Export,
            "declare" => Declare,
            "default" => Default,
            "abstract" => Abstract,
            "const" => Const,
            "namespace" => Namespace,
            "module" => Module,
            "interface" => Interface,
            "type" => Type,
            "enum" => Enum,
            "extends" => Extends,
            "implements" => Implements,
            "readonly" => Readonly,
            "new" => New,
            "typeof" => Typeof,
            "keyof" => Keyof,
            "this" => This,
            _ => Ident,
        }
    }

    fn number(&mut self, first_digit: char) -> TokenKind {
        debug_assert!(self.prev().is_ascii_digit());
        if first_digit == '0' {
            // Attempt to parse encoding base.
            match self.first() {
                'b' | 'B' | 'o' | 'O' => {
                    self.bump();
                    self.eat_decimal_digits();
                    return Number;
                }
                'x' | 'X' => {
                    self.bump();
                    self.eat_hexadecimal_digits();
                    return Number;
                }
                _ => {}
            }
        }
        self.eat_decimal_digits();
        if self.first() == '.' && self.second() != '.' {
            self.bump();
            self.eat_decimal_digits();
        }
        self.number_suffix()
    }

    /// Eats an optional exponent part of a decimal number.
    fn number_suffix(&mut self) -> TokenKind {
        if matches!(self.first(), 'e' | 'E') {
            self.bump();
            if matches!(self.first(), '-' | '+') {
                self.bump();
            }
            self.eat_decimal_digits();
        }
        Number
    }

    fn string(&mut self, quoted: char) -> TokenKind {
        debug_assert!(self.prev() == '"' || self.prev() == '\'');
        while let Some(c) = self.bump() {
            if c == quoted {
                return Str;
            }
            if is_line_break(c) {
                break;
            }
            if c == '\\' {
                // Bump again to skip escaped character.
                self.bump();
            }
        }
        // End of line or end of file reached.
        UnterminatedStr
    }

    fn template(&mut self) -> TokenKind {
        debug_assert!(self.prev() == '`');
        while let Some(c) = self.bump() {
            match c {
                '`' => return Template,
                '\\' => {
                    self.bump();
                }
                _ => (),
            }
        }
        UnterminatedStr
    }

    fn eat_decimal_digits(&mut self) -> bool {
        let mut has_digits = false;
        loop {
            match self.first() {
                '_' => {
                    self.bump();
                }
                '0'..='9' => {
                    has_digits = true;
                    self.bump();
                }
                _ => break,
            }
        }
        has_digits
    }

    fn eat_hexadecimal_digits(&mut self) -> bool {
        let mut has_digits = false;
        loop {
            match self.first() {
                '_' => {
                    self.bump();
                }
                '0'..='9' | 'a'..='f' | 'A'..='F' => {
                    has_digits = true;
                    self.bump();
                }
                _ => break,
            }
        }
        has_digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! check_token_kinds {
        ($input:expr, [$($kind:ident),* $(,)?] $(,)?) => {
            let kinds: Vec<TokenKind> = tokenize($input).map(|token| token.kind).collect();
            assert_eq!(kinds, vec![$(TokenKind::$kind),*]);
        };
    }

    #[test]
    fn test_punctuation() {
        check_token_kinds!("=>...?:", [FatArrow, Ellipsis, Question, Colon]);
        check_token_kinds!("a.b", [Ident, Dot, Ident]);
        check_token_kinds!("1 << 2", [Number, Whitespace, Lt, Lt, Whitespace, Number]);
    }

    #[test]
    fn test_trivia() {
        check_token_kinds!(
            "// a\n/* b */ x",
            [LineComment, Eol, BlockComment, Whitespace, Ident],
        );
        check_token_kinds!("\r\n\n", [Eol]);
        check_token_kinds!("/* b", [UnterminatedBlockComment]);
        check_token_kinds!("\"abc\nx", [UnterminatedStr, Ident]);
    }

    #[test]
    fn test_keywords() {
        check_token_kinds!(
            "interface Foo extends Bar",
            [Interface, Whitespace, Ident, Whitespace, Extends, Whitespace, Ident],
        );
        check_token_kinds!("$type _readonly", [Ident, Whitespace, Ident]);
    }

    #[test]
    fn test_number() {
        check_token_kinds!(
            "0x1F 1_000 .5 1e3",
            [Number, Whitespace, Number, Whitespace, Number, Whitespace, Number],
        );
    }

    #[test]
    fn test_unknown() {
        check_token_kinds!("#", [Unknown]);
    }
}
