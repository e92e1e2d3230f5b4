use std::fmt;

/// Location of a byte offset in the source text.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The lineno, counting from 1.
    pub lineno: u32,
    /// The column in characters, counting from 1.
    pub column: u32,
    /// The byte offset, counting from 0.
    pub offset: u32,
}

impl Location {
    /// Computes the location of `offset` in `input`.
    ///
    /// `\r\n`, `\n` and `\r` all end a line. An offset past the end of the
    /// input is clamped to the end.
    pub fn from_offset(input: &str, offset: u32) -> Location {
        let end = (offset as usize).min(input.len());
        let mut lineno = 1;
        let mut column = 1;
        let mut chars = input.char_indices().take_while(|(i, _)| *i < end).peekable();
        while let Some((_, c)) = chars.next() {
            match c {
                '\r' if chars.peek().is_some_and(|(_, c)| *c == '\n') => (),
                '\n' | '\r' => {
                    lineno += 1;
                    column = 1;
                }
                _ => column += 1,
            }
        }
        Location {
            lineno,
            column,
            offset: end as u32,
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}({})", self.lineno, self.column, self.offset)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lineno, self.column)
    }
}
