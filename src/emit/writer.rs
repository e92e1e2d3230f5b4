//! The text writer.

use crate::config::NewLine;

/// Writes indented lines of text and tracks the current column.
#[derive(Debug, Clone)]
pub struct TextWriter {
    text: String,
    new_line: &'static str,
    indent_size: usize,
    indent: usize,
    /// Characters on the current line, indentation included.
    line_len: usize,
    line_start: bool,
}

impl TextWriter {
    pub fn new(new_line: NewLine, indent_size: usize) -> Self {
        Self {
            text: String::new(),
            new_line: new_line.as_str(),
            indent_size,
            indent: 0,
            line_len: 0,
            line_start: true,
        }
    }

    /// Writes `s`, indenting it first if the line is empty.
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.text.push_str(s);
        self.line_len += s.chars().count();
    }

    /// Writes the indentation of an otherwise empty line.
    pub fn write_indent(&mut self) {
        if self.line_start {
            let width = self.indent * self.indent_size;
            self.text.extend(std::iter::repeat(' ').take(width));
            self.line_len = width;
            self.line_start = false;
        }
    }

    /// Ends the current line. Does nothing on an empty line.
    pub fn write_line(&mut self) {
        if !self.line_start {
            self.text.push_str(self.new_line);
            self.line_len = 0;
            self.line_start = true;
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// The 1-based column the next character is written at.
    pub fn column(&self) -> usize {
        if self.line_start {
            self.indent * self.indent_size + 1
        } else {
            self.line_len + 1
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column() {
        let mut writer = TextWriter::new(NewLine::Lf, 4);
        assert_eq!(writer.column(), 1);
        writer.increase_indent();
        assert_eq!(writer.column(), 5);
        writer.write("abc");
        assert_eq!(writer.column(), 8);
        writer.write_line();
        writer.write_line();
        writer.decrease_indent();
        writer.write("d");
        writer.write_line();
        assert_eq!(writer.text(), "    abc\nd\n");
    }

    #[test]
    fn test_crlf() {
        let mut writer = TextWriter::new(NewLine::Crlf, 2);
        writer.increase_indent();
        writer.write("a");
        writer.write_line();
        writer.write("b");
        assert_eq!(writer.into_text(), "  a\r\n  b");
    }

    #[test]
    fn test_indent_only_line() {
        let mut writer = TextWriter::new(NewLine::Lf, 4);
        writer.increase_indent();
        writer.write_indent();
        assert_eq!(writer.column(), 5);
        writer.write_line();
        writer.write("a");
        writer.write_line();
        assert_eq!(writer.text(), "    \n    a\n");
    }
}
