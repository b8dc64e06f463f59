//! Document text backed by ropey.

use ropey::Rope;

/// Document text.
///
/// Cloning is cheap: ropey shares the underlying tree, so every
/// `EditorState` snapshot can carry its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBuffer {
    rope: Rope,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Creates a text buffer from a string.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the total number of lines in the buffer.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Inserts a string at the given character index (clamped to the end).
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Removes text in the given character range.
    pub fn remove(&mut self, start: usize, end: usize) {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Returns the text in `start..end` (clamped).
    pub fn slice(&self, start: usize, end: usize) -> String {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars()).max(start);
        self.rope.slice(start..end).to_string()
    }

    /// Converts a character index to a (line, column) position.
    /// Both line and column are 0-indexed.
    pub fn char_to_line_col(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        (line, char_idx - line_start)
    }

    /// Returns the line containing the given character index.
    pub fn line_of(&self, char_idx: usize) -> usize {
        self.char_to_line_col(char_idx).0
    }

    /// Returns the character index of the start of a line.
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.len_lines() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line)
        }
    }

    /// Returns the entire buffer as a string.
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert_eq!(buf.len_chars(), 0);
        assert_eq!(buf.len_lines(), 1); // Empty buffer has 1 line
    }

    #[test]
    fn test_insert_and_remove() {
        let mut buf = TextBuffer::from_str("hello");
        buf.insert(5, " world");
        assert_eq!(buf.to_string(), "hello world");
        buf.remove(5, 11);
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let mut buf = TextBuffer::from_str("abc");
        buf.insert(99, "d");
        assert_eq!(buf.to_string(), "abcd");
        buf.remove(2, 99);
        assert_eq!(buf.to_string(), "ab");
        assert_eq!(buf.slice(1, 50), "b");
        assert_eq!(buf.char_to_line_col(40), (0, 2));
    }

    #[test]
    fn test_char_to_line_col() {
        let buf = TextBuffer::from_str("abc\ndefgh");
        assert_eq!(buf.char_to_line_col(0), (0, 0));
        assert_eq!(buf.char_to_line_col(3), (0, 3)); // newline char
        assert_eq!(buf.char_to_line_col(4), (1, 0));
        assert_eq!(buf.char_to_line_col(6), (1, 2));
        assert_eq!(buf.line_start(1), 4);
        assert_eq!(buf.line_start(9), 9);
    }
}
