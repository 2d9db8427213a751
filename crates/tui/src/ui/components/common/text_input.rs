//! UTF-8 safe text input state with cursor management and a length cap.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
    /// Maximum number of chars accepted; `None` is unbounded
    char_limit: Option<usize>,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_char_limit(limit: usize) -> Self {
        Self {
            char_limit: Some(limit),
            ..Self::default()
        }
    }

    // ----- Getters -----
    pub fn input(&self) -> &str {
        &self.input
    }
    pub fn is_empty(&self) -> bool {
        self.input.trim().is_empty()
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_column(&self) -> usize {
        self.input[..self.cursor].width()
    }

    // ----- Setters -----
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    // ----- Editing primitives (UTF-8 safe) -----

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Insert a char at the cursor unless the length cap is reached.
    pub fn insert_char(&mut self, c: char) -> bool {
        if self.char_limit.is_some_and(|limit| self.input.chars().count() >= limit) {
            return false;
        }
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Backspace the char immediately before the cursor.
    pub fn backspace(&mut self) {
        if let Some(prev) = self.input[..self.cursor].chars().next_back() {
            let start = self.cursor - prev.len_utf8();
            self.input.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.input.drain(self.cursor..self.cursor + next.len_utf8());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInputState {
        let mut st = TextInputState::new();
        text.chars().for_each(|c| {
            st.insert_char(c);
        });
        st
    }

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = typed("h\u{1F642}llo"); // emoji is 4 bytes
        st.move_home();
        st.move_right(); // between h and emoji
        st.insert_char('e');
        assert_eq!(st.input(), "he\u{1F642}llo");
        st.move_right(); // step over emoji
        st.backspace(); // delete emoji
        assert_eq!(st.input(), "hello");
        st.move_left();
        st.backspace();
        assert_eq!(st.input(), "ello");
    }

    #[test]
    fn char_limit_blocks_further_input() {
        let mut st = TextInputState::with_char_limit(3);
        assert!(st.insert_char('1'));
        assert!(st.insert_char('2'));
        assert!(st.insert_char('3'));
        assert!(!st.insert_char('4'));
        assert_eq!(st.input(), "123");
        st.backspace();
        assert!(st.insert_char('9'));
        assert_eq!(st.input(), "129");
    }

    #[test]
    fn cursor_column_counts_wide_chars() {
        let mut st = typed("\u{4F60}1");
        assert_eq!(st.cursor_column(), 3);
        st.move_left();
        assert_eq!(st.cursor_column(), 2);
        st.delete();
        assert_eq!(st.input(), "\u{4F60}");
    }
}
