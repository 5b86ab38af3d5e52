//! Text input buffer utilities.
//!
//! Provides a text buffer with cursor management for form fields and
//! search inputs. Keyboard capture happens at the parent view level; the
//! buffer only interprets the keys it is handed. Fields that accept a
//! restricted alphabet (amounts, seat counts, carrier codes) attach an
//! [`InputMask`].

/// Restricts which characters a buffer accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMask {
    /// Any printable character.
    #[default]
    FreeText,
    /// ASCII digits only.
    Digits,
    /// Digits plus a single decimal point.
    Decimal,
    /// ASCII letters, stored uppercase (carrier codes, sector titles).
    UpperCode,
}

impl InputMask {
    /// Maps a typed character to the stored character, or rejects it.
    fn accept(&self, c: char, current: &str) -> Option<char> {
        match self {
            InputMask::FreeText => Some(c),
            InputMask::Digits => c.is_ascii_digit().then_some(c),
            InputMask::Decimal => {
                if c.is_ascii_digit() {
                    Some(c)
                } else if c == '.' && !current.contains('.') {
                    Some(c)
                } else {
                    None
                }
            }
            InputMask::UpperCode => c
                .is_ascii_alphabetic()
                .then_some(c.to_ascii_uppercase()),
        }
    }
}

/// Result of processing a key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInputResult {
    /// The key was consumed and the text changed.
    TextChanged,
    /// The key was consumed but text didn't change.
    Consumed,
    /// The key should trigger submit (Enter).
    Submit,
    /// The key should trigger cancel (Escape).
    Cancel,
    /// The key was not handled.
    Ignored,
}

/// A text buffer with cursor position tracking and an optional mask.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    /// The text content.
    pub text: String,
    /// Cursor position in bytes.
    pub cursor: usize,
    /// Character filter applied to typed input.
    pub mask: InputMask,
}

impl TextBuffer {
    /// Create a new empty free-text buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with a mask.
    pub fn masked(mask: InputMask) -> Self {
        Self {
            mask,
            ..Self::default()
        }
    }

    /// Create a buffer with initial text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            mask: InputMask::FreeText,
        }
    }

    /// Get the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the trimmed text.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the text content, moving the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at cursor position, subject to the mask.
    pub fn insert_char(&mut self, c: char) -> bool {
        match self.mask.accept(c, &self.text) {
            Some(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Insert a string at cursor position, one masked character at a time.
    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    /// Delete character before cursor (backspace).
    pub fn backspace(&mut self) -> bool {
        if self.cursor > 0 {
            let prev_char_boundary = self.prev_char_boundary();
            self.text.remove(prev_char_boundary);
            self.cursor = prev_char_boundary;
            true
        } else {
            false
        }
    }

    /// Delete character at cursor (delete key).
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            true
        } else {
            false
        }
    }

    /// Move cursor left by one character.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_char_boundary();
        }
    }

    /// Move cursor right by one character.
    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.next_char_boundary();
        }
    }

    /// Move cursor to the start.
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end.
    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Delete word before cursor (Ctrl+Backspace).
    pub fn delete_word_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }

        // Skip trailing whitespace
        while self.cursor > 0
            && self
                .char_before_cursor()
                .map(|c| c.is_whitespace())
                .unwrap_or(false)
        {
            self.backspace();
        }

        // Delete until whitespace or start
        while self.cursor > 0
            && self
                .char_before_cursor()
                .map(|c| !c.is_whitespace())
                .unwrap_or(false)
        {
            self.backspace();
        }
    }

    /// Get the character before the cursor.
    fn char_before_cursor(&self) -> Option<char> {
        if self.cursor == 0 {
            return None;
        }
        self.text[..self.cursor].chars().last()
    }

    /// Find the previous character boundary.
    fn prev_char_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Find the next character boundary.
    fn next_char_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len())
    }

    /// Process a key input. Returns how the key was handled.
    ///
    /// Designed to be called from a parent view's key handler.
    pub fn process_key(&mut self, key: &str, shift: bool, ctrl: bool, cmd: bool) -> KeyInputResult {
        match key {
            "backspace" => {
                if ctrl || cmd {
                    self.delete_word_backward();
                } else {
                    self.backspace();
                }
                KeyInputResult::TextChanged
            }
            "delete" => {
                self.delete();
                KeyInputResult::TextChanged
            }
            "left" => {
                self.move_left();
                KeyInputResult::Consumed
            }
            "right" => {
                self.move_right();
                KeyInputResult::Consumed
            }
            "home" => {
                self.move_to_start();
                KeyInputResult::Consumed
            }
            "end" => {
                self.move_to_end();
                KeyInputResult::Consumed
            }
            "enter" => KeyInputResult::Submit,
            "escape" => KeyInputResult::Cancel,
            "tab" => KeyInputResult::Ignored, // Let parent handle tab
            "space" => {
                if self.insert_char(' ') {
                    KeyInputResult::TextChanged
                } else {
                    KeyInputResult::Consumed
                }
            }
            _ => {
                if key.len() == 1 {
                    if let Some(c) = key.chars().next() {
                        if c.is_ascii_graphic() {
                            let c = if shift { c.to_ascii_uppercase() } else { c };
                            return if self.insert_char(c) {
                                KeyInputResult::TextChanged
                            } else {
                                KeyInputResult::Consumed
                            };
                        }
                    }
                }
                KeyInputResult::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor, 0);
    }

    #[test]
    fn with_text_places_cursor_at_end() {
        let buffer = TextBuffer::with_text("hello");
        assert_eq!(buffer.text(), "hello");
        assert_eq!(buffer.cursor, 5);
    }

    #[test]
    fn insert_and_backspace() {
        let mut buffer = TextBuffer::new();
        buffer.insert_str("hallo");
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "hall");
        assert_eq!(buffer.cursor, 4);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut buffer = TextBuffer::new();
        assert!(!buffer.backspace());
    }

    #[test]
    fn insert_in_middle() {
        let mut buffer = TextBuffer::with_text("hllo");
        buffer.cursor = 1;
        buffer.insert_char('e');
        assert_eq!(buffer.text(), "hello");
    }

    #[test]
    fn cursor_movement() {
        let mut buffer = TextBuffer::with_text("hello");
        buffer.move_left();
        assert_eq!(buffer.cursor, 4);
        buffer.move_to_start();
        assert_eq!(buffer.cursor, 0);
        buffer.move_right();
        assert_eq!(buffer.cursor, 1);
        buffer.move_to_end();
        assert_eq!(buffer.cursor, 5);
    }

    #[test]
    fn unicode_backspace() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("chai ☕");
        buffer.backspace();
        assert_eq!(buffer.text(), "chai ");
    }

    #[test]
    fn digits_mask_drops_letters() {
        let mut buffer = TextBuffer::masked(InputMask::Digits);
        buffer.insert_str("1a2b3");
        assert_eq!(buffer.text(), "123");
    }

    #[test]
    fn decimal_mask_allows_single_point() {
        let mut buffer = TextBuffer::masked(InputMask::Decimal);
        buffer.insert_str("12.5.0");
        assert_eq!(buffer.text(), "12.50");
    }

    #[test]
    fn upper_code_mask_uppercases() {
        let mut buffer = TextBuffer::masked(InputMask::UpperCode);
        buffer.insert_str("pk8");
        assert_eq!(buffer.text(), "PK");
    }

    #[test]
    fn process_key_text_and_shift() {
        let mut buffer = TextBuffer::new();
        assert_eq!(
            buffer.process_key("h", false, false, false),
            KeyInputResult::TextChanged
        );
        buffer.process_key("i", true, false, false);
        assert_eq!(buffer.text(), "hI");
    }

    #[test]
    fn process_key_masked_rejection_is_consumed() {
        let mut buffer = TextBuffer::masked(InputMask::Digits);
        assert_eq!(
            buffer.process_key("x", false, false, false),
            KeyInputResult::Consumed
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn process_key_submit_and_cancel() {
        let mut buffer = TextBuffer::new();
        assert_eq!(
            buffer.process_key("enter", false, false, false),
            KeyInputResult::Submit
        );
        assert_eq!(
            buffer.process_key("escape", false, false, false),
            KeyInputResult::Cancel
        );
    }

    #[test]
    fn delete_word_backward_stops_at_word() {
        let mut buffer = TextBuffer::with_text("Karwan Travels");
        buffer.delete_word_backward();
        assert_eq!(buffer.text(), "Karwan ");
        buffer.delete_word_backward();
        assert_eq!(buffer.text(), "");
    }
}
