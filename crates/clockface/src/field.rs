//! Two-character numeric input used for the hour and minute.

use crossterm::event::{KeyCode, KeyEvent};

/// Maximum characters a user can type into a field.
pub const FIELD_WIDTH: usize = 2;

/// A tiny single-line input holding at most [`FIELD_WIDTH`] typed digits.
///
/// Programmatic writes through [`set_value`](Field::set_value) are not
/// limited, so an out-of-range value stays visible exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    value: Vec<char>,
    cursor: usize,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the text and move the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The leading integer of the text, ignoring leading whitespace and
    /// anything after the digits. `None` when the text does not start with
    /// a digit.
    pub fn number(&self) -> Option<u32> {
        let digits: String = self
            .value
            .iter()
            .skip_while(|c| c.is_whitespace())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Apply an editing key. Returns `true` when the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => self.insert_char(c),
            KeyCode::Backspace => self.delete_char_backward(),
            KeyCode::Delete => self.delete_char_forward(),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.len());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                false
            }
            _ => false,
        }
    }

    fn insert_char(&mut self, c: char) -> bool {
        if self.value.len() >= FIELD_WIDTH {
            return false;
        }
        self.value.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    fn delete_char_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.value.remove(self.cursor);
        true
    }

    fn delete_char_forward(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.value.remove(self.cursor);
        true
    }
}
