// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Model of a single line text field. The caret is a char index, not a byte index.

/// Editing keys a text field understands. Everything else is either text or ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKey {
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

#[derive(Clone, Debug)]
pub struct LineEdit {
    text: String,
    caret: usize,
    max_len: usize,
    filter: fn(char) -> bool,
}

impl LineEdit {
    pub fn new(max_len: usize, filter: fn(char) -> bool) -> Self {
        LineEdit {
            text: String::new(),
            caret: 0,
            max_len,
            filter,
        }
    }

    /// a field accepting numbers, either integer or floating point
    pub fn numeric() -> Self {
        LineEdit::new(8, |c| c.is_ascii_digit() || c == '.' || c == '-')
    }

    /// a field accepting `#RRGGBB`
    pub fn hex() -> Self {
        LineEdit::new(7, |c| c.is_ascii_hexdigit() || c == '#')
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text.char_indices().nth(char_index).map_or(self.text.len(), |(index, _)| index)
    }

    /// Replace the text programmatically. The caret moves to the end. This is not an edit.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().take(self.max_len).collect();
        self.caret = self.len();
    }

    /// Insert typed text at the caret. Characters rejected by the filter are dropped, and insertion
    /// stops at the maximum length. Returns `true` if the text changed.
    pub fn insert(&mut self, input: &str) -> bool {
        let mut changed = false;
        for c in input.chars().filter(|c| (self.filter)(*c)) {
            if self.len() >= self.max_len {
                break;
            }
            let index = self.byte_index(self.caret);
            self.text.insert(index, c);
            self.caret += 1;
            changed = true;
        }
        changed
    }

    /// Apply an editing key. Returns `true` if the text changed; caret movement alone doesn't count.
    pub fn key(&mut self, key: EditKey) -> bool {
        match key {
            EditKey::Backspace => {
                if self.caret == 0 {
                    return false;
                }
                self.caret -= 1;
                let index = self.byte_index(self.caret);
                self.text.remove(index);
                true
            }
            EditKey::Delete => {
                if self.caret >= self.len() {
                    return false;
                }
                let index = self.byte_index(self.caret);
                self.text.remove(index);
                true
            }
            EditKey::Left => {
                self.caret = self.caret.saturating_sub(1);
                false
            }
            EditKey::Right => {
                self.caret = (self.caret + 1).min(self.len());
                false
            }
            EditKey::Home => {
                self.caret = 0;
                false
            }
            EditKey::End => {
                self.caret = self.len();
                false
            }
        }
    }
}
