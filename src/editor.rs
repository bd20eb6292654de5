//! Text editing for request form fields
//!
//! One `FieldEditor` is reused for whichever field is being edited. It owns a
//! copy of the field's text while editing; the caller writes it back on commit.
//! Headers and body are multi-line, everything else is a single line.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldEditor {
    content: String,

    /// Cursor position (byte offset in content)
    cursor: usize,

    multiline: bool,
}

impl FieldEditor {
    /// Start editing `content` with the cursor at the end
    pub fn open(content: &str, multiline: bool) -> Self {
        Self {
            content: content.to_string(),
            cursor: content.len(),
            multiline,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    /// Insert pasted text, straightening smart quotes so JSON bodies stay valid
    pub fn insert_str_normalized(&mut self, s: &str) {
        let normalized = s
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace(['\u{2018}', '\u{2019}'], "'");
        let normalized = if self.multiline {
            normalized
        } else {
            normalized.replace(['\n', '\r'], "")
        };

        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, &normalized);
        self.cursor = cursor + normalized.len();
    }

    /// Backspace
    pub fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let Some((idx, _)) = self.content[..self.cursor].char_indices().next_back() else {
            return false;
        };
        self.content.remove(idx);
        self.cursor = idx;
        true
    }

    /// Delete key
    pub fn delete_char_after_cursor(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.remove(cursor);
        true
    }

    pub fn move_cursor_left(&mut self) -> bool {
        match self.content[..self.cursor].char_indices().next_back() {
            Some((idx, _)) => {
                self.cursor = idx;
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_right(&mut self) -> bool {
        match self.content[self.cursor..].chars().next() {
            Some(c) => {
                self.cursor += c.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Zero-based (line, column) of the cursor, column counted in chars
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.content[..self.cursor];
        let line = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map(|tail| tail.chars().count())
            .unwrap_or(0);
        (line, col)
    }

    /// Prettify the content as JSON; content is left untouched when invalid
    pub fn format_json(&mut self) -> Result<(), String> {
        let json = serde_json::from_str::<Value>(&self.content)
            .map_err(|e| format!("Invalid JSON: {e}"))?;
        let pretty = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
        self.content = pretty;
        self.cursor = self.content.len();
        Ok(())
    }

    /// Handle an editing key; returns true if the event was consumed
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Enter if self.multiline => {
                self.insert_char('\n');
                true
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_paste_batch(c);
                true
            }
            _ => false,
        }
    }

    /// Drain character events that arrived together (a terminal paste) and
    /// insert them in one go. Returns the number of characters inserted.
    pub fn handle_paste_batch(&mut self, initial_char: char) -> usize {
        let mut chars = vec![initial_char];

        while let Ok(true) = crossterm::event::poll(std::time::Duration::from_millis(0)) {
            match crossterm::event::read() {
                Ok(Event::Key(next_key)) => match next_key.code {
                    KeyCode::Char(next_c)
                        if !next_key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        chars.push(next_c);
                    }
                    KeyCode::Enter if self.multiline => chars.push('\n'),
                    _ => break,
                },
                _ => break,
            }
        }

        let count = chars.len();
        let batch: String = chars.into_iter().collect();
        self.insert_str_normalized(&batch);
        count
    }

    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_places_cursor_at_end() {
        let editor = FieldEditor::open("hello", false);
        assert_eq!(editor.content(), "hello");
        assert_eq!(editor.cursor, 5);
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut editor = FieldEditor::default();
        editor.insert_char('a');
        editor.insert_char('b');
        assert_eq!(editor.content(), "ab");
        assert!(editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "a");
        assert_eq!(editor.cursor, 1);
    }

    #[test]
    fn test_single_line_rejects_newlines() {
        let mut editor = FieldEditor::open("url", false);
        editor.insert_char('\n');
        editor.insert_str_normalized("/a\nb");
        assert_eq!(editor.content(), "url/ab");
    }

    #[test]
    fn test_multiline_cursor_position() {
        let mut editor = FieldEditor::open("Accept: */*", true);
        editor.insert_char('\n');
        editor.insert_str_normalized("X-Id: 7");
        assert_eq!(editor.content(), "Accept: */*\nX-Id: 7");
        assert_eq!(editor.cursor_line_col(), (1, 7));
    }

    #[test]
    fn test_cursor_moves_over_multibyte_chars() {
        let mut editor = FieldEditor::open("aé😀", false);
        assert!(editor.move_cursor_left());
        assert_eq!(editor.cursor_line_col(), (0, 2));
        assert!(editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "a😀");
        editor.move_cursor_to_end();
        assert!(!editor.move_cursor_right());
        editor.move_cursor_to_start();
        assert!(!editor.move_cursor_left());
        assert!(editor.delete_char_after_cursor());
        assert_eq!(editor.content(), "😀");
    }

    #[test]
    fn test_smart_quotes_are_straightened() {
        let mut editor = FieldEditor::default();
        editor.insert_str_normalized("{\u{201C}user\u{201D}:\u{2018}x\u{2019}}");
        assert_eq!(editor.content(), "{\"user\":'x'}");
    }

    #[test]
    fn test_format_json() {
        let mut editor = FieldEditor::open(r#"{"name":"test","age":30}"#, true);
        assert!(editor.format_json().is_ok());
        assert_eq!(editor.content(), "{\n  \"name\": \"test\",\n  \"age\": 30\n}");

        let mut bad = FieldEditor::open("{invalid", true);
        assert!(bad.format_json().is_err());
        assert_eq!(bad.content(), "{invalid");
    }

    #[test]
    fn test_clear() {
        let mut editor = FieldEditor::open("hello", false);
        editor.clear();
        assert_eq!(editor.content(), "");
        assert_eq!(editor.cursor, 0);
    }
}
