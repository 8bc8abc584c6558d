//! Search input widget
//!
//! Owns only the text being edited and the cursor; committing the text to
//! a table (and debouncing the resulting load) is the controller's job, so
//! the view pushes every edit through
//! [`DataTable::set_search`](crate::table::DataTable::set_search).

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Theme;

/// Search bar state
#[derive(Debug, Default)]
pub struct SearchBar {
    query: String,
    active: bool,
    cursor: usize,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.cursor = self.query.chars().count();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Replace the text without moving into edit mode, e.g. when a header
    /// menu option set the table's search.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = self.cursor.min(self.query.chars().count());
    }

    /// Returns true when the text changed.
    pub fn clear(&mut self) -> bool {
        self.cursor = 0;
        if self.query.is_empty() {
            false
        } else {
            self.query.clear();
            true
        }
    }

    pub fn insert(&mut self, c: char) -> bool {
        let byte = self.byte_at(self.cursor);
        self.query.insert(byte, c);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let byte = self.byte_at(self.cursor);
        self.query.remove(byte);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.query.chars().count() {
            return false;
        }
        let byte = self.byte_at(self.cursor);
        self.query.remove(byte);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.query.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.query.chars().count();
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.query.len())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_style = if self.active {
            theme.border_focused()
        } else {
            theme.border()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search (/ to edit, Esc to clear) ");

        let display = if self.query.is_empty() && !self.active {
            "Type to search...".to_string()
        } else {
            self.query.clone()
        };
        let style = if self.query.is_empty() && !self.active {
            theme.dim()
        } else {
            theme.normal()
        };

        frame.render_widget(Paragraph::new(display).block(block).style(style), area);

        if self.active {
            frame.set_cursor_position((area.x + 1 + self.cursor as u16, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_track_the_cursor() {
        let mut bar = SearchBar::new();
        bar.activate();
        bar.insert('a');
        bar.insert('b');
        bar.move_left();
        bar.insert('x');
        assert_eq!(bar.query(), "axb");

        assert!(bar.backspace());
        assert_eq!(bar.query(), "ab");
    }

    #[test]
    fn edits_are_char_safe() {
        let mut bar = SearchBar::new();
        bar.activate();
        for c in "héllo".chars() {
            bar.insert(c);
        }
        bar.move_home();
        assert!(bar.delete());
        assert_eq!(bar.query(), "éllo");
    }

    #[test]
    fn clear_reports_whether_anything_was_cleared() {
        let mut bar = SearchBar::new();
        assert!(!bar.clear());
        bar.insert('z');
        assert!(bar.clear());
        assert_eq!(bar.query(), "");
    }
}
