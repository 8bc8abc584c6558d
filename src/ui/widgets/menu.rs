//! Dropdown menu widget
//!
//! A menu is a pure description: a toggle label plus an ordered list of
//! items. Items without an action render as visual dividers and are never
//! highlightable. Choosing an item hands its action value back to the
//! caller; the menu itself has no side effects.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::layout::DropdownLayout;
use crate::ui::theme::Theme;

/// One menu entry. `action: None` means "render as a divider".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem<A> {
    pub label: String,
    pub action: Option<A>,
}

impl<A> MenuItem<A> {
    pub fn new(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            action: Some(action),
        }
    }

    pub fn divider() -> Self {
        Self {
            label: String::new(),
            action: None,
        }
    }

    pub fn is_divider(&self) -> bool {
        self.action.is_none()
    }
}

/// A dropdown description: toggle label, selection accent, items.
///
/// `is_selected` only affects the toggle's visual accent (the table uses
/// it to mark columns with an active discrete filter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<A> {
    pub label: String,
    pub is_selected: bool,
    pub items: Vec<MenuItem<A>>,
}

impl<A> Menu<A> {
    pub fn new(label: impl Into<String>, items: Vec<MenuItem<A>>) -> Self {
        Self {
            label: label.into(),
            is_selected: false,
            items,
        }
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    fn first_actionable(&self) -> usize {
        self.items
            .iter()
            .position(|i| !i.is_divider())
            .unwrap_or(0)
    }

    /// Render the open dropdown below `anchor`, clamped to `container`.
    pub fn render(
        &self,
        frame: &mut Frame,
        container: Rect,
        anchor: Rect,
        theme: &Theme,
        state: &MenuState,
    ) {
        let width = self
            .items
            .iter()
            .map(|i| i.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.label.chars().count()) as u16
            + 4;
        let height = self.items.len() as u16 + 2;
        let area = DropdownLayout::below(container, anchor, width, height).dropdown;

        let border_style = if self.is_selected {
            theme.accent()
        } else {
            theme.border_focused()
        };
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);

        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if item.is_divider() {
                    Line::styled("─".repeat(inner.width as usize), theme.dim())
                } else if idx == state.highlighted {
                    Line::styled(format!(" {} ", item.label), theme.selected())
                } else {
                    Line::styled(format!(" {} ", item.label), theme.normal())
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// What a key press did to an open menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome<A> {
    /// Menu stays open.
    Pending,
    /// User dismissed the menu.
    Closed,
    /// User activated an item; the caller applies the action.
    Chosen(A),
}

/// Highlight state for an open dropdown.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub highlighted: usize,
}

impl MenuState {
    /// Open on the first actionable item.
    pub fn open<A>(menu: &Menu<A>) -> Self {
        Self {
            highlighted: menu.first_actionable(),
        }
    }

    pub fn handle_key<A: Clone>(&mut self, menu: &Menu<A>, key: KeyEvent) -> MenuOutcome<A> {
        match key.code {
            KeyCode::Esc => MenuOutcome::Closed,
            KeyCode::Up | KeyCode::Char('k') => {
                self.step(menu, -1);
                MenuOutcome::Pending
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.step(menu, 1);
                MenuOutcome::Pending
            }
            KeyCode::Enter => match menu.items.get(self.highlighted).and_then(|i| i.action.clone())
            {
                Some(action) => MenuOutcome::Chosen(action),
                None => MenuOutcome::Pending,
            },
            _ => MenuOutcome::Pending,
        }
    }

    /// Move the highlight, skipping dividers, without wrapping.
    fn step<A>(&mut self, menu: &Menu<A>, delta: i32) {
        let mut idx = self.highlighted as i32;
        loop {
            idx += delta;
            if idx < 0 || idx >= menu.items.len() as i32 {
                return;
            }
            if !menu.items[idx as usize].is_divider() {
                self.highlighted = idx as usize;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn menu() -> Menu<u8> {
        Menu::new(
            "City",
            vec![
                MenuItem::new("Sort Ascending", 0),
                MenuItem::new("Sort Descending", 1),
                MenuItem::divider(),
                MenuItem::new("Lisbon", 2),
            ],
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_skips_dividers() {
        let menu = menu();
        let mut state = MenuState::open(&menu);
        assert_eq!(state.highlighted, 0);

        state.handle_key(&menu, key(KeyCode::Down));
        assert_eq!(state.highlighted, 1);

        // Crossing the divider lands on the option after it.
        state.handle_key(&menu, key(KeyCode::Down));
        assert_eq!(state.highlighted, 3);

        state.handle_key(&menu, key(KeyCode::Up));
        assert_eq!(state.highlighted, 1);
    }

    #[test]
    fn navigation_does_not_wrap() {
        let menu = menu();
        let mut state = MenuState::open(&menu);
        state.handle_key(&menu, key(KeyCode::Up));
        assert_eq!(state.highlighted, 0);
    }

    #[test]
    fn enter_yields_the_highlighted_action() {
        let menu = menu();
        let mut state = MenuState::open(&menu);
        state.handle_key(&menu, key(KeyCode::Down));
        assert_eq!(
            state.handle_key(&menu, key(KeyCode::Enter)),
            MenuOutcome::Chosen(1)
        );
    }

    #[test]
    fn esc_closes() {
        let menu = menu();
        let mut state = MenuState::open(&menu);
        assert_eq!(
            state.handle_key(&menu, key(KeyCode::Esc)),
            MenuOutcome::Closed
        );
    }

    #[test]
    fn open_starts_past_leading_divider() {
        let menu: Menu<u8> = Menu::new(
            "X",
            vec![MenuItem::divider(), MenuItem::new("Only", 7)],
        );
        let state = MenuState::open(&menu);
        assert_eq!(state.highlighted, 1);
    }
}
