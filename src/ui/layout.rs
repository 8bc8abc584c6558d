//! Widget layout helpers

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Search bar above table content
pub struct FilterLayout {
    pub filter: Rect,
    pub content: Rect,
}

impl FilterLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(5),    // Table
            ])
            .split(area);

        Self {
            filter: chunks[0],
            content: chunks[1],
        }
    }
}

/// Table body plus a one-line pager underneath
pub struct PagedLayout {
    pub body: Rect,
    pub pager: Rect,
}

impl PagedLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Rows
                Constraint::Length(1), // Pager
            ])
            .split(area);

        Self {
            body: chunks[0],
            pager: chunks[1],
        }
    }
}

/// Dropdown placement under an anchor cell
pub struct DropdownLayout {
    pub dropdown: Rect,
}

impl DropdownLayout {
    /// Place a `width`x`height` dropdown directly below `anchor`,
    /// shifted and clamped to stay inside `container`.
    pub fn below(container: Rect, anchor: Rect, width: u16, height: u16) -> Self {
        let width = width.min(container.width);
        let height = height.min(container.height);

        let max_x = container.right().saturating_sub(width);
        let x = anchor.x.min(max_x).max(container.x);

        let below = anchor.bottom();
        let max_y = container.bottom().saturating_sub(height);
        let y = below.min(max_y).max(container.y);

        Self {
            dropdown: Rect::new(x, y, width, height),
        }
    }
}

/// Dialog/popup centered layout
pub struct DialogLayout {
    pub dialog: Rect,
}

impl DialogLayout {
    pub fn new(area: Rect, width_percent: u16, height_percent: u16) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - height_percent) / 2),
                Constraint::Percentage(height_percent),
                Constraint::Percentage((100 - height_percent) / 2),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - width_percent) / 2),
                Constraint::Percentage(width_percent),
                Constraint::Percentage((100 - width_percent) / 2),
            ])
            .split(vertical[1]);

        Self {
            dialog: horizontal[1],
        }
    }

    /// Create centered dialog with fixed dimensions
    pub fn centered(area: Rect, width: u16, height: u16) -> Self {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;

        Self {
            dialog: Rect::new(x, y, width.min(area.width), height.min(area.height)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropdown_clamps_to_container() {
        let container = Rect::new(0, 0, 40, 12);
        let anchor = Rect::new(36, 0, 4, 1);
        let area = DropdownLayout::below(container, anchor, 20, 8).dropdown;
        assert!(area.right() <= container.right());
        assert!(area.bottom() <= container.bottom());
        assert_eq!(area.y, anchor.bottom());
    }

    #[test]
    fn dropdown_sits_below_its_anchor() {
        let container = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(10, 3, 8, 1);
        let area = DropdownLayout::below(container, anchor, 12, 6).dropdown;
        assert_eq!(area.x, 10);
        assert_eq!(area.y, 4);
    }
}
