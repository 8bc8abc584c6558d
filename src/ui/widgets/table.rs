//! Table view widget
//!
//! Stateful ratatui rendering of a [`DataTable`]: header row with dropdown
//! menus, body rows, a pager line, and an optional search bar on top. Key
//! handling translates input into controller calls; the widget itself
//! holds only view state (row highlight, active column, open menu).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::query::Loader;
use crate::table::{Column, ColumnHeader, DataTable, TableCommand, TableRow};
use crate::ui::layout::{FilterLayout, PagedLayout};
use crate::ui::theme::Theme;
use crate::ui::widgets::menu::{MenuOutcome, MenuState};
use crate::ui::widgets::searchbar::SearchBar;

/// Per-render configuration.
pub struct TableViewProps<'a, T> {
    pub columns: &'a [Column<T>],
    pub show_search_box: bool,
}

/// What a key press did to the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableViewEvent {
    None,
    /// Enter on a body row; index into the current page.
    RowActivated(usize),
}

/// View state for one rendered table.
pub struct TableViewState {
    pub rows: TableState,
    pub search: SearchBar,
    active_column: usize,
    menu: Option<MenuState>,
    /// Header cell rects from the last render, used to anchor dropdowns.
    header_areas: Vec<Rect>,
}

impl TableViewState {
    pub fn new() -> Self {
        let mut rows = TableState::default();
        rows.select(Some(0));
        Self {
            rows,
            search: SearchBar::new(),
            active_column: 0,
            menu: None,
            header_areas: Vec::new(),
        }
    }

    pub fn active_column(&self) -> usize {
        self.active_column
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// True while key input is being consumed by the search bar or an open
    /// menu rather than table navigation.
    pub fn editing(&self) -> bool {
        self.search.is_active() || self.menu.is_some()
    }
}

impl Default for TableViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the table (and optionally its search bar) into `area`.
pub fn render<T, L>(
    frame: &mut Frame,
    area: Rect,
    table: &DataTable<T, L>,
    props: &TableViewProps<'_, T>,
    state: &mut TableViewState,
    theme: &Theme,
) where
    T: TableRow,
{
    let table_area = if props.show_search_box {
        let layout = FilterLayout::new(area);
        state.search.render(frame, layout.filter, theme);
        layout.content
    } else {
        area
    };

    let paged = PagedLayout::new(table_area);
    let ncols = props.columns.len().max(1) as u16;

    // Header cells double as dropdown anchors.
    let col_width = paged.body.width / ncols;
    state.header_areas = (0..ncols)
        .map(|i| Rect::new(paged.body.x + i * col_width, paged.body.y, col_width, 1))
        .collect();

    let header_cells = props.columns.iter().enumerate().map(|(i, col)| {
        let (text, selected) = match table.column_header(col) {
            ColumnHeader::Label(label) => (label, false),
            ColumnHeader::Menu(menu) => (format!("{} ▾", menu.label), menu.is_selected),
        };
        let mut style = if selected {
            theme.highlight()
        } else {
            theme.header()
        };
        if i == state.active_column {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(text).style(style)
    });
    let header = Row::new(header_cells).height(1);

    let results = table.results().unwrap_or(&[]);
    let body: Vec<Row> = results
        .iter()
        .map(|row| {
            Row::new(
                props
                    .columns
                    .iter()
                    .map(|col| Cell::from(col.cell_text(row)))
                    .collect::<Vec<_>>(),
            )
            .style(theme.normal())
        })
        .collect();

    let widths = vec![Constraint::Ratio(1, u32::from(ncols)); ncols as usize];
    let widget = Table::new(body, widths)
        .header(header)
        .row_highlight_style(theme.selected())
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(widget, paged.body, &mut state.rows);
    render_pager(frame, paged.pager, table, theme);

    // Open dropdown paints over the table.
    if let Some(menu_state) = &state.menu {
        if let Some(col) = props.columns.get(state.active_column) {
            if let ColumnHeader::Menu(menu) = table.column_header(col) {
                let anchor = state
                    .header_areas
                    .get(state.active_column)
                    .copied()
                    .unwrap_or(paged.body);
                menu.render(frame, area, anchor, theme, menu_state);
            }
        }
    }
}

fn render_pager<T, L>(frame: &mut Frame, area: Rect, table: &DataTable<T, L>, theme: &Theme) {
    let shown = table.results().map_or(0, |r| r.len());

    let position = if shown == 0 {
        "No results.".to_string()
    } else {
        let total = table
            .total()
            .map_or_else(|| "?".to_string(), |t| t.to_string());
        format!(
            "{} to {} of {}",
            table.from() + 1,
            table.from() + shown,
            total
        )
    };

    let side = |enabled: bool| if enabled { theme.accent() } else { theme.dim() };
    let line = Line::from(vec![
        Span::styled(" ◂ Prev ", side(table.can_prev())),
        Span::raw(" "),
        Span::styled(position, theme.normal()),
        Span::raw(" "),
        Span::styled(" Next ▸ ", side(table.can_next())),
    ]);

    frame.render_widget(line, area);
}

/// Handle one key press against the table and its view state.
pub async fn handle_key<T, L>(
    key: KeyEvent,
    table: &mut DataTable<T, L>,
    columns: &[Column<T>],
    state: &mut TableViewState,
) -> TableViewEvent
where
    T: TableRow,
    L: Loader<T>,
{
    if state.menu.is_some() {
        handle_menu_key(key, table, columns, state).await;
        return TableViewEvent::None;
    }

    if state.search.is_active() {
        handle_search_key(key, table, state);
        return TableViewEvent::None;
    }

    match key.code {
        KeyCode::Char('/') => {
            state.search.activate();
        }
        KeyCode::Esc => {
            if state.search.clear() {
                table.set_search("");
            }
        }
        KeyCode::Tab => {
            if !columns.is_empty() {
                state.active_column = (state.active_column + 1) % columns.len();
            }
        }
        KeyCode::BackTab => {
            if !columns.is_empty() {
                state.active_column =
                    (state.active_column + columns.len() - 1) % columns.len();
            }
        }
        KeyCode::Char('o') => {
            if let Some(col) = columns.get(state.active_column) {
                if let ColumnHeader::Menu(menu) = table.column_header(col) {
                    state.menu = Some(MenuState::open(&menu));
                }
            }
        }
        KeyCode::Left => {
            if table.can_prev() {
                table.prev().await;
                state.rows.select(Some(0));
            }
        }
        KeyCode::Right => {
            if table.can_next() {
                table.next().await;
                state.rows.select(Some(0));
            }
        }
        KeyCode::Enter => {
            let len = table.results().map_or(0, |r| r.len());
            if let Some(idx) = state.rows.selected() {
                if idx < len {
                    return TableViewEvent::RowActivated(idx);
                }
            }
        }
        _ => {
            if let Some(delta) = navigation_delta(&key) {
                let len = table.results().map_or(0, |r| r.len());
                if len == 0 {
                    return TableViewEvent::None;
                }
                let current = state.rows.selected().unwrap_or(0);
                let next = if delta == i32::MIN {
                    0
                } else if delta == i32::MAX {
                    len - 1
                } else {
                    (current as i32 + delta).clamp(0, len as i32 - 1) as usize
                };
                state.rows.select(Some(next));
            }
        }
    }

    TableViewEvent::None
}

async fn handle_menu_key<T, L>(
    key: KeyEvent,
    table: &mut DataTable<T, L>,
    columns: &[Column<T>],
    state: &mut TableViewState,
) where
    T: TableRow,
    L: Loader<T>,
{
    let Some(col) = columns.get(state.active_column) else {
        state.menu = None;
        return;
    };
    let ColumnHeader::Menu(menu) = table.column_header(col) else {
        state.menu = None;
        return;
    };
    let Some(menu_state) = state.menu.as_mut() else {
        return;
    };

    match menu_state.handle_key(&menu, key) {
        MenuOutcome::Pending => {}
        MenuOutcome::Closed => {
            state.menu = None;
        }
        MenuOutcome::Chosen(command) => {
            state.menu = None;
            let mirror_search = matches!(command, TableCommand::SetSearch(_));
            table.apply(command).await;
            if mirror_search {
                state.search.set_query(table.search());
            }
        }
    }
}

fn handle_search_key<T, L>(key: KeyEvent, table: &mut DataTable<T, L>, state: &mut TableViewState) {
    let changed = match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.search.deactivate();
            false
        }
        KeyCode::Backspace => state.search.backspace(),
        KeyCode::Delete => state.search.delete(),
        KeyCode::Left => {
            state.search.move_left();
            false
        }
        KeyCode::Right => {
            state.search.move_right();
            false
        }
        KeyCode::Home => {
            state.search.move_home();
            false
        }
        KeyCode::End => {
            state.search.move_end();
            false
        }
        KeyCode::Char(c) => state.search.insert(c),
        _ => false,
    };

    if changed {
        // The controller debounces, so every keystroke goes straight through.
        table.set_search(state.search.query());
    }
}

/// Row navigation keys (arrows primary, vi alternative); `i32::MIN`/`MAX`
/// mean first/last.
fn navigation_delta(event: &KeyEvent) -> Option<i32> {
    match (event.code, event.modifiers) {
        (KeyCode::Up, KeyModifiers::NONE) => Some(-1),
        (KeyCode::Down, KeyModifiers::NONE) => Some(1),
        (KeyCode::Home, KeyModifiers::NONE) => Some(i32::MIN),
        (KeyCode::End, KeyModifiers::NONE) => Some(i32::MAX),

        (KeyCode::Char('k'), KeyModifiers::NONE) => Some(-1),
        (KeyCode::Char('j'), KeyModifiers::NONE) => Some(1),
        (KeyCode::Char('g'), KeyModifiers::NONE) => Some(i32::MIN),
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Some(i32::MAX),

        _ => None,
    }
}
