//! Table state controller
//!
//! [`DataTable`] tracks one table's pagination offset, page size, sort
//! order and debounced search text, turns that state into a
//! [`TableQuery`] for an externally supplied [`Loader`], and caches
//! whatever page comes back. All mutation goes through its own methods;
//! the rendering side lives in [`crate::ui::widgets::table`].

pub mod columns;

use std::time::Duration;

use tokio::time::Instant;

use crate::query::{
    decode_sort_values, encode_sort_values, Loader, SortValue, TableQuery, TableResult,
};
use crate::ui::widgets::menu::{Menu, MenuItem};
use crate::utils::Debouncer;

pub use columns::{Column, FieldOption, FieldValue, TableRow};

const DEFAULT_PAGE_SIZE: usize = 10;
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Action emitted by a column header menu.
///
/// Menus are plain data; the host feeds the chosen command back through
/// [`DataTable::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    /// Replace the whole sort with a single key.
    SortBy { key: String, ascending: bool },
    /// Set the search text (empty clears the filter).
    SetSearch(String),
}

/// Handle for one issued load request.
///
/// Results are applied only while their ticket is still the most recently
/// issued one, so a slow response can never overwrite a newer page:
/// last-write-wins by request, not by completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Header content for one column: a plain label, or a dropdown menu when
/// the column is sortable or carries discrete filter options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnHeader {
    Label(String),
    Menu(Menu<TableCommand>),
}

/// Paginated, sortable, searchable table state over a [`Loader`].
pub struct DataTable<T, L> {
    loader: L,
    from: usize,
    page_size: usize,
    sort: String,
    search: String,
    results: Option<Vec<T>>,
    total: Option<usize>,
    load_seq: u64,
    search_debounce: Debouncer,
}

impl<T, L> DataTable<T, L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            from: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: String::new(),
            search: String::new(),
            results: None,
            total: None,
            load_seq: 0,
            search_debounce: Debouncer::new(SEARCH_DEBOUNCE),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Override the ~300ms search quiescence window.
    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.search_debounce = Debouncer::new(window);
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Snapshot of the current pagination/search/sort state. No side
    /// effects; empty search and sort are carried as absent.
    pub fn query(&self) -> TableQuery {
        TableQuery {
            from: self.from,
            page_size: self.page_size,
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            sort: (!self.sort.is_empty()).then(|| self.sort.clone()),
        }
    }

    /// The last successfully loaded page, if any.
    pub fn results(&self) -> Option<&[T]> {
        self.results.as_deref()
    }

    pub fn total(&self) -> Option<usize> {
        self.total
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> &str {
        &self.sort
    }

    pub fn sort_values(&self) -> Vec<SortValue> {
        decode_sort_values(&self.sort)
    }

    /// True while the source may have rows past the current page. Unknown
    /// totals count as "more".
    pub fn has_more_results(&self) -> bool {
        match self.total {
            None => true,
            Some(total) => self.from + self.page_size <= total,
        }
    }

    pub fn can_prev(&self) -> bool {
        self.from > 0
    }

    pub fn can_next(&self) -> bool {
        self.has_more_results()
    }

    /// Set the search text. Absent values normalize to empty; an unchanged
    /// value is a no-op, a changed one arms the debounced search.
    pub fn set_search<'a>(&mut self, value: impl Into<Option<&'a str>>) {
        let value = value.into().unwrap_or("");
        if self.search != value {
            self.search = value.to_string();
            self.search_debounce.trigger();
        }
    }

    /// Deadline of the pending debounced search, for `select!`-style hosts
    /// that want to sleep until it instead of polling [`tick`](Self::tick).
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search_debounce.deadline()
    }

    /// Issue a load ticket together with the query snapshot it covers.
    ///
    /// Use with [`apply_load`](Self::apply_load) when the host drives the
    /// fetch itself; [`do_load`](Self::do_load) wraps the pair.
    pub fn begin_load(&mut self) -> (LoadTicket, TableQuery) {
        self.load_seq += 1;
        (LoadTicket(self.load_seq), self.query())
    }

    /// Store a load outcome, unless a newer ticket has been issued since.
    /// `None` (failed/cancelled load) leaves the current page untouched.
    /// Returns whether the table state changed.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Option<TableResult<T>>) -> bool {
        if ticket.0 != self.load_seq {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.load_seq,
                "discarding stale table load"
            );
            return false;
        }
        match result {
            Some(page) => {
                self.results = page.results;
                self.total = page.total;
                true
            }
            None => false,
        }
    }

    /// Resolve the current query against an in-memory slice; see
    /// [`TableQuery::array_to_table_result`].
    pub fn array_to_table_result<F>(&self, rows: &[T], filter: F) -> TableResult<T>
    where
        T: TableRow + Clone,
        F: Fn(&T) -> bool,
    {
        self.query().array_to_table_result(rows, filter)
    }

    /// Build the header for a column: the plain label when it is neither
    /// sortable nor filterable, otherwise a menu of sort actions, discrete
    /// filter options, and a "Clear Filter" entry while a search is active.
    pub fn column_header(&self, col: &Column<T>) -> ColumnHeader {
        let label = col.header_label();

        if !col.sortable && col.options.is_empty() {
            return ColumnHeader::Label(label);
        }

        let mut items = Vec::new();

        if col.sortable {
            items.push(MenuItem::new(
                format!("Sort Ascending{}", self.check_mark(&col.key, true)),
                TableCommand::SortBy {
                    key: col.key.clone(),
                    ascending: true,
                },
            ));
            items.push(MenuItem::new(
                format!("Sort Descending{}", self.check_mark(&col.key, false)),
                TableCommand::SortBy {
                    key: col.key.clone(),
                    ascending: false,
                },
            ));
        }

        if !col.options.is_empty() {
            if col.sortable {
                items.push(MenuItem::divider());
            }
            for option in &col.options {
                let checked = option.value.eq_ignore_ascii_case(&self.search);
                items.push(MenuItem::new(
                    if checked {
                        format!("{} ✓", option.label)
                    } else {
                        option.label.clone()
                    },
                    TableCommand::SetSearch(option.value.clone()),
                ));
            }
        }

        if !self.search.is_empty() {
            items.push(MenuItem::divider());
            items.push(MenuItem::new(
                "Clear Filter",
                TableCommand::SetSearch(String::new()),
            ));
        }

        let is_selected = col
            .options
            .iter()
            .any(|o| o.value.eq_ignore_ascii_case(&self.search));

        ColumnHeader::Menu(Menu::new(label, items).selected(is_selected))
    }

    fn check_mark(&self, key: &str, ascending: bool) -> &'static str {
        match self.sort_values().first() {
            Some(v) if v.key == key && v.ascending == ascending => " ✓",
            _ => "",
        }
    }
}

impl<T, L> DataTable<T, L>
where
    L: Loader<T>,
{
    /// Run one load round trip: snapshot the query, await the loader, and
    /// store the page if it is defined and still current. Failed loads are
    /// logged and reported as `false`, never propagated.
    pub async fn do_load(&mut self) -> bool {
        let (ticket, query) = self.begin_load();
        let result = match self.loader.load(&query).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("table load failed: {e}");
                None
            }
        };
        self.apply_load(ticket, result)
    }

    /// Page backwards, flooring the offset at zero, and reload.
    pub async fn prev(&mut self) -> bool {
        self.from = self.from.saturating_sub(self.page_size);
        self.do_load().await
    }

    /// Page forwards and reload.
    pub async fn next(&mut self) -> bool {
        self.from += self.page_size;
        self.do_load().await
    }

    /// Replace the entire sort with a single key and reload. Multi-key
    /// sort stays decodable from the wire format but is never constructed
    /// here.
    pub async fn do_sort(&mut self, key: &str, ascending: bool) -> bool {
        self.sort = encode_sort_values(&[SortValue {
            key: key.to_string(),
            ascending,
        }]);
        self.do_load().await
    }

    /// Fire the debounced search once its quiescence window has elapsed:
    /// reset to the first page and reload. Call from the host's event-loop
    /// tick; returns whether a load updated the table.
    pub async fn tick(&mut self) -> bool {
        if self.search_debounce.fire_if_elapsed() {
            self.do_search().await
        } else {
            false
        }
    }

    async fn do_search(&mut self) -> bool {
        self.from = 0;
        self.do_load().await
    }

    /// Apply a header-menu command.
    pub async fn apply(&mut self, command: TableCommand) -> bool {
        match command {
            TableCommand::SortBy { key, ascending } => self.do_sort(&key, ascending).await,
            TableCommand::SetSearch(value) => {
                self.set_search(value.as_str());
                true
            }
        }
    }
}
