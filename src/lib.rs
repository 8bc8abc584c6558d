//! Paginated, sortable, searchable data table widgets for ratatui.
//!
//! The core is [`DataTable`]: a state controller tracking pagination
//! offset, page size, sort order and debounced search text. Every user
//! interaction turns that state into a [`TableQuery`] for a
//! caller-supplied async [`Loader`], and whatever page comes back is
//! cached and rendered. Around it:
//!
//! - a sort-key codec ([`query::sort`]) for the query's wire format,
//! - column descriptions with header dropdown menus ([`table::columns`],
//!   [`ui::widgets::menu`]),
//! - a search bar and the table view itself ([`ui::widgets`]),
//! - a master–detail routing wrapper ([`MasterDetail`]) switching between
//!   the list and a single loaded item based on a path segment.
//!
//! The host application owns the terminal, the event loop and the data
//! sources; see `datagrid-demo` for a complete wiring.

pub mod error;
pub mod query;
pub mod route;
pub mod table;
pub mod ui;
pub mod utils;

pub use error::LoadError;
pub use query::{
    decode_sort_values, encode_sort_values, ItemLoader, Loader, SortValue, TableQuery, TableResult,
};
pub use route::MasterDetail;
pub use table::{
    Column, ColumnHeader, DataTable, FieldOption, FieldValue, LoadTicket, TableCommand, TableRow,
};
pub use ui::theme::Theme;
pub use ui::widgets::{TableViewEvent, TableViewProps, TableViewState};
