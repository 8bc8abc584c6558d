//! Query and result contracts exchanged between a table and its loader

pub mod sort;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::table::TableRow;

pub use sort::{decode_sort_values, encode_sort_values, SortValue};

/// Snapshot of a table's pagination, search and sort state.
///
/// Produced by [`DataTable::query`](crate::table::DataTable::query) and
/// handed to the [`Loader`]. Field names follow the wire convention so a
/// remote loader can forward the query as JSON unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    /// Zero-based offset of the first requested row.
    pub from: usize,
    pub page_size: usize,
    /// Search text, absent when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Encoded sort keys, absent when unsorted. See [`sort`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl TableQuery {
    /// The decoded sort keys, in order. Empty when unsorted.
    pub fn sort_values(&self) -> Vec<SortValue> {
        decode_sort_values(self.sort.as_deref().unwrap_or(""))
    }

    /// Resolve the query against an in-memory slice.
    ///
    /// The convenience path for loaders backed by a local collection
    /// instead of a remote source: when the query carries a search term the
    /// caller's predicate decides which rows match (it typically closes
    /// over the search text), then rows are stable-sorted by the first
    /// sort key only and sliced to `[from, from + page_size)`.
    ///
    /// `total` reports the filtered row count, so pagination reflects what
    /// the user can actually page through.
    pub fn array_to_table_result<T, F>(&self, rows: &[T], filter: F) -> TableResult<T>
    where
        T: TableRow + Clone,
        F: Fn(&T) -> bool,
    {
        let mut rows: Vec<T> = match &self.search {
            Some(search) if !search.is_empty() => {
                rows.iter().filter(|row| filter(row)).cloned().collect()
            }
            _ => rows.to_vec(),
        };

        // Multi-key sort is representable in the wire format but only the
        // primary key affects in-memory ordering.
        if let Some(value) = self.sort_values().first() {
            if value.ascending {
                rows.sort_by(|a, b| a.field(&value.key).cmp(&b.field(&value.key)));
            } else {
                rows.sort_by(|a, b| b.field(&value.key).cmp(&a.field(&value.key)));
            }
        }

        let total = rows.len();
        let results = rows
            .into_iter()
            .skip(self.from)
            .take(self.page_size)
            .collect();

        TableResult {
            total: Some(total),
            results: Some(results),
        }
    }
}

/// One page of loaded rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableResult<T> {
    /// Total number of rows matching the query, when the source knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<T>>,
}

impl<T> TableResult<T> {
    pub fn new(results: Vec<T>) -> Self {
        Self {
            total: None,
            results: Some(results),
        }
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

/// Data source for a [`DataTable`](crate::table::DataTable).
///
/// `Ok(None)` means "load failed or was cancelled, leave the table's
/// current page untouched". `Err` means the same thing with a cause worth
/// logging; the table never propagates it.
#[async_trait]
pub trait Loader<T>: Send {
    async fn load(&mut self, query: &TableQuery) -> Result<Option<TableResult<T>>, LoadError>;
}

/// Single-item source for a [`MasterDetail`](crate::route::MasterDetail)
/// wrapper. `Ok(None)` means the path segment names nothing, and the
/// navigation is rejected.
#[async_trait]
pub trait ItemLoader: Send {
    type Item;

    async fn get_item(&mut self, name: &str) -> Result<Option<Self::Item>, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_serializes_with_wire_names() {
        let query = TableQuery {
            from: 20,
            page_size: 10,
            search: Some("smith".to_string()),
            sort: Some("name desc".to_string()),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "from": 20,
                "pageSize": 10,
                "search": "smith",
                "sort": "name desc",
            })
        );
    }

    #[test]
    fn empty_search_and_sort_are_omitted() {
        let query = TableQuery {
            from: 0,
            page_size: 10,
            search: None,
            sort: None,
        };
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"from":0,"pageSize":10}"#);

        let back: TableQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
    }
}
