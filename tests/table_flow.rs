//! End-to-end table controller flows against a scripted loader.

use std::time::Duration;

use async_trait::async_trait;

use datagrid_tui::{
    DataTable, FieldValue, LoadError, Loader, TableQuery, TableResult, TableRow,
};

#[derive(Debug, Clone, PartialEq)]
struct Book {
    title: String,
    year: i64,
}

fn book(title: &str, year: i64) -> Book {
    Book {
        title: title.to_string(),
        year,
    }
}

impl TableRow for Book {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "title" => self.title.as_str().into(),
            "year" => self.year.into(),
            _ => FieldValue::Empty,
        }
    }
}

/// In-memory loader that records every query it sees and can be taken
/// offline to script failures.
struct ShelfLoader {
    books: Vec<Book>,
    queries: Vec<TableQuery>,
    offline: bool,
}

impl ShelfLoader {
    fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            queries: Vec::new(),
            offline: false,
        }
    }
}

#[async_trait]
impl Loader<Book> for ShelfLoader {
    async fn load(&mut self, query: &TableQuery) -> Result<Option<TableResult<Book>>, LoadError> {
        self.queries.push(query.clone());
        if self.offline {
            return Ok(None);
        }
        let needle = query.search.as_deref().unwrap_or("").to_lowercase();
        Ok(Some(query.array_to_table_result(&self.books, |b| {
            b.title.to_lowercase().contains(&needle)
        })))
    }
}

fn shelf() -> Vec<Book> {
    (1..=25)
        .map(|i| book(&format!("Volume {i:02}"), 1999 + i))
        .collect()
}

fn table() -> DataTable<Book, ShelfLoader> {
    DataTable::new(ShelfLoader::new(shelf()))
}

#[tokio::test(start_paused = true)]
async fn debounce_coalesces_rapid_search_updates() {
    let mut t = table();
    t.next().await; // move off the first page so the reset is observable
    assert_eq!(t.from(), 10);

    for text in ["a", "ab", "abc"] {
        t.set_search(text);
        assert!(!t.tick().await, "no load inside the quiescence window");
        tokio::time::advance(Duration::from_millis(50)).await;
    }

    tokio::time::advance(Duration::from_millis(301)).await;
    assert!(t.tick().await, "one trailing load after quiescence");
    assert!(!t.tick().await, "debounce fires only once");

    let queries = &t.loader().queries;
    assert_eq!(queries.len(), 2, "the pagination load plus one search load");
    let last = queries.last().unwrap();
    assert_eq!(last.search.as_deref(), Some("abc"));
    assert_eq!(last.from, 0, "search resets to the first page");
    assert_eq!(t.from(), 0);
}

#[tokio::test(start_paused = true)]
async fn unchanged_search_triggers_no_load() {
    let mut t = table();
    t.set_search("");
    t.set_search(None);

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(!t.tick().await);
    assert!(t.loader().queries.is_empty());
}

#[tokio::test]
async fn pagination_round_trip() {
    let mut t = table();
    assert!(t.do_load().await);
    let first = t.results().unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first[0].title, "Volume 01");
    assert_eq!(t.total(), Some(25));
    assert!(!t.can_prev());
    assert!(t.can_next());

    t.next().await;
    t.next().await;
    assert_eq!(t.from(), 20);
    assert_eq!(t.results().unwrap().len(), 5);
    assert!(!t.can_next(), "past the last full page");
    assert!(t.can_prev());

    t.prev().await;
    t.prev().await;
    assert_eq!(t.from(), 0);
    assert!(!t.can_prev());
}

#[tokio::test]
async fn failed_load_keeps_the_previous_page() {
    let mut t = table();
    assert!(t.do_load().await);
    let before: Vec<Book> = t.results().unwrap().to_vec();

    t.loader_mut().offline = true;
    assert!(!t.do_load().await);
    assert_eq!(t.results().unwrap(), before.as_slice());
    assert_eq!(t.total(), Some(25));
}

#[tokio::test]
async fn sorting_reloads_with_the_encoded_key() {
    let mut t = table();
    assert!(t.do_sort("year", false).await);

    let query = t.loader().queries.last().unwrap();
    assert_eq!(query.sort.as_deref(), Some("year desc"));

    let page = t.results().unwrap();
    assert_eq!(page[0].year, 2024);
    assert_eq!(page[9].year, 2015);
}

#[tokio::test(start_paused = true)]
async fn search_filters_and_resets_pagination() {
    let mut t = table();
    t.do_load().await;
    t.next().await;

    t.set_search("volume 2");
    tokio::time::advance(Duration::from_millis(301)).await;
    assert!(t.tick().await);

    // Volume 20..25
    assert_eq!(t.from(), 0);
    assert_eq!(t.total(), Some(6));
    assert_eq!(t.results().unwrap().len(), 6);
    assert!(t
        .results()
        .unwrap()
        .iter()
        .all(|b| b.title.starts_with("Volume 2")));
}

#[tokio::test]
async fn query_round_trips_through_json() {
    let mut t = table();
    t.set_search("volume");
    t.do_sort("title", true).await;

    let query = t.query();
    let json = serde_json::to_string(&query).unwrap();
    let back: TableQuery = serde_json::from_str(&json).unwrap();
    assert_eq!(back, query);
}
