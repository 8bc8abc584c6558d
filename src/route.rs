//! Master–detail routing wrapper
//!
//! Two logical modes driven by a routed path segment: **List** (the nested
//! table) and **Detail** (one item fetched by name). The host's router
//! calls [`before_navigate`](MasterDetail::before_navigate) with the child
//! path and proceeds only when it reports success.

use ratatui::{layout::Rect, Frame};

use crate::query::{ItemLoader, Loader};
use crate::table::{DataTable, TableRow};
use crate::ui::theme::Theme;
use crate::ui::widgets::table::{self, TableViewProps, TableViewState};

/// A list view with an optional routed detail item.
pub struct MasterDetail<T, L, G> {
    table: DataTable<T, L>,
    items: G,
    detail: Option<T>,
}

impl<T, L, G> MasterDetail<T, L, G> {
    pub fn new(table: DataTable<T, L>, items: G) -> Self {
        Self {
            table,
            items,
            detail: None,
        }
    }

    pub fn table(&self) -> &DataTable<T, L> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<T, L> {
        &mut self.table
    }

    /// The currently routed item, when in detail mode.
    pub fn detail(&self) -> Option<&T> {
        self.detail.as_ref()
    }
}

impl<T, L, G> MasterDetail<T, L, G>
where
    L: Loader<T>,
    G: ItemLoader<Item = T>,
{
    /// Gate navigation into a child path.
    ///
    /// A single leading `/` is stripped. An empty remainder enters list
    /// mode: the detail is cleared, the table reloads, and navigation
    /// always proceeds. Anything else attempts detail mode: the item
    /// loader decides, and an absent item (or a loader error, which is
    /// logged) rejects the navigation with the detail left unset.
    pub async fn before_navigate(&mut self, child_path: &str) -> bool {
        let path = child_path.strip_prefix('/').unwrap_or(child_path);

        if path.is_empty() {
            self.detail = None;
            self.table.do_load().await;
            return true;
        }

        self.detail = match self.items.get_item(path).await {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!("detail load failed for {path:?}: {e}");
                None
            }
        };
        self.detail.is_some()
    }

    /// Forward the event-loop tick to the nested table so debounced
    /// search keeps working in list mode.
    pub async fn tick(&mut self) -> bool {
        self.table.tick().await
    }
}

impl<T, L, G> MasterDetail<T, L, G>
where
    T: TableRow,
{
    /// Render the current mode: the routed detail when one is loaded,
    /// nothing while the table has never loaded, otherwise the table
    /// (optionally preceded by its search bar, per the props).
    pub fn render<F>(
        &self,
        frame: &mut Frame,
        area: Rect,
        props: &TableViewProps<'_, T>,
        state: &mut TableViewState,
        theme: &Theme,
        detail_view: F,
    ) where
        F: FnOnce(&T, &mut Frame, Rect, &Theme),
    {
        if let Some(item) = &self.detail {
            detail_view(item, frame, area, theme);
            return;
        }
        if self.table.results().is_none() {
            return;
        }
        table::render(frame, area, &self.table, props, state, theme);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::error::LoadError;
    use crate::query::{TableQuery, TableResult};
    use crate::table::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Project {
        name: String,
    }

    impl TableRow for Project {
        fn field(&self, key: &str) -> FieldValue {
            match key {
                "name" => self.name.as_str().into(),
                _ => FieldValue::Empty,
            }
        }
    }

    #[derive(Default)]
    struct ListLoader {
        calls: usize,
    }

    #[async_trait]
    impl Loader<Project> for ListLoader {
        async fn load(
            &mut self,
            query: &TableQuery,
        ) -> Result<Option<TableResult<Project>>, LoadError> {
            self.calls += 1;
            let rows = vec![Project {
                name: "alpha".to_string(),
            }];
            Ok(Some(query.array_to_table_result(&rows, |_| true)))
        }
    }

    struct ProjectLoader {
        known: HashMap<String, Project>,
        fail: bool,
    }

    #[async_trait]
    impl ItemLoader for ProjectLoader {
        type Item = Project;

        async fn get_item(&mut self, name: &str) -> Result<Option<Project>, LoadError> {
            if self.fail {
                return Err(LoadError::msg("item backend down"));
            }
            Ok(self.known.get(name).cloned())
        }
    }

    fn wrapper(fail: bool) -> MasterDetail<Project, ListLoader, ProjectLoader> {
        let known = HashMap::from([(
            "alpha".to_string(),
            Project {
                name: "alpha".to_string(),
            },
        )]);
        MasterDetail::new(
            DataTable::new(ListLoader::default()),
            ProjectLoader { known, fail },
        )
    }

    #[tokio::test]
    async fn empty_path_enters_list_mode_and_loads() {
        let mut md = wrapper(false);
        assert!(md.before_navigate("").await);
        assert_eq!(md.table().loader().calls, 1);
        assert!(md.detail().is_none());
        assert!(md.table().results().is_some());
    }

    #[tokio::test]
    async fn leading_separator_is_stripped() {
        let mut md = wrapper(false);
        assert!(md.before_navigate("/").await);
        assert_eq!(md.table().loader().calls, 1);

        assert!(md.before_navigate("/alpha").await);
        assert_eq!(md.detail().map(|p| p.name.as_str()), Some("alpha"));
    }

    #[tokio::test]
    async fn known_item_enters_detail_mode() {
        let mut md = wrapper(false);
        assert!(md.before_navigate("alpha").await);
        assert_eq!(md.detail().map(|p| p.name.as_str()), Some("alpha"));
    }

    #[tokio::test]
    async fn unknown_item_rejects_navigation() {
        let mut md = wrapper(false);
        assert!(!md.before_navigate("missing").await);
        assert!(md.detail().is_none());
        assert_eq!(md.table().loader().calls, 0, "detail miss never loads the list");
    }

    #[tokio::test]
    async fn item_loader_error_rejects_navigation() {
        let mut md = wrapper(true);
        assert!(!md.before_navigate("alpha").await);
        assert!(md.detail().is_none());
    }

    #[tokio::test]
    async fn returning_to_list_clears_the_detail() {
        let mut md = wrapper(false);
        assert!(md.before_navigate("alpha").await);
        assert!(md.detail().is_some());

        assert!(md.before_navigate("").await);
        assert!(md.detail().is_none());
    }
}
