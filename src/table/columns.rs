//! Column descriptions and row field access

use std::cmp::Ordering;
use std::fmt;

use crate::utils::friendly_name;

/// A single value extracted from a row by key.
///
/// This is how the table reads a row without knowing its type: default
/// cell text comes from the value's display form, local sorting from its
/// ordering. Numeric variants order numerically, and mixed pages order
/// empty values first, then numbers, then text.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Integer(_) | Self::Float(_) => 1,
            Self::Text(_) => 2,
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(i) => *i as f64,
            Self::Float(f) => *f,
            _ => f64::NAN,
        }
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) if a.rank() != b.rank() => a.rank().cmp(&b.rank()),
            (Self::Empty, Self::Empty) => Ordering::Equal,
            // Mixed integer/float comparison falls back to a total float order.
            (a, b) => a.as_f64().total_cmp(&b.as_f64()),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

/// Named field access for rows displayed in a table.
///
/// Unknown keys should return [`FieldValue::Empty`].
pub trait TableRow {
    fn field(&self, key: &str) -> FieldValue;
}

/// A selectable discrete filter choice: picking one sets the table's
/// search text to `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

type DisplayFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

/// One displayed table column.
///
/// ```
/// use datagrid_tui::table::{Column, FieldOption};
///
/// # struct Contact { city: String }
/// let column: Column<Contact> = Column::new("city")
///     .label("City")
///     .sortable()
///     .options(vec![FieldOption::new("lisbon", "Lisbon")]);
/// ```
pub struct Column<T> {
    pub(crate) key: String,
    pub(crate) label: Option<String>,
    pub(crate) display: Option<DisplayFn<T>>,
    pub(crate) sortable: bool,
    pub(crate) options: Vec<FieldOption>,
}

impl<T> Column<T> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            display: None,
            sortable: false,
            options: Vec::new(),
        }
    }

    /// Explicit header label. Without one the key's friendly name is used.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Custom cell rendering instead of the row's raw field value.
    pub fn display(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.display = Some(Box::new(f));
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Discrete filter choices offered in the column's header menu.
    pub fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn field_options(&self) -> &[FieldOption] {
        &self.options
    }

    pub fn header_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| friendly_name(&self.key))
    }

    pub(crate) fn cell_text(&self, row: &T) -> String
    where
        T: TableRow,
    {
        match &self.display {
            Some(f) => f(row),
            None => row.field(&self.key).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_order_numerically() {
        let mut values = vec![
            FieldValue::Integer(10),
            FieldValue::Integer(2),
            FieldValue::Float(2.5),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                FieldValue::Integer(2),
                FieldValue::Float(2.5),
                FieldValue::Integer(10),
            ]
        );
    }

    #[test]
    fn empty_sorts_before_numbers_before_text() {
        let mut values = vec![
            FieldValue::Text("a".into()),
            FieldValue::Integer(1),
            FieldValue::Empty,
        ];
        values.sort();
        assert!(matches!(values[0], FieldValue::Empty));
        assert!(matches!(values[1], FieldValue::Integer(1)));
        assert!(matches!(values[2], FieldValue::Text(_)));
    }

    #[test]
    fn header_label_falls_back_to_friendly_name() {
        struct Row;
        let with_label: Column<Row> = Column::new("firstName").label("Given name");
        let without: Column<Row> = Column::new("firstName");
        assert_eq!(with_label.header_label(), "Given name");
        assert_eq!(without.header_label(), "First Name");
    }
}
