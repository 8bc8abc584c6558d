//! Sample contact directory backing the demo table

use async_trait::async_trait;
use chrono::NaiveDate;

use datagrid_tui::{FieldValue, ItemLoader, LoadError, Loader, TableQuery, TableResult, TableRow};

/// One row in the demo directory
#[derive(Debug, Clone)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub city: String,
    pub age: u32,
    pub joined: NaiveDate,
}

impl Contact {
    fn new(name: &str, city: &str, age: u32, joined: (i32, u32, u32)) -> Self {
        let handle = name.to_lowercase().replace(' ', ".");
        Self {
            name: name.to_string(),
            email: format!("{handle}@example.com"),
            city: city.to_string(),
            age,
            joined: NaiveDate::from_ymd_opt(joined.0, joined.1, joined.2)
                .unwrap_or_default(),
        }
    }

    /// Case-insensitive match against name, email or city.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.city.to_lowercase().contains(needle)
    }
}

impl TableRow for Contact {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "name" => self.name.as_str().into(),
            "email" => self.email.as_str().into(),
            "city" => self.city.as_str().into(),
            "age" => self.age.into(),
            "joined" => self.joined.format("%Y-%m-%d").to_string().into(),
            _ => FieldValue::Empty,
        }
    }
}

/// Loader over the in-memory directory
pub struct DirectoryLoader {
    contacts: Vec<Contact>,
}

impl DirectoryLoader {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl Loader<Contact> for DirectoryLoader {
    async fn load(&mut self, query: &TableQuery) -> Result<Option<TableResult<Contact>>, LoadError> {
        let needle = query
            .search
            .as_deref()
            .unwrap_or("")
            .to_lowercase();
        Ok(Some(
            query.array_to_table_result(&self.contacts, |c| c.matches(&needle)),
        ))
    }
}

/// Item loader for the detail route, keyed by contact name
pub struct ContactLoader {
    contacts: Vec<Contact>,
}

impl ContactLoader {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl ItemLoader for ContactLoader {
    type Item = Contact;

    async fn get_item(&mut self, name: &str) -> Result<Option<Contact>, LoadError> {
        Ok(self
            .contacts
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }
}

/// The demo data set
pub fn sample_contacts() -> Vec<Contact> {
    vec![
        Contact::new("Ada Verne", "Lisbon", 34, (2019, 3, 12)),
        Contact::new("Bruno Keller", "Berlin", 41, (2017, 11, 2)),
        Contact::new("Carla Mendes", "Lisbon", 28, (2021, 6, 30)),
        Contact::new("Daniel Okafor", "Lagos", 37, (2016, 1, 19)),
        Contact::new("Elena Petrova", "Riga", 45, (2015, 9, 8)),
        Contact::new("Felix Brand", "Berlin", 23, (2023, 2, 14)),
        Contact::new("Grace Lin", "Taipei", 31, (2020, 7, 22)),
        Contact::new("Hugo Martins", "Porto", 52, (2012, 4, 3)),
        Contact::new("Iris Nakamura", "Osaka", 29, (2022, 10, 11)),
        Contact::new("Jonas Weber", "Berlin", 38, (2018, 5, 27)),
        Contact::new("Katya Ivanova", "Riga", 26, (2023, 8, 1)),
        Contact::new("Liam Doyle", "Dublin", 44, (2014, 12, 9)),
        Contact::new("Mara Costa", "Lisbon", 33, (2019, 10, 5)),
        Contact::new("Nils Hansen", "Oslo", 40, (2016, 6, 17)),
        Contact::new("Olivia Reyes", "Madrid", 27, (2022, 3, 8)),
        Contact::new("Pedro Alves", "Porto", 36, (2018, 9, 24)),
        Contact::new("Quinn Harper", "Dublin", 30, (2021, 1, 15)),
        Contact::new("Rosa Delgado", "Madrid", 49, (2013, 7, 29)),
        Contact::new("Sven Larsson", "Oslo", 35, (2019, 2, 6)),
        Contact::new("Tomas Novak", "Prague", 42, (2015, 11, 20)),
        Contact::new("Una Byrne", "Dublin", 24, (2024, 4, 2)),
        Contact::new("Viktor Stein", "Berlin", 47, (2014, 8, 13)),
        Contact::new("Wanda Silva", "Lisbon", 39, (2017, 5, 10)),
        Contact::new("Xavier Dupont", "Lyon", 32, (2020, 12, 18)),
        Contact::new("Yuki Tanaka", "Osaka", 25, (2023, 6, 7)),
        Contact::new("Zara Ahmed", "Lagos", 43, (2015, 3, 26)),
    ]
}
