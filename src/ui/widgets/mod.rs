pub mod menu;
pub mod searchbar;
pub mod table;

pub use menu::{Menu, MenuItem, MenuOutcome, MenuState};
pub use searchbar::SearchBar;
pub use table::{TableViewEvent, TableViewProps, TableViewState};
