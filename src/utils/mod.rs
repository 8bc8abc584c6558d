pub mod debounce;
pub mod text;

pub use debounce::Debouncer;
pub use text::{friendly_name, truncate};
