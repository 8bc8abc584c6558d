//! Error types

use thiserror::Error;

/// Failure reported by a [`Loader`](crate::query::Loader) or
/// [`ItemLoader`](crate::query::ItemLoader).
///
/// The widgets never inspect the cause; a failed load leaves the current
/// table state untouched. The wrapper exists so loaders backed by sqlite,
/// HTTP or anything else can surface their own error without this crate
/// knowing its taxonomy.
#[derive(Debug, Error)]
#[error("load failed: {source}")]
pub struct LoadError {
    #[from]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl LoadError {
    /// Wrap an arbitrary source error.
    pub fn new(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Build an error from a plain message.
    pub fn msg(msg: impl Into<String>) -> Self {
        let msg: String = msg.into();
        Self { source: msg.into() }
    }
}
