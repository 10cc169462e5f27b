//! Error types for the Product Loader.

use thiserror::Error;

use crate::clients::InventoryError;

/// Errors that can occur during load operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoaderError {
    /// The loader actor is no longer running.
    #[error("Loader closed")]
    ActorClosed,

    /// The loader dropped the response channel before answering.
    #[error("Loader dropped response channel")]
    ActorDropped,

    /// The identifier listing failed, so no product could be fetched.
    #[error("Failed to list product identifiers: {0}")]
    Listing(InventoryError),

    /// A newer load started before this one finished; its results were discarded.
    #[error("Load {generation} superseded by a newer load")]
    Superseded { generation: u64 },

    /// The load was cancelled before it finished.
    #[error("Load {generation} cancelled")]
    Cancelled { generation: u64 },
}
