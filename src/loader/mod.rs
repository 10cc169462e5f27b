//! # Product Loader
//!
//! Fetches every product from the inventory and maintains the dashboard's
//! display list of products and their chart stats.
//!
//! ## Structure
//!
//! - [`actor`] - [`LoaderActor`], the task that owns the display list
//! - [`client`] - [`LoaderClient`], the cloneable request handle
//! - [`messages`] - requests, [`DisplayEntry`] and [`LoadReport`]
//! - [`error`] - [`LoaderError`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, loader) = loader::new(inventory);
//! tokio::spawn(actor.run());
//!
//! let report = loader.load().await?;
//! for failure in report.failed() {
//!     eprintln!("{} could not be loaded", failure.identifier);
//! }
//! let stats = loader.stats().await?;
//! ```

pub mod actor;
pub mod client;
pub mod error;
pub mod messages;

pub use actor::*;
pub use client::*;
pub use error::*;
pub use messages::{DisplayEntry, LoadOutcome, LoadReport, LoaderRequest};

use crate::clients::InventoryApi;
use std::sync::Arc;

/// Creates a new loader actor and its client.
pub fn new(inventory: Arc<dyn InventoryApi>) -> (LoaderActor, LoaderClient) {
    LoaderActor::new(32, inventory)
}
