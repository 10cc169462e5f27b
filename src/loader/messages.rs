//! # Loader Messages
//!
//! Requests sent from [`LoaderClient`](super::LoaderClient) to
//! [`LoaderActor`](super::LoaderActor), and the completions produced by the
//! fetch tasks the actor spawns.

use tokio::sync::oneshot;

use crate::clients::InventoryError;
use crate::model::{Product, ProductStat};

use super::LoaderError;

/// Type alias for the one-shot response channel used by the loader.
pub type Response<T> = oneshot::Sender<Result<T, LoaderError>>;

/// A product on display, with the stat derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub product: Product,
    pub stat: ProductStat,
}

impl DisplayEntry {
    pub fn new(product: Product) -> Self {
        let stat = ProductStat::from_product(&product);
        Self { product, stat }
    }
}

/// What happened to one identifier during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub identifier: String,
    pub result: Result<ProductStat, InventoryError>,
}

/// Per-identifier results of one load, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub generation: u64,
    pub outcomes: Vec<LoadOutcome>,
}

impl LoadReport {
    pub fn loaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &LoadOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_complete(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Requests handled by the loader actor.
#[derive(Debug)]
pub enum LoaderRequest {
    /// Start a new generation; answered once every fetch of it has settled.
    Load { respond_to: Response<LoadReport> },
    /// Abort the running generation, if any.
    Cancel { respond_to: Response<()> },
    /// Snapshot of the display list.
    Entries { respond_to: Response<Vec<DisplayEntry>> },
    /// Swap in a fresher copy of a displayed product; answers whether it was on display.
    Replace {
        product: Product,
        respond_to: Response<bool>,
    },
}

/// Output of a task spawned by the actor, tagged with the generation that spawned it.
#[derive(Debug)]
pub(crate) enum Completion {
    Listed {
        generation: u64,
        result: Result<Vec<String>, InventoryError>,
    },
    Fetched {
        generation: u64,
        identifier: String,
        result: Result<Product, InventoryError>,
    },
}
