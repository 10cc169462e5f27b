use std::sync::Arc;
use tracing::{error, info};

use crate::clients::{HttpInventoryClient, InventoryApi, InventoryError};
use crate::detail::ProductDetail;
use crate::lifecycle::InventoryConfig;
use crate::loader::LoaderClient;
use crate::model::Product;

/// The runtime orchestrator for one dashboard session.
///
/// `DashboardSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the loader actor
/// - **Dependency Wiring**: Handing the same inventory client to the loader
///   and to every detail controller
///
/// # Example
///
/// ```ignore
/// let system = DashboardSystem::new(InventoryConfig::load("invenhelper.toml")?)?;
///
/// let report = system.loader.load().await?;
/// let stats = system.loader.stats().await?;
///
/// let mut detail = system.detail(products[0].clone());
/// detail.increase_quantity(10).await?;
///
/// system.shutdown().await?;
/// ```
pub struct DashboardSystem {
    /// Client for the loader actor
    pub loader: LoaderClient,

    inventory: Arc<dyn InventoryApi>,

    /// Task handle for the loader actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl DashboardSystem {
    /// Builds the HTTP inventory client from `config` and starts the loader.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: InventoryConfig) -> Result<Self, InventoryError> {
        let inventory = HttpInventoryClient::new(config)?;
        Ok(Self::with_inventory(Arc::new(inventory)))
    }

    /// Starts the loader against any [`InventoryApi`] implementation.
    pub fn with_inventory(inventory: Arc<dyn InventoryApi>) -> Self {
        let (actor, loader) = crate::loader::new(inventory.clone());
        let handle = tokio::spawn(actor.run());

        Self {
            loader,
            inventory,
            handle,
        }
    }

    pub fn inventory(&self) -> Arc<dyn InventoryApi> {
        self.inventory.clone()
    }

    /// A detail controller for `product`, sharing this system's inventory client.
    pub fn detail(&self, product: Product) -> ProductDetail {
        ProductDetail::new(self.inventory.clone(), product)
    }

    /// Gracefully shuts down the loader.
    ///
    /// Dropping the loader client closes the actor's mailbox; the actor aborts
    /// any in-flight fetches and exits. Clones of the client held elsewhere
    /// keep the actor alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down dashboard...");

        drop(self.loader);

        if let Err(e) = self.handle.await {
            error!("Loader task failed: {:?}", e);
            return Err(format!("Loader task failed: {:?}", e));
        }

        info!("Dashboard shutdown complete.");
        Ok(())
    }
}
