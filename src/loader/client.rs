//! # Loader Client
//!
//! Cloneable handle to the [`LoaderActor`](super::LoaderActor). Holds only a
//! sender; dropping every clone shuts the actor down.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::model::{Product, ProductStat};

use super::messages::{DisplayEntry, LoadReport, LoaderRequest, Response};
use super::LoaderError;

#[derive(Clone)]
pub struct LoaderClient {
    sender: mpsc::Sender<LoaderRequest>,
}

impl LoaderClient {
    pub fn new(sender: mpsc::Sender<LoaderRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> LoaderRequest,
    ) -> Result<T, LoaderError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| LoaderError::ActorClosed)?;
        response.await.map_err(|_| LoaderError::ActorDropped)?
    }

    /// Rebuilds the display list from the inventory.
    ///
    /// Resolves once every product fetch has settled. Fails with
    /// [`LoaderError::Superseded`] if another load starts first.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<LoadReport, LoaderError> {
        debug!("Sending request");
        self.request(|respond_to| LoaderRequest::Load { respond_to })
            .await
    }

    /// Aborts the running load; its caller gets [`LoaderError::Cancelled`].
    #[instrument(skip(self))]
    pub async fn cancel(&self) -> Result<(), LoaderError> {
        debug!("Sending request");
        self.request(|respond_to| LoaderRequest::Cancel { respond_to })
            .await
    }

    /// The display list, in arrival order.
    pub async fn entries(&self) -> Result<Vec<DisplayEntry>, LoaderError> {
        self.request(|respond_to| LoaderRequest::Entries { respond_to })
            .await
    }

    /// Chart data for every displayed product.
    pub async fn stats(&self) -> Result<Vec<ProductStat>, LoaderError> {
        Ok(self.entries().await?.into_iter().map(|e| e.stat).collect())
    }

    /// Every displayed product.
    pub async fn products(&self) -> Result<Vec<Product>, LoaderError> {
        Ok(self.entries().await?.into_iter().map(|e| e.product).collect())
    }

    /// Replaces a displayed product with a fresher copy, recomputing its stat.
    ///
    /// Returns `false` if the product is not on display.
    #[instrument(skip(self, product), fields(identifier = %product.identifier))]
    pub async fn replace_product(&self, product: Product) -> Result<bool, LoaderError> {
        debug!("Sending request");
        self.request(|respond_to| LoaderRequest::Replace {
            product,
            respond_to,
        })
        .await
    }
}
