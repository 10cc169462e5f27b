//! # Loader Actor
//!
//! The [`LoaderActor`] owns the display list for the lifetime of a view. It
//! is the "server" half: one Tokio task that processes its mailbox and the
//! completions of the fetches it spawned, one message at a time, so the list
//! needs no lock.
//!
//! ## Load algorithm
//!
//! 1. A `Load` request supersedes the running generation (its caller gets
//!    [`LoaderError::Superseded`], its tasks are aborted), clears the list and
//!    spawns the identifier listing.
//! 2. When the listing arrives, one fetch per identifier is spawned into the
//!    same [`JoinSet`]. Fetches run concurrently and are consumed in arrival
//!    order.
//! 3. Each successful fetch derives a [`ProductStat`](crate::model::ProductStat)
//!    and upserts the entry by identifier. Each failed fetch is logged and
//!    recorded in the [`LoadReport`].
//! 4. When every fetch has settled, the caller receives the report.
//!
//! Completions carry the generation that spawned them; anything that is not
//! from the pending generation is discarded.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{self, JoinSet};
use tracing::{debug, error, info, warn};

use crate::clients::InventoryApi;
use crate::model::{Product, ProductStat};

use super::messages::{
    Completion, DisplayEntry, LoadOutcome, LoadReport, LoaderRequest, Response,
};
use super::{LoaderClient, LoaderError};

/// A load waiting for its listing or fetches to settle.
struct PendingLoad {
    generation: u64,
    respond_to: Response<LoadReport>,
    /// `None` until the listing arrives.
    remaining: Option<usize>,
    outcomes: Vec<LoadOutcome>,
}

pub struct LoaderActor {
    receiver: mpsc::Receiver<LoaderRequest>,
    inventory: Arc<dyn InventoryApi>,
    entries: Vec<DisplayEntry>,
    generation: u64,
    pending: Option<PendingLoad>,
    in_flight: JoinSet<Completion>,
    /// Generation of every task still in `in_flight`.
    task_generations: HashMap<task::Id, u64>,
}

impl LoaderActor {
    /// Creates a new `LoaderActor` and its associated `LoaderClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `inventory` - Where products are fetched from.
    pub fn new(buffer_size: usize, inventory: Arc<dyn InventoryApi>) -> (Self, LoaderClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            inventory,
            entries: Vec::new(),
            generation: 0,
            pending: None,
            in_flight: JoinSet::new(),
            task_generations: HashMap::new(),
        };
        (actor, LoaderClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// Mailbox requests take priority over fetch completions, so a `Load` or
    /// `Cancel` that is already queued wins over results still being drained.
    pub async fn run(mut self) {
        info!("Loader started");

        loop {
            tokio::select! {
                biased;
                msg = self.receiver.recv() => match msg {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                Some(joined) = self.in_flight.join_next_with_id(), if !self.in_flight.is_empty() => {
                    match joined {
                        Ok((id, completion)) => {
                            self.task_generations.remove(&id);
                            self.handle_completion(completion);
                        }
                        Err(e) => {
                            let generation = self.task_generations.remove(&e.id());
                            if !e.is_cancelled() {
                                self.handle_task_panic(e, generation);
                            }
                        }
                    }
                }
            }
        }

        self.in_flight.abort_all();
        info!(size = self.entries.len(), "Shutdown");
    }

    fn handle_request(&mut self, request: LoaderRequest) {
        match request {
            LoaderRequest::Load { respond_to } => {
                self.abandon_pending(|generation| LoaderError::Superseded { generation });

                self.generation += 1;
                let generation = self.generation;
                self.entries.clear();
                info!(generation, "Load started");

                let inventory = self.inventory.clone();
                self.spawn_task(generation, async move {
                    Completion::Listed {
                        generation,
                        result: inventory.list_identifiers().await,
                    }
                });
                self.pending = Some(PendingLoad {
                    generation,
                    respond_to,
                    remaining: None,
                    outcomes: Vec::new(),
                });
            }
            LoaderRequest::Cancel { respond_to } => {
                self.abandon_pending(|generation| LoaderError::Cancelled { generation });
                let _ = respond_to.send(Ok(()));
            }
            LoaderRequest::Entries { respond_to } => {
                let _ = respond_to.send(Ok(self.entries.clone()));
            }
            LoaderRequest::Replace {
                product,
                respond_to,
            } => {
                let identifier = product.identifier.clone();
                let found = match self
                    .entries
                    .iter_mut()
                    .find(|e| e.product.identifier == identifier)
                {
                    Some(entry) => {
                        *entry = DisplayEntry::new(product);
                        true
                    }
                    None => false,
                };
                debug!(%identifier, found, "Replace");
                let _ = respond_to.send(Ok(found));
            }
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Listed { generation, result } => {
                if !self.is_pending(generation) {
                    debug!(generation, "Discarding stale listing");
                    return;
                }
                match result {
                    Ok(identifiers) => self.spawn_fetches(generation, identifiers),
                    Err(e) => {
                        warn!(generation, error = %e, "Listing failed");
                        if let Some(pending) = self.pending.take() {
                            let _ = pending.respond_to.send(Err(LoaderError::Listing(e)));
                        }
                    }
                }
            }
            Completion::Fetched {
                generation,
                identifier,
                result,
            } => {
                if !self.is_pending(generation) {
                    debug!(generation, %identifier, "Discarding stale fetch");
                    return;
                }
                let Some(pending) = self.pending.as_mut() else {
                    return;
                };

                let result = match result {
                    Ok(product) => {
                        let stat = ProductStat::from_product(&product);
                        upsert(&mut self.entries, product);
                        debug!(generation, %identifier, "Product loaded");
                        Ok(stat)
                    }
                    Err(e) => {
                        warn!(generation, %identifier, error = %e, "Product fetch failed");
                        Err(e)
                    }
                };
                pending.outcomes.push(LoadOutcome { identifier, result });
                if let Some(remaining) = pending.remaining.as_mut() {
                    *remaining = remaining.saturating_sub(1);
                }
                self.finish_if_settled();
            }
        }
    }

    fn spawn_fetches(&mut self, generation: u64, identifiers: Vec<String>) {
        let mut seen = HashSet::new();
        let mut count = 0;
        for identifier in identifiers {
            if !seen.insert(identifier.clone()) {
                debug!(generation, %identifier, "Skipping repeated identifier");
                continue;
            }
            let inventory = self.inventory.clone();
            self.spawn_task(generation, async move {
                let result = inventory.get_by_id(&identifier).await;
                Completion::Fetched {
                    generation,
                    identifier,
                    result,
                }
            });
            count += 1;
        }

        debug!(generation, count, "Fetches issued");
        if let Some(pending) = self.pending.as_mut() {
            pending.remaining = Some(count);
        }
        self.finish_if_settled();
    }

    fn spawn_task(
        &mut self,
        generation: u64,
        task: impl Future<Output = Completion> + Send + 'static,
    ) {
        let handle = self.in_flight.spawn(task);
        self.task_generations.insert(handle.id(), generation);
    }

    /// A task of the pending generation panicked. A fetch's identifier is
    /// lost, so it is counted as settled without an outcome; a panicked
    /// listing abandons the load. Panics from older generations are ignored.
    fn handle_task_panic(&mut self, e: task::JoinError, generation: Option<u64>) {
        error!(error = %e, ?generation, "Loader task panicked");
        if !generation.is_some_and(|g| self.is_pending(g)) {
            return;
        }
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        match pending.remaining.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                self.finish_if_settled();
            }
            None => {
                // Dropping the responder surfaces as ActorDropped to the caller.
                self.pending = None;
            }
        }
    }

    fn finish_if_settled(&mut self) {
        let settled = matches!(
            self.pending,
            Some(PendingLoad {
                remaining: Some(0),
                ..
            })
        );
        if !settled {
            return;
        }
        if let Some(pending) = self.pending.take() {
            let report = LoadReport {
                generation: pending.generation,
                outcomes: pending.outcomes,
            };
            info!(
                generation = report.generation,
                loaded = report.loaded(),
                failed = report.failed().count(),
                size = self.entries.len(),
                "Load complete"
            );
            let _ = pending.respond_to.send(Ok(report));
        }
    }

    fn is_pending(&self, generation: u64) -> bool {
        matches!(&self.pending, Some(p) if p.generation == generation)
    }

    /// Aborts the pending load's tasks and answers its caller with `reason`.
    fn abandon_pending(&mut self, reason: impl FnOnce(u64) -> LoaderError) {
        if let Some(pending) = self.pending.take() {
            self.in_flight.abort_all();
            let error = reason(pending.generation);
            info!(generation = pending.generation, error = %error, "Load abandoned");
            let _ = pending.respond_to.send(Err(error));
        }
    }
}

/// Replaces the entry for `product.identifier`, or appends one.
fn upsert(entries: &mut Vec<DisplayEntry>, product: Product) {
    match entries
        .iter_mut()
        .find(|e| e.product.identifier == product.identifier)
    {
        Some(entry) => *entry = DisplayEntry::new(product),
        None => entries.push(DisplayEntry::new(product)),
    }
}
