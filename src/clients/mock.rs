//! # Mock Inventory
//!
//! Utilities for testing the loader and the detail controller without an
//! HTTP server.
//!
//! [`MockInventory`] implements [`InventoryApi`] from queued expectations.
//! Product fetches are keyed by identifier because the loader issues them
//! concurrently and they may be served in any order; the other operations
//! are served first-in first-out.
//!
//! ```ignore
//! let mock = MockInventory::new();
//! mock.expect_list().return_ok(vec!["a".into(), "b".into()]);
//! mock.expect_get("a").return_ok(Product::new("a", "Widget", "", 200));
//! mock.expect_get("b").with_delay(Duration::from_millis(50)).return_err(err);
//!
//! let inventory: Arc<dyn InventoryApi> = Arc::new(mock.clone());
//! // Use inventory in tests...
//! mock.verify(); // Ensures all expectations were met
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clients::{InventoryApi, InventoryError};
use crate::model::{Product, ProductCreate, ProductUpdate, QuantityUpdate};

/// A canned response, optionally held back for a while before it is returned.
struct Reply<T> {
    delay: Option<Duration>,
    response: Result<T, InventoryError>,
}

/// Requests observed by the mock, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(String),
    Increase(String, i32),
    Decrease(String, i32),
    Create(ProductCreate),
    Update(ProductUpdate),
}

#[derive(Default)]
struct State {
    list: VecDeque<Reply<Vec<String>>>,
    get: HashMap<String, VecDeque<Reply<Product>>>,
    increase: VecDeque<Reply<QuantityUpdate>>,
    decrease: VecDeque<Reply<QuantityUpdate>>,
    create: VecDeque<Reply<Product>>,
    update: VecDeque<Reply<Product>>,
    calls: Vec<Call>,
}

impl State {
    fn remaining(&self) -> usize {
        self.list.len()
            + self.get.values().map(VecDeque::len).sum::<usize>()
            + self.increase.len()
            + self.decrease.len()
            + self.create.len()
            + self.update.len()
    }
}

/// Expectation-driven [`InventoryApi`] double. Clones share expectations.
#[derive(Clone, Default)]
pub struct MockInventory {
    state: Arc<Mutex<State>>,
}

impl MockInventory {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list_identifiers` call.
    pub fn expect_list(&self) -> ExpectationBuilder<Vec<String>> {
        self.builder(|state, reply| state.list.push_back(reply))
    }

    /// Expects a `get_by_id` call for `identifier`.
    pub fn expect_get(&self, identifier: impl Into<String>) -> ExpectationBuilder<Product> {
        let identifier = identifier.into();
        self.builder(move |state, reply| {
            state.get.entry(identifier).or_default().push_back(reply)
        })
    }

    /// Expects an `increase_quantity` call.
    pub fn expect_increase(&self) -> ExpectationBuilder<QuantityUpdate> {
        self.builder(|state, reply| state.increase.push_back(reply))
    }

    /// Expects a `decrease_quantity` call.
    pub fn expect_decrease(&self) -> ExpectationBuilder<QuantityUpdate> {
        self.builder(|state, reply| state.decrease.push_back(reply))
    }

    /// Expects a `create_product` call.
    pub fn expect_create(&self) -> ExpectationBuilder<Product> {
        self.builder(|state, reply| state.create.push_back(reply))
    }

    /// Expects an `update_product` call.
    pub fn expect_update(&self) -> ExpectationBuilder<Product> {
        self.builder(|state, reply| state.update.push_back(reply))
    }

    fn builder<T>(
        &self,
        push: impl FnOnce(&mut State, Reply<T>) + Send + 'static,
    ) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            state: self.state.clone(),
            delay: None,
            push: Box::new(push),
        }
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.state.lock().unwrap().remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    /// Records `call` and pops the matching reply.
    fn next<T>(
        &self,
        call: Call,
        pick: impl FnOnce(&mut State) -> Option<Reply<T>>,
    ) -> Reply<T> {
        let mut state = self.state.lock().unwrap();
        let description = format!("{:?}", call);
        state.calls.push(call);
        match pick(&mut state) {
            Some(reply) => reply,
            None => panic!("Unexpected request: {}", description),
        }
    }
}

async fn deliver<T>(reply: Reply<T>) -> Result<T, InventoryError> {
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    reply.response
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T> {
    state: Arc<Mutex<State>>,
    delay: Option<Duration>,
    push: Box<dyn FnOnce(&mut State, Reply<T>) + Send>,
}

impl<T> ExpectationBuilder<T> {
    /// Holds the response back for `delay` once the request arrives.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.finish(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: InventoryError) {
        self.finish(Err(error));
    }

    fn finish(self, response: Result<T, InventoryError>) {
        let reply = Reply {
            delay: self.delay,
            response,
        };
        let mut state = self.state.lock().unwrap();
        (self.push)(&mut state, reply);
    }
}

#[async_trait]
impl InventoryApi for MockInventory {
    async fn list_identifiers(&self) -> Result<Vec<String>, InventoryError> {
        deliver(self.next(Call::List, |s| s.list.pop_front())).await
    }

    async fn get_by_id(&self, identifier: &str) -> Result<Product, InventoryError> {
        let reply = self.next(Call::Get(identifier.to_string()), |s| {
            s.get.get_mut(identifier).and_then(VecDeque::pop_front)
        });
        deliver(reply).await
    }

    async fn increase_quantity(
        &self,
        identifier: &str,
        amount: i32,
    ) -> Result<QuantityUpdate, InventoryError> {
        let reply = self.next(Call::Increase(identifier.to_string(), amount), |s| {
            s.increase.pop_front()
        });
        deliver(reply).await
    }

    async fn decrease_quantity(
        &self,
        identifier: &str,
        amount: i32,
    ) -> Result<QuantityUpdate, InventoryError> {
        let reply = self.next(Call::Decrease(identifier.to_string(), amount), |s| {
            s.decrease.pop_front()
        });
        deliver(reply).await
    }

    async fn create_product(&self, params: ProductCreate) -> Result<Product, InventoryError> {
        deliver(self.next(Call::Create(params), |s| s.create.pop_front())).await
    }

    async fn update_product(&self, params: ProductUpdate) -> Result<Product, InventoryError> {
        deliver(self.next(Call::Update(params), |s| s.update.pop_front())).await
    }
}
