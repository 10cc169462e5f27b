//! # InvenHelper Dashboard
//!
//! > **The view-model layer of the InvenHelper inventory dashboard.**
//!
//! This crate lists products from the InvenHelper inventory service, shapes
//! each one into chart-ready data, and lets a user adjust stock counts. It
//! holds no inventory of its own: the remote service is the single source of
//! truth and every displayed quantity is resynchronised from its answers.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One owner per piece of state
//!
//! - The display list belongs to the [`LoaderActor`](loader::LoaderActor), a
//!   single Tokio task that processes requests and fetch completions one at a
//!   time. No lock guards the list.
//! - A [`ProductDetail`](detail::ProductDetail) controller is a plain struct
//!   owned by its view; its operations take `&mut self`.
//!
//! ### The server decides
//!
//! - Amounts are relayed unvalidated; the service accepts or rejects them.
//! - Quantities change only after the service confirms, and always to the
//!   value it returned. There is no optimistic update to roll back.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! - [`Product`](model::Product) as the service returns it.
//! - [`ProductStat`](model::ProductStat), the two-slice doughnut (held vs.
//!   remaining [`CAPACITY`](model::CAPACITY)).
//!
//! ### 2. The Boundary ([`clients`])
//! - [`InventoryApi`](clients::InventoryApi) is the seam everything else
//!   depends on.
//! - [`HttpInventoryClient`](clients::HttpInventoryClient) speaks JSON over
//!   reqwest; [`MockInventory`](clients::mock::MockInventory) serves canned
//!   answers in tests.
//!
//! ### 3. The Loader ([`loader`])
//! - Lists identifiers, fetches every product concurrently, reports a result
//!   per identifier. A newer load supersedes an older one, so the list never
//!   holds duplicates.
//!
//! ### 4. The Detail View ([`detail`])
//! - Increase/decrease with server reconciliation and a self-dismissing
//!   [`TransientAlert`](detail::TransientAlert) on failure.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - [`InventoryConfig`](lifecycle::InventoryConfig),
//!   [`DashboardSystem`](lifecycle::DashboardSystem) and
//!   [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Against the default backend at http://localhost:8080/
//! RUST_LOG=info cargo run -- dashboard
//!
//! # Adjust stock
//! cargo run -- increase <identifier> 10
//! ```

pub mod clients;
pub mod detail;
pub mod lifecycle;
pub mod loader;
pub mod model;
