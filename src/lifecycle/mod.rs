//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for managing the dashboard's
//! runtime environment:
//!
//! - **Backend configuration**: Where the inventory service lives
//! - **System orchestration**: Building the client, starting the loader
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`InventoryConfig`] - Host and endpoint paths, loaded from TOML
//! - [`DashboardSystem`] - Owns the inventory client and the loader actor
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod dashboard_system;
pub mod tracing;

pub use config::*;
pub use dashboard_system::*;
pub use tracing::*;
