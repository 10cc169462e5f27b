//! Boundary to the remote inventory service.

pub mod error;
pub mod inventory_client;
pub mod mock;

pub use error::*;
pub use inventory_client::*;
