//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! The format is compact and hides the module prefix (`with_target(false)`);
//! structured fields such as `generation` and `identifier` carry the context
//! instead.
//!
//! ## What Gets Traced
//!
//! - **Loader lifecycle**: startup, each load generation, shutdown
//! - **Requests**: one span per inventory call with its identifier
//! - **Failures**: rejected mutations and failed product fetches, with the
//!   server's explanation
//!
//! ## Usage Examples
//!
//! ```bash
//! # Load summaries and failures
//! RUST_LOG=info invenhelper-dash dashboard
//!
//! # Every request URL and discarded stale result
//! RUST_LOG=debug invenhelper-dash dashboard
//!
//! # Only the loader
//! RUST_LOG=invenhelper_dash::loader=debug invenhelper-dash dashboard
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Loader started
//! INFO load: Load started generation=1
//! WARN Product fetch failed generation=1 identifier="b" error=Request rejected (HTTP 400): Product not found
//! INFO Load complete generation=1 loaded=1 failed=1 size=1
//! ```

/// Initializes the tracing/logging infrastructure for the application.
///
/// Set `RUST_LOG` to control verbosity (`info`, `debug`, `trace`, or a
/// per-module filter).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - fields carry the context
        .compact()
        .init();
}
