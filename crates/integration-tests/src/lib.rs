//! Integration tests for Karat.
//!
//! All tests run in-process against the in-memory store adapter - no
//! external services required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p karat-integration-tests
//!
//! # with ledger logging
//! RUST_LOG=karat_ledger=debug cargo test -p karat-integration-tests -- --nocapture
//! ```
//!
//! # Test Categories
//!
//! - `rewards_flow` - end-to-end journeys over the public API
//! - `claim_race` - concurrent attribution behavior
//! - `aggregation_props` - property tests for the balance invariants

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a tracing subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
