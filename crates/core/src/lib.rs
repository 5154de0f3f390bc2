//! Karat Core - Shared types library.
//!
//! This crate provides common types used across all Karat components:
//! - `ledger` - Rewards ledger and aggregation engine
//! - the external HTTP/admin front ends that call into the ledger
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no store access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, correlation IDs, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
