//! Core types for Karat.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod status;

pub use email::{Email, EmailError};
pub use id::CustomId;
pub use status::RedemptionStatus;
