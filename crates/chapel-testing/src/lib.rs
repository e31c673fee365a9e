//! Test utilities for Chapel services.
//!
//! Import from `[dev-dependencies]` only.

pub mod auth;
