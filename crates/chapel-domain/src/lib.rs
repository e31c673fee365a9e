//! Domain types shared across all Chapel crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod calendar;
pub mod department;
pub mod role;
pub mod service;
pub mod username;
