//! Shared service plumbing: configuration, tracing, middleware, health and error text.

pub mod config;
pub mod health;
pub mod i18n;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
