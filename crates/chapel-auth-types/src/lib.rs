//! Session types shared across Chapel services.
//!
//! Provides session-token issue/validation, cookie builders, and the `Session` extractor.

pub mod cookie;
pub mod session;
pub mod token;
