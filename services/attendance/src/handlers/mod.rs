pub mod admin;
pub mod attendance;
pub mod auth;
pub mod extract;
pub mod health;
pub mod member;
pub mod profile;
pub mod stats;
