pub mod access;
pub mod admin;
pub mod attendance;
pub mod credentials;
pub mod login;
pub mod member;
pub mod profile;
pub mod signup;
pub mod stats;
