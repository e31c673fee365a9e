//! sea-orm entities for the attendance service database.

pub mod accounts;
pub mod attendance;
pub mod members;
pub mod profiles;
