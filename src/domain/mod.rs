//! Domain entities and value objects shared by the persistence and service
//! layers.

pub mod auth;
pub mod blog;
pub mod category;
pub mod types;
