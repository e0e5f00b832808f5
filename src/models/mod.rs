//! Diesel row types and their conversions into domain entities.

pub mod blog;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
