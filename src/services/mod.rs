pub mod auth;
pub mod blogs;
pub mod categories;
pub mod errors;
pub mod resolver;

pub use errors::{ServiceError, ServiceResult};
