//! View models handed to templates.

pub mod blogs;
pub mod categories;
