use thiserror::Error;

use crate::domain::types::CategorySlug;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The credentials or session do not belong to the administrator.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Input was rejected before any store was contacted.
    #[error("{0}")]
    Validation(String),
    /// The media host refused or failed the image upload.
    #[error("image upload failed: {0}")]
    Upload(String),
    /// The document store failed; details are logged, not shown.
    #[error("store error")]
    Store,
    /// The category is still referenced by at least one post.
    #[error("category `{0}` is used by existing posts")]
    CategoryInUse(CategorySlug),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
