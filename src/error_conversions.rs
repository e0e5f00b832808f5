//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls live here instead of next to the error definitions.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::auth::SignInFormError;
    use crate::forms::blogs::BlogFormError;
    use crate::forms::categories::{AddCategoryFormError, DeleteCategoryFormError};
    use crate::media::UploadError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<UploadError> for ServiceError {
        fn from(val: UploadError) -> Self {
            ServiceError::Upload(val.to_string())
        }
    }

    impl From<BlogFormError> for ServiceError {
        fn from(val: BlogFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<AddCategoryFormError> for ServiceError {
        fn from(val: AddCategoryFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<DeleteCategoryFormError> for ServiceError {
        fn from(val: DeleteCategoryFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<SignInFormError> for ServiceError {
        fn from(val: SignInFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }
}
