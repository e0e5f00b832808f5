use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Deserialize, Validate)]
pub struct SignInForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInFormPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum SignInFormError {
    #[error("Please enter a valid email and password.")]
    Validation(String),
}

impl From<ValidationErrors> for SignInFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<SignInForm> for SignInFormPayload {
    type Error = SignInFormError;

    fn try_from(value: SignInForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: value.email.trim().to_lowercase(),
            password: value.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_email() {
        let form = SignInForm {
            email: "Admin@Example.com".to_string(),
            password: "secret".to_string(),
        };

        let payload: SignInFormPayload = form.try_into().unwrap();
        assert_eq!(payload.email, "admin@example.com");
    }

    #[test]
    fn rejects_invalid_email() {
        let form = SignInForm {
            email: "admin".to_string(),
            password: "secret".to_string(),
        };

        let payload: Result<SignInFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }
}
