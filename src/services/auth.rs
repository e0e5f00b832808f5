use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;

use crate::domain::auth::AuthenticatedAdmin;
use crate::forms::auth::SignInFormPayload;
use crate::models::config::AdminConfig;

use super::{ServiceError, ServiceResult};

/// Check the submitted credentials against the configured administrator.
pub fn sign_in(payload: SignInFormPayload, admin: &AdminConfig) -> ServiceResult<AuthenticatedAdmin> {
    if !payload.email.eq_ignore_ascii_case(admin.email.trim()) {
        log::warn!("Rejected sign in for `{}`", payload.email);
        return Err(ServiceError::Unauthorized);
    }

    let hash = PasswordHash::new(&admin.password_hash).map_err(|e| {
        log::error!("Configured admin password hash is invalid: {e}");
        ServiceError::Unauthorized
    })?;

    match Argon2::default().verify_password(payload.password.as_bytes(), &hash) {
        Ok(()) => Ok(AuthenticatedAdmin {
            email: payload.email,
        }),
        Err(_) => {
            log::warn!("Wrong password for `{}`", payload.email);
            Err(ServiceError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher, SaltString};

    fn admin(password: &str) -> AdminConfig {
        let salt = SaltString::encode_b64(b"inkpress-testsal").unwrap();
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();
        AdminConfig {
            email: "Admin@Example.com".to_string(),
            password_hash: hash,
        }
    }

    fn payload(email: &str, password: &str) -> SignInFormPayload {
        SignInFormPayload {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_matching_credentials() {
        let admin = admin("hunter2");
        let session = sign_in(payload("admin@example.com", "hunter2"), &admin).unwrap();
        assert_eq!(session.email, "admin@example.com");
    }

    #[test]
    fn rejects_wrong_password_or_email() {
        let admin = admin("hunter2");
        assert_eq!(
            sign_in(payload("admin@example.com", "hunter3"), &admin).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(
            sign_in(payload("other@example.com", "hunter2"), &admin).unwrap_err(),
            ServiceError::Unauthorized
        );
    }

    #[test]
    fn malformed_hash_never_authenticates() {
        let admin = AdminConfig {
            email: "admin@example.com".to_string(),
            password_hash: "plaintext".to_string(),
        };
        assert_eq!(
            sign_in(payload("admin@example.com", "plaintext"), &admin).unwrap_err(),
            ServiceError::Unauthorized
        );
    }
}
