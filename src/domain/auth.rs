use serde::{Deserialize, Serialize};

/// The administrator bound to the current session.
///
/// Only one administrator exists; the email is the session identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub email: String,
}
