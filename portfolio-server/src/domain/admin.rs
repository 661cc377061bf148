/// Login credentials of the single site administrator.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password_hash: String,
}

impl AdminCredentials {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password_hash,
        }
    }
}

/// Proof that a request passed the auth gate. Only the auth service and this
/// crate's tests can mint one, so every write operation that takes an
/// `&AdminIdentity` is unreachable without a valid credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    email: String,
}

impl AdminIdentity {
    pub(crate) fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
