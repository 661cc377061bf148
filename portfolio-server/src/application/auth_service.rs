use tracing::{instrument, warn};

use crate::domain::admin::{AdminCredentials, AdminIdentity};
use crate::domain::error::DomainError;
use crate::infrastructure::security::{JwtKeys, verify_password};

/// The auth gate: a single fixed administrator, bearer tokens signed with
/// [`JwtKeys`].
#[derive(Clone)]
pub struct AuthService {
    admin: AdminCredentials,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(admin: AdminCredentials, keys: JwtKeys) -> Self {
        Self { admin, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        if email.trim().to_lowercase() != self.admin.email {
            warn!("login attempt for unknown account");
            return Err(DomainError::Unauthorized);
        }

        let valid = verify_password(password, &self.admin.password_hash)
            .map_err(|_| DomainError::Unauthorized)?;
        if !valid {
            warn!("login attempt with wrong password");
            return Err(DomainError::Unauthorized);
        }

        self.keys
            .generate_token(&self.admin.email)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }

    /// Checks a bearer token and yields the admin identity on success.
    pub fn authorize(&self, token: &str) -> Result<AdminIdentity, DomainError> {
        let claims = self
            .keys
            .verify_token(token)
            .map_err(|_| DomainError::Unauthorized)?;
        if claims.sub != self.admin.email {
            return Err(DomainError::Unauthorized);
        }
        Ok(AdminIdentity::new(claims.sub))
    }
}
