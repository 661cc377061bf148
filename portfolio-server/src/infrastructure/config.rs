use std::str::FromStr;

use crate::infrastructure::security::hash_password;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow::anyhow!(
                "invalid STORAGE: {} (expected postgres or memory)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests do not have to touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = lookup("PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let storage = lookup("STORAGE")
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or(StorageBackend::Postgres);
        let database_url = lookup("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL must be set");
        }
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set"))?;
        let jwt_ttl_hours = lookup("JWT_TTL_HOURS")
            .unwrap_or_else(|| "24".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid JWT_TTL_HOURS: {}", e))?;
        let admin_email = lookup("ADMIN_EMAIL")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("ADMIN_EMAIL must be set"))?;
        let admin_password_hash = match (lookup("ADMIN_PASSWORD_HASH"), lookup("ADMIN_PASSWORD")) {
            (Some(hash), _) if !hash.is_empty() => hash,
            (_, Some(password)) if !password.is_empty() => hash_password(&password)
                .map_err(|e| anyhow::anyhow!("failed to hash ADMIN_PASSWORD: {}", e))?,
            _ => anyhow::bail!("ADMIN_PASSWORD_HASH or ADMIN_PASSWORD must be set"),
        };
        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            storage,
            database_url,
            jwt_secret,
            jwt_ttl_hours,
            admin_email,
            admin_password_hash,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn memory_storage_needs_no_database() {
        let config = load(&[
            ("STORAGE", "memory"),
            ("JWT_SECRET", "s"),
            ("ADMIN_EMAIL", "admin@example.com"),
            ("ADMIN_PASSWORD_HASH", "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
            ("CORS_ORIGINS", "http://localhost:3000, https://me.dev,"),
        ])
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 5000);
        assert_eq!(config.jwt_ttl_hours, 24);
        assert_eq!(config.cors_origins, ["http://localhost:3000", "https://me.dev"]);
    }

    #[test]
    fn plain_password_is_hashed() {
        let config = load(&[
            ("STORAGE", "memory"),
            ("JWT_SECRET", "s"),
            ("ADMIN_EMAIL", "admin@example.com"),
            ("ADMIN_PASSWORD", "changeme"),
        ])
        .unwrap();
        assert!(config.admin_password_hash.starts_with("$argon2"));
    }

    #[test]
    fn missing_required_values_are_named() {
        let err = load(&[("JWT_SECRET", "s")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = load(&[("STORAGE", "memory"), ("JWT_SECRET", "s")]).unwrap_err();
        assert!(err.to_string().contains("ADMIN_EMAIL"));

        let err = load(&[("STORAGE", "sqlite")]).unwrap_err();
        assert!(err.to_string().contains("STORAGE"));
    }
}
