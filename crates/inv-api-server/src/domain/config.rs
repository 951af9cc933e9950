//! Server configuration with validation.
//!
//! Defaults are overridden by environment variables, then by CLI flags.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::auth::AdminPassword;

/// Password used when no admin credential is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Main server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP listener configuration
    pub http: HttpConfig,
    /// Admin credential for bulk operations
    pub admin: AdminConfig,
    /// Rows inserted into an empty store at startup
    pub seed: SeedConfig,
}

impl ServerConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `INV_HTTP_HOST` | `http.host` |
    /// | `INV_HTTP_PORT` | `http.port` |
    /// | `INV_ADMIN_PASSWORD` | `admin.password_sha256` (hashed here) |
    /// | `INV_ADMIN_PASSWORD_SHA256` | `admin.password_sha256` |
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("INV_HTTP_HOST") {
            self.http.host = host
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("INV_HTTP_HOST: {}", host)))?;
        }
        if let Some(port) = lookup("INV_HTTP_PORT") {
            self.http.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("INV_HTTP_PORT: {}", port)))?;
        }
        if let Some(password) = lookup("INV_ADMIN_PASSWORD") {
            self.admin.password_sha256 = AdminPassword::digest_hex(&password);
        }
        // An explicit digest wins over a plaintext password.
        if let Some(digest) = lookup("INV_ADMIN_PASSWORD_SHA256") {
            self.admin.password_sha256 = digest.trim().to_lowercase();
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("http.port cannot be 0".into()));
        }

        AdminPassword::from_hex(&self.admin.password_sha256)?;

        if self.seed.zones.iter().any(|z| z.trim().is_empty()) {
            return Err(ConfigError::InvalidSeed("zone names cannot be empty".into()));
        }
        if self.seed.statuses.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::InvalidSeed("status names cannot be empty".into()));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 5000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
        }
    }
}

/// Admin credential configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Hex-encoded SHA-256 digest of the admin password
    pub password_sha256: String,
}

impl AdminConfig {
    /// True while the credential is still the built-in default.
    pub fn uses_default_password(&self) -> bool {
        self.password_sha256
            .trim()
            .eq_ignore_ascii_case(&AdminPassword::digest_hex(DEFAULT_ADMIN_PASSWORD))
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password_sha256: AdminPassword::digest_hex(DEFAULT_ADMIN_PASSWORD),
        }
    }
}

/// Seed data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Insert the rows below on startup
    pub enabled: bool,
    pub zones: Vec<String>,
    pub categories: Vec<String>,
    pub statuses: Vec<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            zones: vec![
                "Zona Soldadura".into(),
                "Zona Impresion".into(),
                "Zona Mecanizado".into(),
                "Zona del laser".into(),
            ],
            categories: Vec::new(),
            statuses: shared_types::SEED_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Admin digest is not 64 hex characters
    #[error("invalid admin password digest: {0}")]
    InvalidDigest(String),
    /// Seed rows that the store would reject
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
