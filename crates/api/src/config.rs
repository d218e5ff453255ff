use manabi_core::types::DbId;

use crate::auth::jwt::JwtConfig;

/// Owner id used by mock authentication when `MOCK_OWNER_ID` is not set.
const DEFAULT_MOCK_OWNER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Identity-resolution strategy, fixed for the life of the process.
    pub auth: AuthConfig,
}

/// Identity-resolution strategy selected at startup.
///
/// Handlers never know which strategy is active; they only receive the
/// resolved owner id (or a 401 when resolution fails).
#[derive(Debug, Clone)]
pub enum AuthConfig {
    /// Development only: every request resolves to a fixed owner id.
    Mock { owner_id: DbId },
    /// HS256 Bearer tokens carrying the owner id in `sub`.
    Jwt(JwtConfig),
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `AUTH_MODE`            | `mock` (`jwt` in prod)     |
    /// | `MOCK_OWNER_ID`        | fixed development UUID     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            auth: AuthConfig::from_env(),
        }
    }
}

impl AuthConfig {
    /// Select the identity-resolution strategy from `AUTH_MODE`.
    ///
    /// `jwt` requires `JWT_SECRET`; anything else falls back to mock
    /// authentication, which must never be enabled in production.
    pub fn from_env() -> Self {
        match std::env::var("AUTH_MODE").as_deref() {
            Ok("jwt") => AuthConfig::Jwt(JwtConfig::from_env()),
            _ => {
                let owner_id = std::env::var("MOCK_OWNER_ID")
                    .unwrap_or_else(|_| DEFAULT_MOCK_OWNER_ID.into())
                    .parse()
                    .expect("MOCK_OWNER_ID must be a valid UUID");
                AuthConfig::Mock { owner_id }
            }
        }
    }
}
