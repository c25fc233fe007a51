//! Process configuration, read from the environment at startup.

use anyhow::Result;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub operator: OperatorConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry_hours: i64,
}

/// The single recognized operator account. Either a precomputed Argon2 hash
/// is supplied, or a plaintext password that gets hashed once at startup.
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    pub username: String,
    pub password_hash: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the Fakturownia API, e.g. `https://acme.fakturownia.pl/api/v2`.
    pub base_url: String,
    /// Absent keys are only reported when an accept call actually needs one.
    pub api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default development secret - DO NOT USE IN PRODUCTION");
            "dev-secret-key-change-in-production-minimum-32-chars".to_string()
        });

        Ok(Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },
            auth: AuthConfig {
                jwt_secret,
                token_expiry_hours: 24,
            },
            operator: OperatorConfig {
                username: std::env::var("OPERATOR_USERNAME")
                    .unwrap_or_else(|_| "admin".to_string()),
                password_hash: std::env::var("OPERATOR_PASSWORD_HASH").ok(),
                password: std::env::var("OPERATOR_PASSWORD").ok(),
            },
            provider: ProviderConfig {
                base_url: std::env::var("FAKTUROWNIA_API_URL")
                    .unwrap_or_else(|_| "https://your-subdomain.fakturownia.pl/api/v2".to_string()),
                api_key: std::env::var("FAKTUROWNIA_API_KEY").ok(),
            },
        })
    }
}
