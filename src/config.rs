use crate::error::config::ConfigError;

/// Immutable application settings, loaded once at startup.
///
/// Required variables abort startup when missing; there are no fallback
/// values for secrets.
pub struct Config {
    pub database_url: String,
    /// HMAC secret for signing bearer tokens.
    pub secret_key: String,
    /// Bearer token lifetime in days.
    pub token_ttl_days: i64,
    pub email_host: String,
    pub email_port: u16,
    pub email_user: String,
    pub email_password: String,
    pub email_from: String,
    /// HTTP listen port.
    pub port: u16,
    /// Directory holding the built front-end bundle, served as a fallback
    /// for unmatched routes when set.
    pub static_dir: Option<String>,
}

const DEFAULT_TOKEN_TTL_DAYS: i64 = 365;
const DEFAULT_PORT: u16 = 5000;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            secret_key: require("SECRET_KEY")?,
            token_ttl_days: parse_or("TOKEN_TTL_DAYS", DEFAULT_TOKEN_TTL_DAYS)?,
            email_host: require("EMAIL_HOST")?,
            email_port: parse_or("EMAIL_PORT", 465)?,
            email_user: require("EMAIL_USER")?,
            email_password: require("EMAIL_PASSWORD")?,
            email_from: require("EMAIL_FROM")?,
            port: parse_or("PORT", DEFAULT_PORT)?,
            static_dir: std::env::var("STATIC_DIR").ok(),
        })
    }
}

fn require(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn parse_or<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("failed to parse {:?}", value),
        }),
        Err(_) => Ok(default),
    }
}
