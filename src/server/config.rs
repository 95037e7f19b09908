//! Environment-driven application configuration.
//!
//! Every knob has a development-friendly default so `cargo run` works with
//! nothing but the environment it finds itself in. Production deployments
//! are expected to set at least `SESSION_SECRET`, `DATABASE_URL`, and the
//! SMTP credentials.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use sha2::{Digest, Sha512};
use url::Url;

use crate::outbound::mail::SmtpSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_LANDING_URL: &str = "https://www.microsoft.com";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5000";
const DEFAULT_OPERATOR_USERNAME: &str = "admin";
const DEFAULT_OPERATOR_PASSWORD: &str = "password123";

/// Errors raised while reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            message: message.into(),
        }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    secret: String,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Derive the cookie signing/encryption key from the configured secret.
    ///
    /// The secret is stretched through SHA-512 first so short development
    /// secrets still satisfy the minimum key-material length.
    pub fn signing_key(&self) -> Key {
        let digest = Sha512::digest(self.secret.as_bytes());
        Key::derive_from(&digest)
    }
}

/// Operator credentials for the static login directory.
#[derive(Debug, Clone)]
pub struct OperatorCredentials {
    pub username: String,
    pub password: String,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Public URL recipients reach the service at; embedded in tracking links.
    pub base_url: Url,
    /// Post-capture redirect target.
    pub landing_url: Url,
    /// When unset the service runs with in-memory stores.
    pub database_url: Option<String>,
    /// When unset the service records outbound mail instead of sending it.
    pub smtp: Option<SmtpSettings>,
    pub session: SessionSettings,
    pub operator: OperatorCredentials,
    pub allowed_origins: Vec<String>,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_same_site(value: &str) -> Result<SameSite, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" => Ok(SameSite::None),
        other => Err(ConfigError::invalid(
            "SESSION_SAME_SITE",
            format!("expected lax, strict, or none, got {other}"),
        )),
    }
}

impl AppConfig {
    /// Resolve the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a set variable fails to parse; absent
    /// variables fall back to defaults instead of erroring.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env_or("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::invalid("BIND_ADDR", err.to_string()))?;
        let base_url = Url::parse(&env_or("BASE_URL", DEFAULT_BASE_URL))
            .map_err(|err| ConfigError::invalid("BASE_URL", err.to_string()))?;
        let landing_url = Url::parse(&env_or("LANDING_URL", DEFAULT_LANDING_URL))
            .map_err(|err| ConfigError::invalid("LANDING_URL", err.to_string()))?;

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let smtp = match (env::var("EMAIL_USER").ok(), env::var("EMAIL_PASS").ok()) {
            (Some(username), Some(password)) if !username.is_empty() => {
                let port = match env::var("SMTP_PORT") {
                    Ok(raw) => raw
                        .parse::<u16>()
                        .map_err(|err| ConfigError::invalid("SMTP_PORT", err.to_string()))?,
                    Err(_) => DEFAULT_SMTP_PORT,
                };
                Some(SmtpSettings {
                    host: env_or("SMTP_HOST", DEFAULT_SMTP_HOST),
                    port,
                    sender: username.clone(),
                    username,
                    password,
                })
            }
            _ => None,
        };

        let secret = match env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "SESSION_SECRET not set, using a development secret; sessions will not \
                     survive deployments"
                );
                "phishing-simulation-dev-secret".to_owned()
            }
        };
        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|value| value != "0")
            .unwrap_or(true);
        let same_site = parse_same_site(&env_or("SESSION_SAME_SITE", "lax"))?;

        let allowed_origins = env_or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            bind_addr,
            base_url,
            landing_url,
            database_url,
            smtp,
            session: SessionSettings {
                secret,
                cookie_secure,
                same_site,
            },
            operator: OperatorCredentials {
                username: env_or("OPERATOR_USERNAME", DEFAULT_OPERATOR_USERNAME),
                password: env_or("OPERATOR_PASSWORD", DEFAULT_OPERATOR_PASSWORD),
            },
            allowed_origins,
        })
    }
}
