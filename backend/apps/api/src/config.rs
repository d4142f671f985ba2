//! Server Configuration
//!
//! Everything is read from the environment once at startup. Debug builds
//! fill in random secrets where release builds refuse to start.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use catalog::CatalogConfig;
use checkout::PaymentConfig;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    /// Built frontend, served for every unmatched path
    pub static_dir: PathBuf,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub payment: PaymentConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `lookup` returns a variable's value; `development` relaxes secrets
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database_max_connections = parse_or(var("DATABASE_MAX_CONNECTIONS"), 5)
            .context("DATABASE_MAX_CONNECTIONS must be a number")?;
        let port = parse_or(var("PORT"), 8080).context("PORT must be a port number")?;
        let cookie_secure = parse_or(var("COOKIE_SECURE"), !development)
            .context("COOKIE_SECURE must be true or false")?;

        let mut auth = if development {
            AuthConfig::with_random_secrets()
        } else {
            AuthConfig::default()
        };
        auth.cookie_secure = cookie_secure;

        match var("JWT_SECRET") {
            Some(secret) => auth.jwt_secret = secret.into_bytes(),
            None if development => {
                tracing::warn!("JWT_SECRET not set, using a random secret");
            }
            None => bail!("JWT_SECRET must be set in production"),
        }

        match var("SESSION_SECRET") {
            Some(encoded) => auth.session_secret = decode_secret(&encoded)?,
            None if development => {
                tracing::warn!("SESSION_SECRET not set, using a random secret");
            }
            None => bail!("SESSION_SECRET must be set in production"),
        }

        let mut payment = PaymentConfig::default();
        match (var("STRIPE_SECRET_KEY"), var("STRIPE_WEBHOOK_SECRET")) {
            (Some(key), Some(webhook)) => {
                payment.secret_key = key;
                payment.webhook_secret = webhook;
            }
            _ if development => {
                tracing::warn!("Stripe keys not set, payments will fail");
            }
            _ => bail!("STRIPE_SECRET_KEY and STRIPE_WEBHOOK_SECRET must be set in production"),
        }
        if let Some(currency) = var("PAYMENT_CURRENCY") {
            payment.currency = currency.trim().to_ascii_lowercase();
        }
        if let Some(secs) = var("STRIPE_TIMEOUT_SECS") {
            payment.request_timeout = Duration::from_secs(
                secs.parse().context("STRIPE_TIMEOUT_SECS must be a number")?,
            );
        }

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            database_max_connections,
            port,
            frontend_origins,
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("build")),
            auth,
            catalog: CatalogConfig::default(),
            payment,
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => Ok(v.trim().parse()?),
        None => Ok(default),
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .context("SESSION_SECRET must be base64")?;
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_development_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")]), true).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.static_dir, PathBuf::from("build"));
        assert!(!config.auth.cookie_secure);
        assert!(!config.auth.jwt_secret.is_empty());
        assert_eq!(config.payment.currency, "inr");
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_production_requires_secrets() {
        let err = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")]), false)
            .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_production_config() {
        let secret = general_purpose::STANDARD.encode([7u8; 32]);
        let config = ServerConfig::from_lookup(
            lookup(&[
                ("DATABASE_URL", "postgres://db"),
                ("PORT", "9000"),
                ("JWT_SECRET", "jwt-secret"),
                ("SESSION_SECRET", secret.as_str()),
                ("STRIPE_SECRET_KEY", "sk_live_x"),
                ("STRIPE_WEBHOOK_SECRET", "whsec_x"),
                ("PAYMENT_CURRENCY", "USD"),
                ("FRONTEND_ORIGINS", "https://shop.example.com, "),
            ]),
            false,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert!(config.auth.cookie_secure);
        assert_eq!(config.auth.session_secret, [7u8; 32]);
        assert_eq!(config.auth.jwt_secret, b"jwt-secret");
        assert_eq!(config.payment.currency, "usd");
        assert_eq!(config.frontend_origins, vec!["https://shop.example.com"]);
    }

    #[test]
    fn test_bad_session_secret() {
        let err = ServerConfig::from_lookup(
            lookup(&[
                ("DATABASE_URL", "postgres://db"),
                ("SESSION_SECRET", "c2hvcnQ="),
            ]),
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }
}
