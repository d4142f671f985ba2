//! Application Configuration
//!
//! Configuration for the Auth application layer, built once at startup and
//! shared behind an `Arc`.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::random_secret;
use platform::jwt::JwtCodec;
use platform::password::{DEFAULT_ROUNDS, Pbkdf2Params};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Token cookie name
    pub jwt_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    pub session_ttl: Duration,
    /// HS256 signing secret for the token cookie
    pub jwt_secret: Vec<u8>,
    pub jwt_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    pub pbkdf2_rounds: u32,
    /// Upper bound on key derivations running at once
    pub max_concurrent_hashes: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            jwt_cookie_name: "jwt".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(24 * 3600),
            jwt_secret: Vec::new(),
            jwt_ttl: Duration::from_secs(3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            pbkdf2_rounds: DEFAULT_ROUNDS,
            max_concurrent_hashes: 8,
        }
    }
}

impl AuthConfig {
    /// Create config with random secrets (for development)
    pub fn with_random_secrets() -> Self {
        Self {
            session_secret: random_secret(),
            jwt_secret: random_secret().to_vec(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    pub fn pbkdf2_params(&self) -> Pbkdf2Params {
        Pbkdf2Params {
            rounds: self.pbkdf2_rounds,
        }
    }

    pub fn jwt_codec(&self) -> JwtCodec {
        JwtCodec::new(&self.jwt_secret)
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::hours(24))
    }

    pub fn session_cookie(&self) -> CookieConfig {
        self.cookie(&self.session_cookie_name)
    }

    pub fn jwt_cookie(&self) -> CookieConfig {
        self.cookie(&self.jwt_cookie_name)
    }

    fn cookie(&self, name: &str) -> CookieConfig {
        CookieConfig {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            ..CookieConfig::named(name)
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("jwt_cookie_name", &self.jwt_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_ttl", &self.jwt_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("pbkdf2_rounds", &self.pbkdf2_rounds)
            .field("max_concurrent_hashes", &self.max_concurrent_hashes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.jwt_cookie_name, "jwt");
        assert_eq!(config.jwt_ttl, Duration::from_secs(3600));
        assert_eq!(config.pbkdf2_rounds, 310_000);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secrets();
        let b = AuthConfig::with_random_secrets();
        assert_ne!(a.session_secret, b.session_secret);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }

    #[test]
    fn test_development_cookies_not_secure() {
        let config = AuthConfig::development();
        assert!(!config.jwt_cookie().secure);
        assert_eq!(config.session_cookie().name, "session");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            jwt_secret: b"very-secret-jwt-key".to_vec(),
            ..AuthConfig::default()
        };
        assert!(!format!("{config:?}").contains("very-secret"));
    }
}
