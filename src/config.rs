/*
 * Responsibility
 * - Load settings from the environment (.env supported)
 * - Validate them (missing / invalid → startup failure)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::middleware::auth::access::BEARER_SCHEME;
use crate::token::TokenMakerKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Shared secret for the token maker (checked for length when the maker is built)
    pub token_symmetric_key: String,
    pub token_maker: TokenMakerKind,
    pub access_token_duration: chrono::Duration,
    pub auth_scheme: String,

    pub http_timeout: Duration,
    pub http_body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the token secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("token_maker", &self.token_maker)
            .field("access_token_duration", &self.access_token_duration)
            .field("auth_scheme", &self.auth_scheme)
            .field("http_timeout", &self.http_timeout)
            .field("http_body_limit_bytes", &self.http_body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test fixtures).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match get("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV"));

        let token_symmetric_key =
            get("TOKEN_SYMMETRIC_KEY").ok_or(ConfigError::Missing("TOKEN_SYMMETRIC_KEY"))?;

        let token_maker = match get("TOKEN_MAKER") {
            Some(s) => s
                .parse::<TokenMakerKind>()
                .map_err(|_| ConfigError::Invalid("TOKEN_MAKER"))?,
            None => TokenMakerKind::Symmetric,
        };

        let access_token_duration = match get("ACCESS_TOKEN_DURATION_SECONDS") {
            Some(s) => s
                .parse::<i64>()
                .ok()
                .filter(|v| *v > 0)
                .and_then(chrono::Duration::try_seconds)
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_DURATION_SECONDS"))?,
            None => chrono::Duration::minutes(15),
        };

        let auth_scheme = get("AUTH_SCHEME")
            .map(|s| s.trim().to_ascii_lowercase())
            .unwrap_or_else(|| BEARER_SCHEME.to_string());
        if auth_scheme.is_empty() || auth_scheme.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid("AUTH_SCHEME"));
        }

        let http_timeout_seconds: u64 = get("HTTP_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let http_body_limit_bytes: usize = get("HTTP_BODY_LIMIT_BYTES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            token_symmetric_key,
            token_maker,
            access_token_duration,
            auth_scheme,
            http_timeout: Duration::from_secs(http_timeout_seconds),
            http_body_limit_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCD";

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("TOKEN_SYMMETRIC_KEY", SECRET)]).unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.token_maker, TokenMakerKind::Symmetric);
        assert_eq!(config.access_token_duration, chrono::Duration::minutes(15));
        assert_eq!(config.auth_scheme, "bearer");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(
            load(&[]).unwrap_err(),
            ConfigError::Missing("TOKEN_SYMMETRIC_KEY")
        );
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("TOKEN_SYMMETRIC_KEY", SECRET),
            ("PORT", "9000"),
            ("APP_ENV", "PROD"),
            ("TOKEN_MAKER", "jwt"),
            ("ACCESS_TOKEN_DURATION_SECONDS", "60"),
            ("AUTH_SCHEME", "Bearer"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 9000);
        assert!(config.app_env.is_production());
        assert_eq!(config.token_maker, TokenMakerKind::Signature);
        assert_eq!(config.access_token_duration, chrono::Duration::seconds(60));
        assert_eq!(config.auth_scheme, "bearer");
    }

    #[test]
    fn invalid_values() {
        let bad = |key: &'static str, value: &str| {
            load(&[("TOKEN_SYMMETRIC_KEY", SECRET), (key, value)]).unwrap_err()
        };

        assert_eq!(bad("PORT", "http"), ConfigError::Invalid("PORT"));
        assert_eq!(bad("TOKEN_MAKER", "rsa"), ConfigError::Invalid("TOKEN_MAKER"));
        assert_eq!(
            bad("ACCESS_TOKEN_DURATION_SECONDS", "0"),
            ConfigError::Invalid("ACCESS_TOKEN_DURATION_SECONDS")
        );
        assert_eq!(bad("AUTH_SCHEME", "two words"), ConfigError::Invalid("AUTH_SCHEME"));
    }

    #[test]
    fn duration_beyond_range_is_invalid() {
        for value in ["9223372036854775807", "99999999999999999999"] {
            assert_eq!(
                load(&[
                    ("TOKEN_SYMMETRIC_KEY", SECRET),
                    ("ACCESS_TOKEN_DURATION_SECONDS", value),
                ])
                .unwrap_err(),
                ConfigError::Invalid("ACCESS_TOKEN_DURATION_SECONDS")
            );
        }
    }

    #[test]
    fn debug_hides_secret() {
        let config = load(&[("TOKEN_SYMMETRIC_KEY", SECRET)]).unwrap();
        assert!(!format!("{config:?}").contains(SECRET));
    }
}
