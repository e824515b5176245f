/*
 * Responsibility
 * - Read settings from the environment (.env supported)
 * - Validate them up front (fail at startup, not per request)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
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
    pub request_timeout: Duration,

    // Hosts whose browser callers authenticate with the access_token cookie
    pub cookie_domains: Vec<String>,
    // token -> user id, for the in-memory lookup
    pub static_tokens: Vec<(String, String)>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print tokens
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("request_timeout", &self.request_timeout)
            .field("cookie_domains", &self.cookie_domains)
            .field("static_tokens", &self.static_tokens.len())
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let request_timeout = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let cookie_domains =
            parse_cookie_domains(&std::env::var("AUTH_COOKIE_DOMAINS").unwrap_or_default());

        let static_tokens =
            parse_static_tokens(&std::env::var("AUTH_STATIC_TOKENS").unwrap_or_default())?;

        if app_env.is_production() && static_tokens.is_empty() {
            return Err(ConfigError::Missing("AUTH_STATIC_TOKENS"));
        }

        Ok(Self {
            addr,
            app_env,
            request_timeout,
            cookie_domains,
            static_tokens,
        })
    }
}

fn parse_cookie_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// `token=uid,token=uid`
fn parse_static_tokens(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (token, uid) = entry
                .split_once('=')
                .ok_or(ConfigError::Invalid("AUTH_STATIC_TOKENS"))?;
            let (token, uid) = (token.trim(), uid.trim());
            if token.is_empty() || uid.is_empty() {
                return Err(ConfigError::Invalid("AUTH_STATIC_TOKENS"));
            }
            Ok((token.to_string(), uid.to_string()))
        })
        .collect()
}
