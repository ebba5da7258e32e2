//! Server configuration parsed from environment variables.
//!
//! The auth provider and the research backend are optional: when their
//! variables are missing the server still starts and the routes that need
//! them answer 503.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{present} is set but {missing} is missing")]
    Incomplete { present: &'static str, missing: &'static str },
}

/// GoTrue-compatible auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Base URL without trailing slash, e.g. `https://xyz.supabase.co`.
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Research backend (chat, upload, generation, papers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL without trailing slash.
    pub url: String,
    pub timeouts: BackendTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Origin the browser sees; sign-up confirmation links point here.
    pub public_origin: String,
    pub cookie_secure: bool,
    pub auth: Option<AuthConfig>,
    pub backend: Option<BackendConfig>,
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from a variable lookup.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PUBLIC_ORIGIN`: default `http://localhost:3000`
    /// - `COOKIE_SECURE`: default true iff `PUBLIC_ORIGIN` is https
    /// - `AUTH_URL` + `AUTH_ANON_KEY`: auth routes disabled when both absent
    /// - `BACKEND_URL`: research routes disabled when absent
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 300
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparsable port, a non-http URL, or
    /// only one of the two auth variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let public_origin = match var("PUBLIC_ORIGIN") {
            Some(raw) => normalize_url("PUBLIC_ORIGIN", &raw)?,
            None => DEFAULT_PUBLIC_ORIGIN.to_owned(),
        };
        let cookie_secure = var("COOKIE_SECURE")
            .and_then(|raw| parse_bool(&raw))
            .unwrap_or_else(|| public_origin.starts_with("https://"));

        let auth = match (var("AUTH_URL"), var("AUTH_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(AuthConfig { url: normalize_url("AUTH_URL", &url)?, anon_key }),
            (Some(_), None) => {
                return Err(ConfigError::Incomplete { present: "AUTH_URL", missing: "AUTH_ANON_KEY" });
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete { present: "AUTH_ANON_KEY", missing: "AUTH_URL" });
            }
            (None, None) => None,
        };

        let backend = match var("BACKEND_URL") {
            Some(url) => Some(BackendConfig {
                url: normalize_url("BACKEND_URL", &url)?,
                timeouts: BackendTimeouts {
                    request_secs: parse_u64_or(
                        var("BACKEND_REQUEST_TIMEOUT_SECS"),
                        DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS,
                    ),
                    connect_secs: parse_u64_or(
                        var("BACKEND_CONNECT_TIMEOUT_SECS"),
                        DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS,
                    ),
                },
            }),
            None => None,
        };

        Ok(Self { port, public_origin, cookie_secure, auth, backend })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_u64_or(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.parse::<u64>().ok()).unwrap_or(default)
}

fn normalize_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl { var, value: raw.to_owned() });
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
