use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderValue;

/// Wildcard value for `CORS_ORIGINS` that allows any origin.
pub const ANY_ORIGIN: &str = "*";

/// Default cap on request body bytes read by the echo handler (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var} ({value:?}): {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running the fixture locally.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` entry allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum number of body bytes the echo handler reads (default: 2 MiB).
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `3000`     |
    /// | `CORS_ORIGINS`         | `*`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`       |
    /// | `MAX_BODY_BYTES`       | `2097152`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map lookup instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_var(&lookup, "HOST", "0.0.0.0")?;
        let port = parse_var(&lookup, "PORT", "3000")?;
        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "30")?;
        let max_body_bytes = parse_var(
            &lookup,
            "MAX_BODY_BYTES",
            &DEFAULT_MAX_BODY_BYTES.to_string(),
        )?;

        let raw_origins = lookup("CORS_ORIGINS").unwrap_or_else(|| ANY_ORIGIN.into());
        let cors_origins: Vec<String> = raw_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        for origin in &cors_origins {
            if origin == ANY_ORIGIN {
                continue;
            }
            if let Err(e) = HeaderValue::from_str(origin) {
                return Err(ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.clone(),
                    reason: e.to_string(),
                });
            }
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
        })
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the origin list contains the `*` wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.clone(),
        reason: e.to_string(),
    })
}
