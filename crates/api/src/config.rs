//! Server configuration loaded from environment variables.

use axum::http::{HeaderName, HeaderValue};
use sqlx::postgres::PgConnectOptions;

use crate::auth::jwt::JwtConfig;

/// Error raised when the environment holds a missing or malformed setting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
///
/// All fields except the signing secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Verbose logging toggle (`DEBUG=true`).
    pub debug: bool,
    /// Postgres connection options.
    pub database: PgConnectOptions,
    /// Allowed CORS origins, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// Headers clients may send cross-origin, from space-separated `CORS_ALLOW_HEADERS`.
    pub cors_allow_headers: Vec<HeaderName>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Administrator created at startup when no active admin exists.
    pub admin: Option<AdminBootstrap>,
}

/// Credentials of the first administrator, from `ADMIN_*` variables.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_CORS_ALLOW_HEADERS: &str =
    "accept authorization content-type origin user-agent x-csrftoken x-requested-with";

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `0.0.0.0`                       |
    /// | `PORT`                 | `8000`                          |
    /// | `DEBUG`                | `false`                         |
    /// | `DATABASE_URL`         | built from `PG_*` variables     |
    /// | `ADMIN_USERNAME`       | unset (no admin bootstrap)      |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`         |
    /// | `CORS_ALLOW_HEADERS`   | common browser headers          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                            |
    ///
    /// JWT settings are read by [`JwtConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&get, "PORT", 8000u16)?;
        let debug = get("DEBUG").is_some_and(|v| v.eq_ignore_ascii_case("true"));
        let request_timeout_secs = parse_var(&get, "REQUEST_TIMEOUT_SECS", 30u64)?;

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cors_allow_headers = get("CORS_ALLOW_HEADERS")
            .unwrap_or_else(|| DEFAULT_CORS_ALLOW_HEADERS.into())
            .split_whitespace()
            .map(|name| {
                HeaderName::from_bytes(name.to_ascii_lowercase().as_bytes()).map_err(|e| {
                    ConfigError::Invalid {
                        key: "CORS_ALLOW_HEADERS",
                        value: name.to_string(),
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            host,
            port,
            debug,
            database: database_options(&get)?,
            cors_origins,
            cors_allow_headers,
            request_timeout_secs,
            jwt: JwtConfig::from_lookup(&get)?,
            admin: admin_bootstrap(&get)?,
        })
    }

    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "callhelper_api=debug,callhelper_db=debug,tower_http=debug,sqlx=info"
        } else {
            "callhelper_api=info,tower_http=info,sqlx=warn"
        }
    }
}

/// `DATABASE_URL` if set, otherwise options assembled from the `PG_*`
/// variables. Credentials are passed as-is, never spliced into a URL.
fn database_options<F>(get: &F) -> Result<PgConnectOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = get("DATABASE_URL").filter(|u| !u.is_empty()) {
        return url.parse().map_err(|e: sqlx::Error| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: "<redacted>".into(),
            reason: e.to_string(),
        });
    }
    Ok(PgConnectOptions::new()
        .host(&get("PG_HOST").unwrap_or_else(|| "localhost".into()))
        .port(parse_var(get, "PG_PORT", 5432u16)?)
        .username(&get("PG_USERNAME").unwrap_or_else(|| "postgres".into()))
        .password(&get("PG_PASSWORD").unwrap_or_else(|| "postgres".into()))
        .database(&get("PG_DB_NAME").unwrap_or_else(|| "callhelper".into())))
}

/// `ADMIN_USERNAME` enables the bootstrap; it then requires `ADMIN_PASSWORD`.
fn admin_bootstrap<F>(get: &F) -> Result<Option<AdminBootstrap>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(username) = get("ADMIN_USERNAME").filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    let password = get("ADMIN_PASSWORD")
        .filter(|p| !p.is_empty())
        .ok_or(ConfigError::Missing("ADMIN_PASSWORD"))?;
    let email = get("ADMIN_EMAIL").unwrap_or_else(|| format!("{username}@localhost"));
    Ok(Some(AdminBootstrap {
        username,
        email,
        password,
    }))
}

/// Parse `key` with `FromStr`, falling back to `default` when unset.
pub(crate) fn parse_var<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
