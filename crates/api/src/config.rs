use std::str::FromStr;

use axum::http::HeaderValue;
use jsonwebtoken::Algorithm;

/// Configuration could not be assembled from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Which [`casting_db::Store`] implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("expected `postgres` or `memory`, got `{other}`")),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store: StoreKind,
    /// Required when `store` is [`StoreKind::Postgres`].
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Bearer-token verification settings.
    pub auth: AuthConfig,
}

/// Identity-provider settings used to verify bearer tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Provider domain, e.g. `casting.eu.auth0.com`.
    pub domain: String,
    /// Expected `aud` claim.
    pub audience: String,
    /// Signing algorithms accepted in token headers.
    pub algorithms: Vec<Algorithm>,
    /// Where the provider publishes its JSON Web Key Set.
    pub jwks_url: String,
}

impl AuthConfig {
    /// Build a config for `domain` with the provider's conventional JWKS location.
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            jwks_url: default_jwks_url(&domain),
            domain,
            audience: audience.into(),
            algorithms: vec![Algorithm::RS256],
        }
    }

    /// Expected `iss` claim: `https://<domain>/`.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// Load auth configuration from environment variables.
    ///
    /// | Env Var          | Required | Default                                 |
    /// |------------------|----------|-----------------------------------------|
    /// | `AUTH0_DOMAIN`   | **yes**  | --                                      |
    /// | `API_AUDIENCE`   | **yes**  | --                                      |
    /// | `JWT_ALGORITHMS` | no       | `RS256`                                 |
    /// | `JWKS_URL`       | no       | `https://<domain>/.well-known/jwks.json` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let domain = required(&lookup, "AUTH0_DOMAIN")?;
        let audience = required(&lookup, "API_AUDIENCE")?;

        let algorithms = lookup("JWT_ALGORITHMS")
            .unwrap_or_else(|| "RS256".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Algorithm::from_str(s).map_err(|e| ConfigError::Invalid {
                    var: "JWT_ALGORITHMS",
                    reason: format!("`{s}`: {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if algorithms.is_empty() {
            return Err(ConfigError::Invalid {
                var: "JWT_ALGORITHMS",
                reason: "at least one algorithm is required".into(),
            });
        }

        let jwks_url = lookup("JWKS_URL").unwrap_or_else(|| default_jwks_url(&domain));

        Ok(Self {
            domain,
            audience,
            algorithms,
            jwks_url,
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default    |
    /// |----------------------------|------------|
    /// | `HOST`                     | `0.0.0.0`  |
    /// | `PORT`                     | `8080`     |
    /// | `CORS_ORIGINS`             | `*`        |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`       |
    /// | `STORE`                    | `postgres` |
    /// | `DATABASE_URL`             | --         |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`       |
    ///
    /// `DATABASE_URL` is required unless `STORE=memory`. The auth variables
    /// are documented on [`AuthConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parsed(&lookup, "PORT", 8080u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| *o != "*" && HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: format!("`{bad}` is not a valid origin"),
            });
        }

        let request_timeout_secs = parsed(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let store = parsed(&lookup, "STORE", StoreKind::Postgres)?;

        let database_url = lookup("DATABASE_URL").filter(|s| !s.is_empty());
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        let database_max_connections = parsed(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;

        let auth = AuthConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            database_url,
            database_max_connections,
            auth,
        })
    }

    /// Whether CORS is configured to allow any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn default_jwks_url(domain: &str) -> String {
    format!("https://{domain}/.well-known/jwks.json")
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
