//! Configuration structures.
//!
//! Configuration is loaded from `PROMAPP_*` environment variables (optionally
//! via a `.env` file) and can be overridden by CLI flags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::errors::{Error, Result};
use super::ids::TenantId;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "PROMAPP_";

/// Global client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Tenant addressing.
    #[serde(default)]
    pub tenant: TenantConfig,

    /// Login credentials.
    #[serde(default)]
    pub credentials: Credentials,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Tenant addressing. The tenant URL is `{base_url}/{tenant_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub base_url: String,
    pub tenant_id: Option<TenantId>,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            base_url: "https://demo.promapp.com".to_string(),
            tenant_id: None,
        }
    }
}

impl TenantConfig {
    /// Tenant root URL with any trailing slash stripped.
    pub fn tenant_url(&self) -> Result<String> {
        let tenant = self
            .tenant_id
            .as_ref()
            .ok_or_else(|| Error::config("tenant id is not set (PROMAPP_TENANT_ID)"))?;
        let base = url::Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid base url {}: {e}", self.base_url)))?;
        Ok(format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            tenant.as_str()
        ))
    }
}

/// Username/password pair for the password grant and the login form.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("process-envelope/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Flat view of the `PROMAPP_*` variables; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    base_url: Option<String>,
    tenant_id: Option<String>,
    username: Option<String>,
    password: Option<String>,
    #[serde(default, with = "humantime_serde::option")]
    timeout: Option<Duration>,
    log_level: Option<String>,
    json_logs: Option<bool>,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let overrides = envy::prefixed(ENV_PREFIX)
            .from_env::<EnvOverrides>()
            .map_err(|e| Error::config(e.to_string()))?;
        Self::default().with_overrides(overrides)
    }

    /// Load from an explicit iterator of `(KEY, VALUE)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let overrides = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, EnvOverrides>(vars)
            .map_err(|e| Error::config(e.to_string()))?;
        Self::default().with_overrides(overrides)
    }

    fn with_overrides(mut self, env: EnvOverrides) -> Result<Self> {
        if let Some(base_url) = env.base_url {
            self.tenant.base_url = base_url;
        }
        if let Some(tenant_id) = env.tenant_id {
            self.tenant.tenant_id =
                Some(TenantId::from_string(tenant_id).map_err(Error::config)?);
        }
        if let Some(username) = env.username {
            self.credentials.username = username;
        }
        if let Some(password) = env.password {
            self.credentials.password = password;
        }
        if let Some(timeout) = env.timeout {
            self.http.timeout = timeout;
        }
        if let Some(level) = env.log_level {
            self.observability.log_level = level;
        }
        if let Some(json) = env.json_logs {
            self.observability.json_logs = json;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.tenant.base_url, "https://demo.promapp.com");
        assert!(config.tenant.tenant_id.is_none());
        assert_eq!(config.http.timeout, Duration::from_secs(30));
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn test_env_overrides_apply() {
        let config = Config::from_vars(vars(&[
            ("PROMAPP_BASE_URL", "https://eu.promapp.com/"),
            ("PROMAPP_TENANT_ID", "93555a16ceb24f139a6e8a40618d3f8b"),
            ("PROMAPP_USERNAME", "ops@example.com"),
            ("PROMAPP_PASSWORD", "hunter2"),
            ("PROMAPP_TIMEOUT", "5s"),
            ("PROMAPP_JSON_LOGS", "true"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(
            config.tenant.tenant_url().unwrap(),
            "https://eu.promapp.com/93555a16ceb24f139a6e8a40618d3f8b"
        );
        assert!(config.credentials.is_complete());
        assert_eq!(config.http.timeout, Duration::from_secs(5));
        assert!(config.observability.json_logs);
    }

    #[test]
    fn test_tenant_url_requires_tenant_id() {
        let err = TenantConfig::default().tenant_url().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_tenant_url_rejects_bad_base() {
        let tenant = TenantConfig {
            base_url: "not a url".to_string(),
            tenant_id: Some(TenantId::from_string("t1".to_string()).unwrap()),
        };
        assert!(matches!(tenant.tenant_url(), Err(Error::Config(_))));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials {
            username: "ops".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("ops"));
        assert!(!rendered.contains("hunter2"));
    }
}
