//! Client configuration.
//!
//! The default principal lives here rather than in code paths that see
//! "no credentials": whoever builds a resource client decides which account
//! stands behind an unauthenticated-looking call.

use std::time::Duration;

use crate::auth::{AuthScheme, Credentials};
use crate::error::{Result, TemplateError};

pub const ENV_BASE_URL: &str = "RESOURCE_CLIENT_BASE_URL";
pub const ENV_USERNAME: &str = "RESOURCE_CLIENT_USERNAME";
pub const ENV_PASSWORD: &str = "RESOURCE_CLIENT_PASSWORD";
pub const ENV_AUTH_SCHEME: &str = "RESOURCE_CLIENT_AUTH_SCHEME";
pub const ENV_TIMEOUT_SECS: &str = "RESOURCE_CLIENT_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "adminpass";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub default_principal: Credentials,
    pub auth_scheme: AuthScheme,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_principal: Credentials::new(DEFAULT_USERNAME, DEFAULT_PASSWORD),
            auth_scheme: AuthScheme::Basic,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_default_principal(mut self, principal: Credentials) -> Self {
        self.default_principal = principal;
        self
    }

    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `RESOURCE_CLIENT_BASE_URL` (default: `http://localhost:3000`)
    /// - `RESOURCE_CLIENT_USERNAME` / `RESOURCE_CLIENT_PASSWORD`: the default
    ///   principal; set both or neither (default: `admin` / `adminpass`)
    /// - `RESOURCE_CLIENT_AUTH_SCHEME`: `basic` or `digest` (default: `basic`)
    /// - `RESOURCE_CLIENT_TIMEOUT_SECS`: `0` disables the timeout (default: 30)
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(ENV_BASE_URL) {
            Ok(base_url) => Self::new(&base_url),
            Err(_) => Self::default(),
        };

        match (std::env::var(ENV_USERNAME), std::env::var(ENV_PASSWORD)) {
            (Ok(username), Ok(password)) => {
                config.default_principal = Credentials::new(username, password);
            }
            (Err(_), Err(_)) => {}
            _ => {
                return Err(TemplateError::Config(format!(
                    "{ENV_USERNAME} and {ENV_PASSWORD} must be set together"
                )))
            }
        }

        if let Ok(scheme) = std::env::var(ENV_AUTH_SCHEME) {
            config.auth_scheme = scheme.parse()?;
        }

        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                TemplateError::Config(format!("{ENV_TIMEOUT_SECS}: not a number: {secs}"))
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }
}
