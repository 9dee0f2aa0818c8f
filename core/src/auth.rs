//! Authentication strategy applied to template requests.
//!
//! # Design
//! The scheme is an enum with one implemented strategy. `Basic` installs a
//! session principal whose `Authorization` header rides on every later
//! request; `Digest` is recognised in configuration but rejected when used.
//!
//! "No credentials" never means anonymous: `authenticate(None)` installs the
//! default principal the concrete resource client was configured with.

use std::fmt;
use std::str::FromStr;

use base64::prelude::*;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TemplateError};

pub const AUTHORIZATION: &str = "authorization";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    #[default]
    Basic,
    Digest,
}

impl FromStr for AuthScheme {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(AuthScheme::Basic),
            "digest" => Ok(AuthScheme::Digest),
            other => Err(TemplateError::Config(format!("unknown auth scheme: {other}"))),
        }
    }
}

/// A username/password pair. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value of the `Authorization` header for HTTP Basic.
    pub fn basic_authorization(&self) -> String {
        let token = BASE64_STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
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

/// Holds the principal used for subsequent requests of one template.
#[derive(Debug)]
pub struct Authenticator {
    scheme: AuthScheme,
    default_principal: Credentials,
    session: RwLock<Option<Credentials>>,
}

impl Authenticator {
    pub fn new(scheme: AuthScheme, default_principal: Credentials) -> Self {
        Self {
            scheme,
            default_principal,
            session: RwLock::new(None),
        }
    }

    pub fn scheme(&self) -> AuthScheme {
        self.scheme
    }

    pub fn default_principal(&self) -> &Credentials {
        &self.default_principal
    }

    /// Installs `credentials`, or the default principal when `None`.
    pub fn authenticate(&self, credentials: Option<Credentials>) -> Result<()> {
        match self.scheme {
            AuthScheme::Basic => {
                let principal = credentials.unwrap_or_else(|| self.default_principal.clone());
                tracing::debug!(username = %principal.username, "basic authentication installed");
                *self.session.write() = Some(principal);
                Ok(())
            }
            AuthScheme::Digest => Err(TemplateError::Unsupported("digest authentication")),
        }
    }

    /// Username of the installed principal, if any.
    pub fn current_principal(&self) -> Option<String> {
        self.session.read().as_ref().map(|c| c.username.clone())
    }

    /// `Authorization` header for the installed principal.
    pub fn authorization_header(&self) -> Option<(String, String)> {
        self.session
            .read()
            .as_ref()
            .map(|c| (AUTHORIZATION.to_string(), c.basic_authorization()))
    }

    pub fn clear(&self) {
        *self.session.write() = None;
    }
}
