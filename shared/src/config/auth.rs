//! Token signing configuration

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Minimum accepted length of an HMAC secret in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime (10 years)
pub const MAX_EXPIRY: Duration = Duration::from_secs(10 * 365 * 86400);

/// Longest accepted clock leeway
pub const MAX_LEEWAY: Duration = Duration::from_secs(3600);

/// Secret and lifetime for one kind of token
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenPolicyConfig {
    /// HMAC-SHA256 signing secret. Required, never generated.
    #[serde(default)]
    pub secret: String,

    /// How long a token stays valid after issuance
    #[serde(with = "humantime_serde")]
    pub expiry: Duration,
}

impl TokenPolicyConfig {
    /// Create a policy with an explicit secret and lifetime
    pub fn new(secret: impl Into<String>, expiry: Duration) -> Self {
        Self {
            secret: secret.into(),
            expiry,
        }
    }

    fn validate(&self, kind: &'static str, field: &'static str) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret { kind });
        }
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                kind,
                min: MIN_SECRET_LEN,
            });
        }
        if self.expiry.is_zero() {
            return Err(ConfigError::ZeroExpiry { kind });
        }
        if self.expiry > MAX_EXPIRY {
            return Err(ConfigError::InvalidValue {
                field,
                reason: format!("must not exceed {}s", MAX_EXPIRY.as_secs()),
            });
        }
        Ok(())
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for TokenPolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPolicyConfig")
            .field("secret", &if self.secret.is_empty() { "<unset>" } else { "<redacted>" })
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// JWT configuration shared by the access and refresh policies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// `iss` claim written into and required from every token
    pub issuer: String,

    /// `aud` claim written into and required from every token
    pub audience: String,

    /// Clock skew tolerated when checking `exp` and `nbf`
    #[serde(with = "humantime_serde", default)]
    pub leeway: Duration,

    /// Access token policy
    pub access: TokenPolicyConfig,

    /// Refresh token policy
    pub refresh: TokenPolicyConfig,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            issuer: String::from("quill-blog"),
            audience: String::from("https://quill.blog/api"),
            leeway: Duration::ZERO,
            access: TokenPolicyConfig::new("", Duration::from_secs(7 * 86400)),
            refresh: TokenPolicyConfig::new("", Duration::from_secs(30 * 86400)),
        }
    }
}

impl JwtConfig {
    /// Create a configuration with both secrets set and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.access.secret = access_secret.into();
        config.refresh.secret = refresh_secret.into();
        config
    }

    /// Set the access token lifetime
    pub fn with_access_expiry(mut self, expiry: Duration) -> Self {
        self.access.expiry = expiry;
        self
    }

    /// Set the refresh token lifetime
    pub fn with_refresh_expiry(mut self, expiry: Duration) -> Self {
        self.refresh.expiry = expiry;
        self
    }

    /// Set issuer and audience
    pub fn with_issuer(mut self, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self.audience = audience.into();
        self
    }

    /// Check the configuration before anything is signed with it
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::EmptyField { field: "jwt.issuer" });
        }
        if self.audience.trim().is_empty() {
            return Err(ConfigError::EmptyField { field: "jwt.audience" });
        }
        if self.leeway > MAX_LEEWAY {
            return Err(ConfigError::InvalidValue {
                field: "jwt.leeway",
                reason: format!("must not exceed {}s", MAX_LEEWAY.as_secs()),
            });
        }
        self.access.validate("access", "jwt.access.expiry")?;
        self.refresh.validate("refresh", "jwt.refresh.expiry")?;
        if self.access.secret == self.refresh.secret {
            return Err(ConfigError::SharedSecret);
        }
        if self.access.expiry > self.refresh.expiry {
            return Err(ConfigError::AccessOutlivesRefresh);
        }
        Ok(())
    }
}
