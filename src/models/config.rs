//! Client configuration
//!
//! Base endpoints, default access token, transport timeout and the token
//! lookup policy. Values come from `Default` (public endpoints) or from the
//! environment via [`ClientConfig::from_env`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::errors::{GuardError, GuardResult};
use crate::utils::constants::{
    get_chain_name, DEFAULT_API_V1_URL, DEFAULT_API_V2_URL, ENV_ACCESS_TOKEN, ENV_API_V1_URL,
    ENV_API_V2_URL, ENV_LOOKUP_POLICY, ENV_TIMEOUT_SECS, USER_AGENT,
};

/// Chain identifier as the service expects it in paths and query strings.
///
/// Most chains are numeric (`1`, `56`), a few are names (`"solana"`), so the
/// id is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainId(String);

impl ChainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric id, if the chain has one
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// Human-readable chain name for well-known ids
    pub fn name(&self) -> &'static str {
        self.numeric().map(get_chain_name).unwrap_or("Unknown")
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ChainId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ChainId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How `token_security` picks its entry out of the keyed result map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPolicy {
    /// Entry keyed by the lower-cased contract that was requested;
    /// a missing key is an error.
    #[default]
    StrictKey,
    /// First entry of the map whatever its key (legacy behaviour).
    FirstEntry,
}

impl FromStr for LookupPolicy {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" | "strict_key" | "strict-key" => Ok(Self::StrictKey),
            "first" | "first_entry" | "first-entry" => Ok(Self::FirstEntry),
            other => Err(GuardError::invalid_config(format!(
                "Unknown lookup policy: {}",
                other
            ))),
        }
    }
}

/// Configuration for [`crate::GoPlusClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// v1 base endpoint
    pub base_url_v1: String,
    /// v2 base endpoint
    pub base_url_v2: String,
    /// Default access token used when a call passes none
    pub auth_token: Option<String>,
    /// Transport timeout; `None` leaves the HTTP client default
    pub timeout: Option<Duration>,
    /// Entry selection for token security lookups
    pub lookup_policy: LookupPolicy,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url_v1: DEFAULT_API_V1_URL.to_string(),
            base_url_v2: DEFAULT_API_V2_URL.to_string(),
            auth_token: None,
            timeout: None,
            lookup_policy: LookupPolicy::default(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the environment, falling back to defaults.
    /// The access token is never logged.
    pub fn from_env() -> GuardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> GuardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_V1_URL) {
            config.base_url_v1 = url;
        }
        if let Some(url) = get(ENV_API_V2_URL) {
            config.base_url_v2 = url;
        }
        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            info!("🔑 {} configured (token hidden)", ENV_ACCESS_TOKEN);
            config.auth_token = Some(token);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                GuardError::invalid_config(format!("{} must be whole seconds", ENV_TIMEOUT_SECS))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(policy) = get(ENV_LOOKUP_POLICY) {
            config.lookup_policy = policy.parse()?;
        }

        Ok(config)
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_base_urls(mut self, v1: impl Into<String>, v2: impl Into<String>) -> Self {
        self.base_url_v1 = v1.into();
        self.base_url_v2 = v2.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.lookup_policy = policy;
        self
    }
}
