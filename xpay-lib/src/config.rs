//! Client configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Result, XpayError};

/// Environment variable holding the merchant platform code.
pub const ENV_PLATFORM_CODE: &str = "XPAY_PLATFORM_CODE";
/// Environment variable holding the gateway base URL.
pub const ENV_GATEWAY_URL: &str = "XPAY_GATEWAY_URL";
/// Environment variable holding the merchant private key path.
pub const ENV_PRIVATE_KEY_PATH: &str = "XPAY_PRIVATE_KEY_PATH";
/// Environment variable holding the gateway public key path.
pub const ENV_GATEWAY_PUBLIC_KEY_PATH: &str = "XPAY_GATEWAY_PUBLIC_KEY_PATH";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "XPAY_TIMEOUT_SECS";

/// Configuration for an [`XpayClient`](crate::XpayClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Merchant platform identifier assigned by the gateway.
    pub platform_code: String,

    /// Gateway base URL (e.g., "https://gateway.example.com").
    pub gateway_url: String,

    /// PEM file with the merchant's RSA private key.
    pub private_key_path: PathBuf,

    /// PEM file with the gateway's RSA public key.
    pub gateway_public_key_path: PathBuf,

    /// Timeout for a whole request round trip, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

impl ClientConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(
        platform_code: impl Into<String>,
        gateway_url: impl Into<String>,
        private_key_path: impl Into<PathBuf>,
        gateway_public_key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            platform_code: platform_code.into(),
            gateway_url: gateway_url.into(),
            private_key_path: private_key_path.into(),
            gateway_public_key_path: gateway_public_key_path.into(),
            timeout_secs: default_timeout(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Gateway URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.gateway_url.trim_end_matches('/')
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if self.platform_code.trim().is_empty() {
            return Err(XpayError::invalid_data("platform_code", "must not be empty"));
        }
        let url = self.gateway_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(XpayError::invalid_data(
                "gateway_url",
                format!("expected an http(s) URL, got '{}'", self.gateway_url),
            ));
        }
        if self.private_key_path.as_os_str().is_empty() {
            return Err(XpayError::invalid_data("private_key_path", "must not be empty"));
        }
        if self.gateway_public_key_path.as_os_str().is_empty() {
            return Err(XpayError::invalid_data(
                "gateway_public_key_path",
                "must not be empty",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(XpayError::invalid_data("timeout_secs", "must be positive"));
        }
        Ok(())
    }

    /// Load configuration from `XPAY_*` environment variables.
    ///
    /// Reads:
    /// - `XPAY_PLATFORM_CODE`, `XPAY_GATEWAY_URL`, `XPAY_PRIVATE_KEY_PATH`,
    ///   `XPAY_GATEWAY_PUBLIC_KEY_PATH` (required)
    /// - `XPAY_TIMEOUT_SECS` (optional, default 10)
    ///
    /// # Example
    ///
    /// ```bash
    /// export XPAY_PLATFORM_CODE=P1
    /// export XPAY_GATEWAY_URL=https://gateway.example.com
    /// export XPAY_PRIVATE_KEY_PATH=keys/app_private_key.pem
    /// export XPAY_GATEWAY_PUBLIC_KEY_PATH=keys/gateway_public_key.pem
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| XpayError::Config(format!("{} is not set", name)))
        };

        let mut config = Self::new(
            required(ENV_PLATFORM_CODE)?,
            required(ENV_GATEWAY_URL)?,
            required(ENV_PRIVATE_KEY_PATH)?,
            required(ENV_GATEWAY_PUBLIC_KEY_PATH)?,
        );

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                XpayError::invalid_data(ENV_TIMEOUT_SECS, format!("not a number: '{}'", timeout))
            })?;
            config = config.with_timeout(secs);
        }

        config.validate()?;
        Ok(config)
    }
}
