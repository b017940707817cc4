//! Configuration loading and validation for the gateway.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any variable is present but invalid.

use anyhow::{Context, Result};
use serde::Deserialize;
use validation::{DesxIvPolicy, Policy};

/// Validated gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Base URL of the cipher service admissible requests are forwarded to.
    #[serde(default = "default_cipher_service_url")]
    pub cipher_service_url: String,

    /// Upper bound (seconds) on one round trip to the cipher service.
    #[serde(default = "default_timeout_secs")]
    pub downstream_timeout_secs: u64,

    /// Upper bound (seconds) on handling one inbound request.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// OTLP collector endpoint. Spans are only exported when this is set.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Whether DESX chaining modes need an IV like DES and 3DES.
    #[serde(default)]
    pub desx_iv_policy: DesxIvPolicy,

    /// Reject AES-ECB with `NoPadding`.
    #[serde(default)]
    pub aes_ecb_requires_padding: bool,

    /// Require 16-byte IVs for AES CBC/CFB/OFB/CTR.
    #[serde(default)]
    pub strict_aes_iv_length: bool,
}

fn default_listen_port() -> u16 {
    8090
}
fn default_cipher_service_url() -> String {
    "http://localhost:8080".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            cipher_service_url: default_cipher_service_url(),
            downstream_timeout_secs: default_timeout_secs(),
            request_timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
            otel_exporter_otlp_endpoint: None,
            desx_iv_policy: DesxIvPolicy::default(),
            aes_ecb_requires_padding: false,
            strict_aes_iv_length: false,
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The rule-engine policy selected by this configuration.
    pub fn policy(&self) -> Policy {
        Policy {
            desx_iv: self.desx_iv_policy,
            aes_ecb_requires_padding: self.aes_ecb_requires_padding,
            strict_aes_iv_length: self.strict_aes_iv_length,
        }
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        let url = self.cipher_service_url.trim();
        if url.is_empty() {
            anyhow::bail!("CIPHER_SERVICE_URL must not be empty");
        }
        if !url.starts_with("http://") {
            anyhow::bail!("CIPHER_SERVICE_URL must be a plain http:// URL, got {url}");
        }
        if self.downstream_timeout_secs == 0 {
            anyhow::bail!("DOWNSTREAM_TIMEOUT_SECS must be > 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            if endpoint.trim().is_empty() {
                anyhow::bail!("OTEL_EXPORTER_OTLP_ENDPOINT must not be blank when set");
            }
        }
        Ok(())
    }
}
