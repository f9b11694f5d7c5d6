// ── Runtime connection configuration ──
//
// Describes how to reach the booking backend. Never touches disk: the CLI
// resolves profiles and hands a `ClientConfig` in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Bundled web PKI roots.
    #[default]
    SystemDefaults,
    /// Additionally trust a custom CA certificate file.
    CustomCa(PathBuf),
}

/// Configuration for talking to a single booking backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site root or `/api` base (e.g. `https://book.aurora-voyages.com`).
    pub api_url: Url,
    pub tls: TlsVerification,
    /// Request timeout. The storefront uses a fixed 15 s.
    pub timeout: Duration,
    /// Publishable key for the card-payment provider, if configured.
    pub payment_public_key: Option<String>,
}

impl ClientConfig {
    /// Config with the default TLS roots and the 15 s timeout.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: aurora_api::DEFAULT_TIMEOUT,
            payment_public_key: None,
        }
    }

    pub(crate) fn transport(&self) -> aurora_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => aurora_api::TlsMode::System,
            TlsVerification::CustomCa(path) => aurora_api::TlsMode::CustomCa(path.clone()),
        };
        aurora_api::TransportConfig {
            tls,
            timeout: self.timeout,
            auth_token: None,
        }
    }
}
