//! Client configuration.

use std::time::Duration;

use crate::error::Result;
use crate::marketplace::MarketplaceRegistry;

/// Configuration for [`MwsClient`](crate::MwsClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Application name sent in `x-amazon-user-agent`.
    pub application_name: String,
    /// Application version sent in `x-amazon-user-agent`.
    pub application_version: String,
    /// Request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// Connection timeout. `None` keeps the transport default.
    pub connect_timeout: Option<Duration>,
    /// Send requests to this base URL instead of the regional host. The
    /// signature is still computed for the regional host.
    pub endpoint_override: Option<String>,
    /// Marketplace id to host mapping.
    pub marketplaces: MarketplaceRegistry,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            application_name: crate::APPLICATION_NAME.to_string(),
            application_version: crate::APPLICATION_VERSION.to_string(),
            timeout: None,
            connect_timeout: None,
            endpoint_override: None,
            marketplaces: MarketplaceRegistry::builtin(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Value of the `x-amazon-user-agent` and `User-Agent` headers.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.application_name, self.application_version)
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the application name reported to MWS.
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.config.application_name = name.into();
        self
    }

    /// Set the application version reported to MWS.
    pub fn with_application_version(mut self, version: impl Into<String>) -> Self {
        self.config.application_version = version.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Send requests to `base_url` instead of the marketplace's host.
    pub fn with_endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.config.endpoint_override = Some(base_url.into());
        self
    }

    /// Use a custom marketplace registry.
    pub fn with_marketplaces(mut self, registry: MarketplaceRegistry) -> Self {
        self.config.marketplaces = registry;
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Build the client configuration.
    ///
    /// Fails if the endpoint override is not an absolute URL.
    pub fn build(self) -> Result<ClientConfig> {
        if let Some(endpoint) = &self.config.endpoint_override {
            url::Url::parse(endpoint)?;
        }
        Ok(self.config)
    }
}
