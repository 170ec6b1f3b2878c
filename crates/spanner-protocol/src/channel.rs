// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! gRPC channel helpers for connecting to the Spanner service.

use std::time::Duration;

use thiserror::Error;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tracing::{debug, info, instrument};

/// Default production endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://spanner.googleapis.com:443";

/// Errors that can occur while building or opening a channel
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("connection timed out after {0}ms")]
    Timeout(u64),
}

/// Configuration for the gRPC channel
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Endpoint URI. `https://` endpoints use TLS, `http://` endpoints are plaintext
    pub endpoint: String,
    /// Server name for TLS verification (defaults to the endpoint host)
    pub domain_name: Option<String>,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Per-request timeout in milliseconds (0 to disable)
    pub request_timeout_ms: u64,
    /// HTTP/2 keep-alive interval in milliseconds (0 to disable)
    pub keep_alive_interval_ms: u64,
    /// Value of the `user-agent` header
    pub user_agent: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            domain_name: None,
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            keep_alive_interval_ms: 30_000,
            user_agent: format!("spanner-protocol/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ChannelConfig {
    /// Create a configuration for a plaintext emulator at `host` (e.g. "localhost:9010")
    pub fn emulator(host: &str) -> Self {
        Self {
            endpoint: format!("http://{}", host),
            ..Default::default()
        }
    }

    /// Returns true when the endpoint does not use TLS
    pub fn is_plaintext(&self) -> bool {
        self.endpoint.starts_with("http://")
    }

    /// Host part of the endpoint, without scheme and port
    pub fn host(&self) -> Option<&str> {
        let rest = self
            .endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.endpoint);
        let authority = rest.split('/').next()?;
        let host = authority.rsplit_once(':').map_or(authority, |(h, _)| h);
        if host.is_empty() { None } else { Some(host) }
    }

    /// Build the tonic endpoint described by this configuration
    pub fn build_endpoint(&self) -> Result<Endpoint, ChannelError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ChannelError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        let mut endpoint = Endpoint::from_shared(self.endpoint.clone())
            .map_err(|e| ChannelError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .tcp_nodelay(true)
            .user_agent(self.user_agent.clone())?;

        if self.request_timeout_ms > 0 {
            endpoint = endpoint.timeout(Duration::from_millis(self.request_timeout_ms));
        }

        if self.keep_alive_interval_ms > 0 {
            endpoint = endpoint
                .http2_keep_alive_interval(Duration::from_millis(self.keep_alive_interval_ms))
                .keep_alive_while_idle(true);
        }

        if !self.is_plaintext() {
            let mut tls = ClientTlsConfig::new().with_webpki_roots();
            if let Some(domain) = self.domain_name.as_deref().or_else(|| self.host()) {
                tls = tls.domain_name(domain.to_string());
            }
            endpoint = endpoint.tls_config(tls)?;
        }

        Ok(endpoint)
    }

    /// Connect eagerly, failing if the server cannot be reached
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn connect(&self) -> Result<Channel, ChannelError> {
        let endpoint = self.build_endpoint()?;

        info!(plaintext = self.is_plaintext(), "connecting to spanner");

        let timeout = Duration::from_millis(self.connect_timeout_ms);
        let channel = tokio::time::timeout(timeout, endpoint.connect())
            .await
            .map_err(|_| ChannelError::Timeout(self.connect_timeout_ms))??;

        info!("connected to spanner");
        Ok(channel)
    }

    /// Build a channel that connects on first use.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect_lazy(&self) -> Result<Channel, ChannelError> {
        let endpoint = self.build_endpoint()?;
        debug!(endpoint = %self.endpoint, "created lazy spanner channel");
        Ok(endpoint.connect_lazy())
    }
}
