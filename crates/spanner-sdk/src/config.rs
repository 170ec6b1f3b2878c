// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the Spanner SDK.

use std::path::PathBuf;
use std::time::Duration;

use spanner_protocol::{ChannelConfig, DEFAULT_ENDPOINT};

use crate::credentials::CredentialsSource;
use crate::error::{Result, SdkError};
use crate::retry::{PollSettings, RetrySettings};

/// OAuth scopes requested for service-account credentials.
pub const DEFAULT_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/spanner.admin",
    "https://www.googleapis.com/auth/spanner.data",
];

/// Configuration for the Spanner client.
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Project that owns the instances.
    pub project_id: Option<String>,
    /// Service endpoint. `http://` endpoints are plaintext.
    pub endpoint: String,
    /// Where credentials come from.
    pub credentials: CredentialsSource,
    /// OAuth scopes requested for service-account credentials.
    pub scopes: Vec<String>,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Per-call timeout.
    pub request_timeout: Duration,
    /// HTTP/2 keep-alive interval.
    pub keep_alive_interval: Duration,
    /// Retry policy for idempotent calls.
    pub retry: RetrySettings,
    /// Polling policy for long-running jobs.
    pub poll: PollSettings,
    /// Instance used by `Spanner::default_instance`.
    pub default_instance_id: Option<String>,
    /// Application name reported in the `x-goog-api-client` header.
    pub app_name: Option<String>,
    /// Application version reported in the `x-goog-api-client` header.
    pub app_version: Option<String>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: CredentialsSource::Default,
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            keep_alive_interval: Duration::from_secs(30),
            retry: RetrySettings::default(),
            poll: PollSettings::default(),
            default_instance_id: None,
            app_name: None,
            app_version: None,
        }
    }
}

impl SdkConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for a local emulator at `host` (e.g. "localhost:9010").
    pub fn emulator(host: &str) -> Self {
        Self {
            endpoint: format!("http://{}", host),
            credentials: CredentialsSource::Insecure,
            ..Self::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SPANNER_PROJECT`, `GOOGLE_CLOUD_PROJECT`, `GCLOUD_PROJECT`: project id (first set wins)
    /// - `SPANNER_EMULATOR_HOST`: emulator `host:port`, uses a plaintext channel without credentials
    /// - `SPANNER_ENDPOINT`: service endpoint (default: "https://spanner.googleapis.com:443")
    /// - `SPANNER_ACCESS_TOKEN`: pre-issued OAuth access token
    /// - `SPANNER_KEYFILE`, `GOOGLE_APPLICATION_CREDENTIALS`: service-account key path
    ///
    /// Without a token or key path, TLS endpoints use application default
    /// credentials and plaintext endpoints use none.
    /// - `SPANNER_INSTANCE`: default instance id
    /// - `SPANNER_CONNECT_TIMEOUT_MS`: connection timeout in milliseconds (default: 10000)
    /// - `SPANNER_TIMEOUT_MS`: per-call timeout in milliseconds (default: 30000)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SdkConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = match var("SPANNER_EMULATOR_HOST") {
            Some(host) => Self::emulator(&host),
            None => Self::default(),
        };

        config.project_id = ["SPANNER_PROJECT", "GOOGLE_CLOUD_PROJECT", "GCLOUD_PROJECT"]
            .iter()
            .find_map(|key| var(*key));

        if let Some(endpoint) = var("SPANNER_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if !config.is_emulator() {
            if let Some(token) = var("SPANNER_ACCESS_TOKEN") {
                config.credentials = CredentialsSource::AccessToken(token);
            } else if let Some(path) =
                var("SPANNER_KEYFILE").or_else(|| var("GOOGLE_APPLICATION_CREDENTIALS"))
            {
                config.credentials = CredentialsSource::Keyfile(PathBuf::from(path));
            }
        } else {
            config.credentials = CredentialsSource::Insecure;
        }

        config.default_instance_id = var("SPANNER_INSTANCE");

        if let Some(ms) = var("SPANNER_CONNECT_TIMEOUT_MS") {
            config.connect_timeout = parse_millis("SPANNER_CONNECT_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = var("SPANNER_TIMEOUT_MS") {
            config.request_timeout = parse_millis("SPANNER_TIMEOUT_MS", &ms)?;
        }

        Ok(config)
    }

    /// Returns true when the endpoint is a plaintext (emulator) endpoint.
    pub fn is_emulator(&self) -> bool {
        self.endpoint.starts_with("http://")
    }

    /// Check that the configuration can be used to connect.
    pub fn validate(&self) -> Result<()> {
        match self.project_id.as_deref() {
            Some(id) if !id.trim().is_empty() => {}
            _ => return Err(SdkError::Config("project id is required".to_string())),
        }
        if self.endpoint.trim().is_empty() {
            return Err(SdkError::Config("endpoint must not be empty".to_string()));
        }
        if self.connect_timeout.is_zero() {
            return Err(SdkError::Config("connect timeout must be non-zero".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(SdkError::Config("request timeout must be non-zero".to_string()));
        }
        match &self.credentials {
            CredentialsSource::AccessToken(token) if token.trim().is_empty() => {
                return Err(SdkError::Config("access token must not be empty".to_string()));
            }
            CredentialsSource::Insecure if !self.is_emulator() => {
                return Err(SdkError::Config(format!(
                    "insecure credentials require a plaintext endpoint, got {}",
                    self.endpoint
                )));
            }
            _ => {}
        }
        Ok(())
    }

    /// Value of the `x-goog-api-client` header.
    pub fn api_client_header(&self) -> String {
        let mut header = String::from("gl-rust");
        if let Some(name) = &self.app_name {
            header.push(' ');
            header.push_str(name);
            header.push('/');
            header.push_str(self.app_version.as_deref().unwrap_or("0"));
        }
        header.push_str(" gccl/");
        header.push_str(env!("CARGO_PKG_VERSION"));
        header
    }

    /// Channel settings derived from this configuration.
    pub fn channel_config(&self) -> ChannelConfig {
        ChannelConfig {
            endpoint: self.endpoint.clone(),
            domain_name: None,
            connect_timeout_ms: self.connect_timeout.as_millis() as u64,
            request_timeout_ms: self.request_timeout.as_millis() as u64,
            keep_alive_interval_ms: self.keep_alive_interval.as_millis() as u64,
            user_agent: format!("spanner-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the project id.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the service endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the credentials source.
    pub fn with_credentials(mut self, credentials: CredentialsSource) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the OAuth scopes.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-call timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the keep-alive interval.
    pub fn with_keep_alive_interval(mut self, interval: Duration) -> Self {
        self.keep_alive_interval = interval;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    /// Set the job polling policy.
    pub fn with_poll(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    /// Set the default instance id.
    pub fn with_default_instance(mut self, instance_id: impl Into<String>) -> Self {
        self.default_instance_id = Some(instance_id.into());
        self
    }

    /// Set the application name and version reported to the service.
    pub fn with_app(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self.app_version = Some(version.into());
        self
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| SdkError::Config(format!("invalid {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SdkConfig::default();
        assert_eq!(config.endpoint, "https://spanner.googleapis.com:443");
        assert_eq!(config.scopes.len(), 3);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.credentials, CredentialsSource::Default);
        assert!(!config.is_emulator());
    }

    #[test]
    fn test_emulator_config() {
        let config = SdkConfig::emulator("localhost:9010");
        assert_eq!(config.endpoint, "http://localhost:9010");
        assert!(config.is_emulator());
        assert_eq!(config.credentials, CredentialsSource::Insecure);
    }

    #[test]
    fn test_project_lookup_order() {
        let config = SdkConfig::from_lookup(lookup(&[
            ("GCLOUD_PROJECT", "third"),
            ("GOOGLE_CLOUD_PROJECT", "second"),
        ]))
        .unwrap();
        assert_eq!(config.project_id.as_deref(), Some("second"));

        let config = SdkConfig::from_lookup(lookup(&[
            ("SPANNER_PROJECT", "first"),
            ("GOOGLE_CLOUD_PROJECT", "second"),
        ]))
        .unwrap();
        assert_eq!(config.project_id.as_deref(), Some("first"));
    }

    #[test]
    fn test_emulator_from_env_ignores_keyfile() {
        let config = SdkConfig::from_lookup(lookup(&[
            ("SPANNER_EMULATOR_HOST", "localhost:9010"),
            ("GOOGLE_APPLICATION_CREDENTIALS", "/tmp/key.json"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:9010");
        assert_eq!(config.credentials, CredentialsSource::Insecure);
    }

    #[test]
    fn test_credentials_from_env() {
        let config = SdkConfig::from_lookup(lookup(&[
            ("SPANNER_KEYFILE", "/etc/spanner.json"),
            ("GOOGLE_APPLICATION_CREDENTIALS", "/tmp/key.json"),
        ]))
        .unwrap();
        assert_eq!(
            config.credentials,
            CredentialsSource::Keyfile(PathBuf::from("/etc/spanner.json"))
        );

        let config = SdkConfig::from_lookup(lookup(&[
            ("SPANNER_ACCESS_TOKEN", "tok"),
            ("SPANNER_KEYFILE", "/etc/spanner.json"),
        ]))
        .unwrap();
        assert_eq!(config.credentials, CredentialsSource::AccessToken("tok".into()));

        let config = SdkConfig::from_lookup(lookup(&[("SPANNER_PROJECT", "p1")])).unwrap();
        assert_eq!(config.credentials, CredentialsSource::Default);
        assert!(config.validate().is_ok());

        let config =
            SdkConfig::from_lookup(lookup(&[("SPANNER_ENDPOINT", "http://localhost:9020")]))
                .unwrap();
        assert_eq!(config.credentials, CredentialsSource::Insecure);
    }

    #[test]
    fn test_invalid_timeout() {
        let err = SdkConfig::from_lookup(lookup(&[("SPANNER_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, SdkError::Config(msg) if msg.contains("SPANNER_TIMEOUT_MS")));
    }

    #[test]
    fn test_validate() {
        assert!(SdkConfig::new().validate().is_err());
        assert!(SdkConfig::new().with_project_id("p1").validate().is_ok());
        assert!(
            SdkConfig::new()
                .with_project_id("p1")
                .with_request_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
        assert!(
            SdkConfig::emulator("localhost:9010")
                .with_project_id("p1")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_validate_rejects_insecure_tls() {
        let config = SdkConfig::new()
            .with_project_id("p1")
            .with_credentials(CredentialsSource::Insecure);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SdkError::Config(msg) if msg.contains("plaintext endpoint")));
    }

    #[test]
    fn test_builder_methods() {
        let config = SdkConfig::new()
            .with_project_id("p1")
            .with_endpoint("https://eu-spanner.example.com:443")
            .with_default_instance("main")
            .with_connect_timeout(Duration::from_secs(5))
            .with_app("orders", "1.2.3");

        assert_eq!(config.project_id.as_deref(), Some("p1"));
        assert_eq!(config.default_instance_id.as_deref(), Some("main"));
        assert_eq!(config.channel_config().connect_timeout_ms, 5000);
        assert!(config.api_client_header().contains(" orders/1.2.3 gccl/"));
    }
}
