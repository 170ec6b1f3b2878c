// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Channel configuration tests for spanner-protocol.

use spanner_protocol::{ChannelConfig, ChannelError, DEFAULT_ENDPOINT};

#[test]
fn test_default_config() {
    let config = ChannelConfig::default();

    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert!(config.domain_name.is_none());
    assert_eq!(config.connect_timeout_ms, 10_000);
    assert_eq!(config.request_timeout_ms, 30_000);
    assert_eq!(config.keep_alive_interval_ms, 30_000);
    assert!(config.user_agent.starts_with("spanner-protocol/"));
}

#[test]
fn test_emulator_config() {
    let config = ChannelConfig::emulator("localhost:9010");

    assert_eq!(config.endpoint, "http://localhost:9010");
    assert!(config.is_plaintext());
}

#[test]
fn test_build_plaintext_endpoint() {
    let config = ChannelConfig::emulator("127.0.0.1:9010");
    assert!(config.build_endpoint().is_ok());
}

#[test]
fn test_build_tls_endpoint() {
    let config = ChannelConfig::default();
    assert!(config.build_endpoint().is_ok());
}

#[test]
fn test_invalid_endpoint() {
    let config = ChannelConfig {
        endpoint: "not a uri".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        config.build_endpoint(),
        Err(ChannelError::InvalidEndpoint { .. })
    ));
}

#[tokio::test]
async fn test_lazy_channel_does_not_connect() {
    // Nothing listens on this port; a lazy channel must still be created
    let config = ChannelConfig::emulator("127.0.0.1:1");
    assert!(config.connect_lazy().is_ok());
}

#[tokio::test]
async fn test_connect_to_closed_port_fails() {
    let config = ChannelConfig {
        connect_timeout_ms: 500,
        ..ChannelConfig::emulator("127.0.0.1:1")
    };
    assert!(config.connect().await.is_err());
}

#[test]
fn test_config_clone() {
    let config1 = ChannelConfig {
        domain_name: Some("spanner.example.com".to_string()),
        ..Default::default()
    };
    let config2 = config1.clone();

    assert_eq!(config1.endpoint, config2.endpoint);
    assert_eq!(config1.domain_name, config2.domain_name);
    assert_eq!(config1.user_agent, config2.user_agent);
}
