// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Instance configurations: the placement and replication of an instance.

use async_trait::async_trait;
use serde::Serialize;
use spanner_protocol::instance_proto;

use crate::backend::SharedBackend;
use crate::error::Result;
use crate::list::{Page, Paged, page_size};
use crate::paths;

/// A named placement template such as `regional-us-central1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceConfig {
    #[serde(rename = "path")]
    name: String,
    display_name: String,
}

impl InstanceConfig {
    pub fn from_proto(grpc: instance_proto::InstanceConfig) -> Self {
        Self {
            name: grpc.name,
            display_name: grpc.display_name,
        }
    }

    pub fn project_id(&self) -> &str {
        paths::match_project_from_instance_config_name(&self.name).unwrap_or_default()
    }

    pub fn instance_config_id(&self) -> &str {
        paths::match_instance_config_from_instance_config_name(&self.name).unwrap_or_default()
    }

    /// Full resource name.
    pub fn path(&self) -> &str {
        &self.name
    }

    pub fn name(&self) -> &str {
        &self.display_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl From<&InstanceConfig> for String {
    fn from(config: &InstanceConfig) -> Self {
        config.path().to_string()
    }
}

#[async_trait]
impl Paged for InstanceConfig {
    type Scope = ();

    async fn fetch_page(
        backend: &SharedBackend,
        _scope: &(),
        token: Option<&str>,
        max: Option<u32>,
    ) -> Result<Page<Self>> {
        let response = backend
            .list_instance_configs(instance_proto::ListInstanceConfigsRequest {
                parent: paths::project_path(backend.project_id()),
                page_size: page_size(max),
                page_token: token.unwrap_or_default().to_string(),
            })
            .await?;
        let configs = response
            .instance_configs
            .into_iter()
            .map(Self::from_proto)
            .collect();
        Ok(Page::new(configs, response.next_page_token))
    }
}
