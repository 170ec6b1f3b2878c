// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Spanner instances.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use spanner_protocol::instance_proto::{self, instance};
use spanner_protocol::prost_types::{Any, FieldMask};
use tracing::{info, instrument};

use crate::backend::SharedBackend;
use crate::database::Database;
use crate::error::{Result, SdkError};
use crate::instance_config::InstanceConfig;
use crate::job::{self, FromOperation, Job};
use crate::list::{List, Page, Paged, page_size};
use crate::paths;
use crate::policy::Policy;
use crate::validate;

/// Fields written by [`Instance::save`].
const UPDATE_FIELDS: &[&str] = &["display_name", "node_count", "labels"];

/// Lifecycle state of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceState {
    Unspecified,
    Creating,
    Ready,
}

impl From<instance::State> for InstanceState {
    fn from(state: instance::State) -> Self {
        match state {
            instance::State::Unspecified => InstanceState::Unspecified,
            instance::State::Creating => InstanceState::Creating,
            instance::State::Ready => InstanceState::Ready,
        }
    }
}

/// Options for creating an instance.
#[derive(Debug, Clone, Default)]
pub struct CreateInstanceOptions {
    /// Display name; defaults to the instance id.
    pub name: Option<String>,
    /// Instance config id, full path, or `&InstanceConfig`.
    pub config: String,
    pub nodes: i32,
    pub labels: HashMap<String, String>,
}

impl CreateInstanceOptions {
    pub fn new(config: impl Into<String>, nodes: i32) -> Self {
        Self {
            config: config.into(),
            nodes,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_labels(mut self, labels: HashMap<String, String>) -> Self {
        self.labels = labels;
        self
    }
}

/// Build the request for creating `instance_id` in `project_id`.
pub(crate) fn create_request(
    project_id: &str,
    instance_id: &str,
    options: CreateInstanceOptions,
) -> Result<instance_proto::CreateInstanceRequest> {
    validate::instance_id(instance_id)?;
    let display_name = options.name.unwrap_or_else(|| instance_id.to_string());
    validate::display_name(&display_name)?;
    validate::nodes(options.nodes)?;
    validate::labels(&options.labels)?;
    if options.config.trim().is_empty() {
        return Err(SdkError::InvalidInput("instance config is required".to_string()));
    }

    Ok(instance_proto::CreateInstanceRequest {
        parent: paths::project_path(project_id),
        instance_id: instance_id.to_string(),
        instance: Some(instance_proto::Instance {
            name: paths::instance_path(project_id, instance_id),
            config: paths::instance_config_path_or_id(project_id, &options.config),
            display_name,
            node_count: options.nodes,
            state: instance::State::Unspecified as i32,
            labels: options.labels,
        }),
    })
}

/// A provisioned set of serving and storage resources.
#[derive(Clone)]
pub struct Instance {
    grpc: instance_proto::Instance,
    backend: SharedBackend,
    policy: Option<Policy>,
}

impl Instance {
    pub fn from_proto(grpc: instance_proto::Instance, backend: SharedBackend) -> Self {
        Self {
            grpc,
            backend,
            policy: None,
        }
    }

    pub fn grpc(&self) -> &instance_proto::Instance {
        &self.grpc
    }

    pub fn project_id(&self) -> &str {
        paths::match_project_from_instance_name(&self.grpc.name).unwrap_or_default()
    }

    pub fn instance_id(&self) -> &str {
        paths::match_instance_from_instance_name(&self.grpc.name).unwrap_or_default()
    }

    /// Full resource name.
    pub fn path(&self) -> &str {
        &self.grpc.name
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.grpc.display_name
    }

    pub fn display_name(&self) -> &str {
        &self.grpc.display_name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.grpc.display_name = name.into();
    }

    pub fn config_path(&self) -> &str {
        &self.grpc.config
    }

    pub fn config_id(&self) -> &str {
        paths::match_instance_config_from_instance_config_name(&self.grpc.config)
            .unwrap_or_default()
    }

    /// Fetch the instance's configuration, `None` if it no longer exists.
    pub async fn config(&self) -> Result<Option<InstanceConfig>> {
        match self.backend.get_instance_config(&self.grpc.config).await {
            Ok(grpc) => Ok(Some(InstanceConfig::from_proto(grpc))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn nodes(&self) -> i32 {
        self.grpc.node_count
    }

    pub fn set_nodes(&mut self, nodes: i32) {
        self.grpc.node_count = nodes;
    }

    pub fn state(&self) -> InstanceState {
        self.grpc.state().into()
    }

    pub fn is_creating(&self) -> bool {
        self.state() == InstanceState::Creating
    }

    pub fn is_ready(&self) -> bool {
        self.state() == InstanceState::Ready
    }

    pub fn labels(&self) -> &HashMap<String, String> {
        &self.grpc.labels
    }

    pub fn labels_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.grpc.labels
    }

    pub fn set_labels(&mut self, labels: HashMap<String, String>) {
        self.grpc.labels = labels;
    }

    /// Write the display name, node count and labels back to the service.
    #[instrument(skip(self), fields(instance = %self.grpc.name))]
    pub async fn save(&self) -> Result<Job<Instance>> {
        validate::display_name(&self.grpc.display_name)?;
        validate::nodes(self.grpc.node_count)?;
        validate::labels(&self.grpc.labels)?;

        let operation = self
            .backend
            .update_instance(instance_proto::UpdateInstanceRequest {
                instance: Some(self.grpc.clone()),
                field_mask: Some(FieldMask {
                    paths: UPDATE_FIELDS.iter().map(|f| f.to_string()).collect(),
                }),
            })
            .await?;
        Ok(Job::from_proto(operation, self.backend.clone()))
    }

    /// Refresh from the service, discarding local changes.
    pub async fn reload(&mut self) -> Result<&mut Self> {
        self.grpc = self.backend.get_instance(&self.grpc.name).await?;
        Ok(self)
    }

    /// Permanently delete the instance and all its databases.
    #[instrument(skip(self), fields(instance = %self.grpc.name))]
    pub async fn delete(&self) -> Result<()> {
        self.backend.delete_instance(&self.grpc.name).await?;
        info!("instance deleted");
        Ok(())
    }

    pub async fn databases(&self, token: Option<String>, max: Option<u32>) -> Result<List<Database>> {
        List::fetch(
            self.backend.clone(),
            self.instance_id().to_string(),
            token,
            max,
        )
        .await
    }

    /// Get a database of this instance, `None` if it does not exist.
    pub async fn database(&self, database_id: &str) -> Result<Option<Database>> {
        let path = paths::database_path(self.project_id(), self.instance_id(), database_id);
        match self.backend.get_database(&path).await {
            Ok(grpc) => Ok(Some(Database::from_proto(grpc, self.backend.clone()))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn create_database(
        &self,
        database_id: &str,
        statements: Vec<String>,
    ) -> Result<Job<Database>> {
        crate::database::create(
            &self.backend,
            self.project_id(),
            self.instance_id(),
            database_id,
            statements,
        )
        .await
    }

    /// The instance's IAM policy, fetched once and then cached unless `force`.
    pub async fn policy(&mut self, force: bool) -> Result<&Policy> {
        if force || self.policy.is_none() {
            let grpc = self.backend.get_instance_iam_policy(&self.grpc.name).await?;
            self.policy = Some(Policy::from_proto(grpc));
        }
        self.policy
            .as_ref()
            .ok_or_else(|| SdkError::UnexpectedResponse("policy not loaded".to_string()))
    }

    /// Replace the IAM policy. The policy returned by the service is cached.
    #[instrument(skip(self, policy), fields(instance = %self.grpc.name))]
    pub async fn set_policy(&mut self, policy: &Policy) -> Result<&Policy> {
        let grpc = self
            .backend
            .set_instance_iam_policy(&self.grpc.name, policy.to_proto())
            .await?;
        Ok(self.policy.insert(Policy::from_proto(grpc)))
    }

    /// Fetch the current policy, apply `update` and write it back.
    pub async fn update_policy<F>(&mut self, update: F) -> Result<&Policy>
    where
        F: FnOnce(&mut Policy),
    {
        let mut policy = self.policy(true).await?.clone();
        update(&mut policy);
        self.set_policy(&policy).await
    }

    /// Return the subset of `permissions` the caller holds on this instance.
    pub async fn test_permissions<I, S>(&self, permissions: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let permissions = permissions.into_iter().map(Into::into).collect();
        self.backend
            .test_instance_iam_permissions(&self.grpc.name, permissions)
            .await
    }
}

impl FromOperation for Instance {
    fn from_response(backend: &SharedBackend, response: Option<&Any>) -> Result<Self> {
        let any = response.ok_or_else(|| {
            SdkError::UnexpectedResponse("instance operation finished without a response".into())
        })?;
        let grpc = job::unpack(any, job::INSTANCE_TYPE)?;
        Ok(Instance::from_proto(grpc, backend.clone()))
    }
}

#[async_trait]
impl Paged for Instance {
    type Scope = ();

    async fn fetch_page(
        backend: &SharedBackend,
        _scope: &(),
        token: Option<&str>,
        max: Option<u32>,
    ) -> Result<Page<Self>> {
        let response = backend
            .list_instances(instance_proto::ListInstancesRequest {
                parent: paths::project_path(backend.project_id()),
                page_size: page_size(max),
                page_token: token.unwrap_or_default().to_string(),
                filter: String::new(),
            })
            .await?;
        let instances = response
            .instances
            .into_iter()
            .map(|grpc| Instance::from_proto(grpc, backend.clone()))
            .collect();
        Ok(Page::new(instances, response.next_page_token))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("path", &self.grpc.name)
            .field("display_name", &self.grpc.display_name)
            .field("config", &self.grpc.config)
            .field("nodes", &self.grpc.node_count)
            .field("state", &self.state())
            .finish()
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Instance", 7)?;
        state.serialize_field("path", self.path())?;
        state.serialize_field("instance_id", self.instance_id())?;
        state.serialize_field("display_name", self.display_name())?;
        state.serialize_field("config", self.config_id())?;
        state.serialize_field("nodes", &self.nodes())?;
        state.serialize_field("state", &self.state())?;
        state.serialize_field("labels", self.labels())?;
        state.end()
    }
}
