// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Backend seam between the resource wrappers and the service.
//!
//! - `grpc`: tonic clients over a shared channel (default)
//!
//! Tests substitute an in-memory implementation.

pub mod grpc;

use std::sync::Arc;

use async_trait::async_trait;
use spanner_protocol::{database_proto, iam_proto, instance_proto, longrunning_proto, spanner_proto};

use crate::error::Result;
use crate::retry::PollSettings;

pub use grpc::GrpcBackend;

/// Shared handle to a backend.
pub type SharedBackend = Arc<dyn SpannerBackend>;

/// One method per RPC used by the SDK.
///
/// Resource names are full paths (e.g. `projects/p/instances/i`).
#[async_trait]
pub trait SpannerBackend: Send + Sync {
    /// Project the backend was configured for.
    fn project_id(&self) -> &str;

    /// Polling policy for long-running jobs.
    fn poll_settings(&self) -> PollSettings {
        PollSettings::default()
    }

    // Instance admin

    async fn list_instance_configs(
        &self,
        request: instance_proto::ListInstanceConfigsRequest,
    ) -> Result<instance_proto::ListInstanceConfigsResponse>;

    async fn get_instance_config(&self, name: &str) -> Result<instance_proto::InstanceConfig>;

    async fn list_instances(
        &self,
        request: instance_proto::ListInstancesRequest,
    ) -> Result<instance_proto::ListInstancesResponse>;

    async fn get_instance(&self, name: &str) -> Result<instance_proto::Instance>;

    async fn create_instance(
        &self,
        request: instance_proto::CreateInstanceRequest,
    ) -> Result<longrunning_proto::Operation>;

    async fn update_instance(
        &self,
        request: instance_proto::UpdateInstanceRequest,
    ) -> Result<longrunning_proto::Operation>;

    async fn delete_instance(&self, name: &str) -> Result<()>;

    async fn get_instance_iam_policy(&self, resource: &str) -> Result<iam_proto::Policy>;

    async fn set_instance_iam_policy(
        &self,
        resource: &str,
        policy: iam_proto::Policy,
    ) -> Result<iam_proto::Policy>;

    async fn test_instance_iam_permissions(
        &self,
        resource: &str,
        permissions: Vec<String>,
    ) -> Result<Vec<String>>;

    // Database admin

    async fn list_databases(
        &self,
        request: database_proto::ListDatabasesRequest,
    ) -> Result<database_proto::ListDatabasesResponse>;

    async fn get_database(&self, name: &str) -> Result<database_proto::Database>;

    async fn create_database(
        &self,
        request: database_proto::CreateDatabaseRequest,
    ) -> Result<longrunning_proto::Operation>;

    async fn update_database_ddl(
        &self,
        request: database_proto::UpdateDatabaseDdlRequest,
    ) -> Result<longrunning_proto::Operation>;

    async fn drop_database(&self, name: &str) -> Result<()>;

    async fn get_database_ddl(&self, name: &str) -> Result<Vec<String>>;

    async fn get_database_iam_policy(&self, resource: &str) -> Result<iam_proto::Policy>;

    async fn set_database_iam_policy(
        &self,
        resource: &str,
        policy: iam_proto::Policy,
    ) -> Result<iam_proto::Policy>;

    async fn test_database_iam_permissions(
        &self,
        resource: &str,
        permissions: Vec<String>,
    ) -> Result<Vec<String>>;

    // Long-running operations

    async fn get_operation(&self, name: &str) -> Result<longrunning_proto::Operation>;

    async fn cancel_operation(&self, name: &str) -> Result<()>;

    // Sessions

    async fn create_session(&self, database: &str) -> Result<spanner_proto::Session>;

    async fn get_session(&self, name: &str) -> Result<spanner_proto::Session>;

    async fn delete_session(&self, name: &str) -> Result<()>;
}
