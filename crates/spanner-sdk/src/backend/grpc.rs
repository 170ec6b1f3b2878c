// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! gRPC backend using the generated tonic clients.

use std::time::Duration;

use async_trait::async_trait;
use spanner_protocol::database_proto::database_admin_client::DatabaseAdminClient;
use spanner_protocol::instance_proto::instance_admin_client::InstanceAdminClient;
use spanner_protocol::longrunning_proto::operations_client::OperationsClient;
use spanner_protocol::spanner_proto::spanner_client::SpannerClient;
use spanner_protocol::{database_proto, iam_proto, instance_proto, longrunning_proto, spanner_proto};
use tonic::metadata::AsciiMetadataValue;
use tonic::transport::Channel;
use tracing::{debug, instrument};

use super::SpannerBackend;
use crate::config::SdkConfig;
use crate::credentials::Credentials;
use crate::error::{Result, SdkError};
use crate::paths;
use crate::retry::{PollSettings, RetrySettings, retry};

const RESOURCE_PREFIX_HEADER: &str = "google-cloud-resource-prefix";
const API_CLIENT_HEADER: &str = "x-goog-api-client";

/// Backend that talks to the service over a single shared channel.
#[derive(Debug, Clone)]
pub struct GrpcBackend {
    channel: Channel,
    credentials: Credentials,
    project_id: String,
    project_prefix: String,
    api_client: String,
    request_timeout: Duration,
    retry: RetrySettings,
    poll: PollSettings,
}

impl GrpcBackend {
    /// Resolve credentials and connect to the configured endpoint.
    #[instrument(skip(config), fields(endpoint = %config.endpoint))]
    pub async fn connect(config: &SdkConfig) -> Result<Self> {
        config.validate()?;
        let credentials = Credentials::resolve(&config.credentials, &config.scopes).await?;
        let channel = config.channel_config().connect().await?;
        Self::new(channel, credentials, config)
    }

    /// Build a backend over an existing channel.
    pub fn new(channel: Channel, credentials: Credentials, config: &SdkConfig) -> Result<Self> {
        let project_id = config
            .project_id
            .clone()
            .ok_or_else(|| SdkError::Config("project id is required".to_string()))?;

        Ok(Self {
            channel,
            credentials,
            project_prefix: paths::project_path(&project_id),
            project_id,
            api_client: config.api_client_header(),
            request_timeout: config.request_timeout,
            retry: config.retry.clone(),
            poll: config.poll.clone(),
        })
    }

    fn instance_admin(&self) -> InstanceAdminClient<Channel> {
        InstanceAdminClient::new(self.channel.clone())
    }

    fn database_admin(&self) -> DatabaseAdminClient<Channel> {
        DatabaseAdminClient::new(self.channel.clone())
    }

    fn operations(&self) -> OperationsClient<Channel> {
        OperationsClient::new(self.channel.clone())
    }

    fn spanner(&self) -> SpannerClient<Channel> {
        SpannerClient::new(self.channel.clone())
    }

    /// Wrap a message with the per-call headers and timeout.
    async fn request<M>(&self, message: M, resource_prefix: &str) -> Result<tonic::Request<M>> {
        let mut request = tonic::Request::new(message);
        request.set_timeout(self.request_timeout);

        let metadata = request.metadata_mut();
        if let Some(authorization) = self.credentials.authorization_header().await? {
            metadata.insert("authorization", header_value(&authorization)?);
        }
        metadata.insert(RESOURCE_PREFIX_HEADER, header_value(resource_prefix)?);
        metadata.insert(API_CLIENT_HEADER, header_value(&self.api_client)?);

        Ok(request)
    }

    async fn admin_request<M>(&self, message: M) -> Result<tonic::Request<M>> {
        self.request(message, &self.project_prefix).await
    }
}

fn header_value(value: &str) -> Result<AsciiMetadataValue> {
    value
        .parse()
        .map_err(|_| SdkError::InvalidInput(format!("invalid header value: {:?}", value)))
}

/// Database path a session belongs to, used as the session call prefix.
fn session_prefix(session_name: &str) -> &str {
    session_name
        .find("/sessions/")
        .map_or(session_name, |idx| &session_name[..idx])
}

#[async_trait]
impl SpannerBackend for GrpcBackend {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn poll_settings(&self) -> PollSettings {
        self.poll.clone()
    }

    #[instrument(skip(self, request), fields(parent = %request.parent))]
    async fn list_instance_configs(
        &self,
        request: instance_proto::ListInstanceConfigsRequest,
    ) -> Result<instance_proto::ListInstanceConfigsResponse> {
        let request = &request;
        retry(&self.retry, "ListInstanceConfigs", || async move {
            let request = self.admin_request(request.clone()).await?;
            let response = self.instance_admin().list_instance_configs(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_instance_config(&self, name: &str) -> Result<instance_proto::InstanceConfig> {
        retry(&self.retry, "GetInstanceConfig", || async move {
            let request = self
                .admin_request(instance_proto::GetInstanceConfigRequest {
                    name: name.to_string(),
                })
                .await?;
            let response = self.instance_admin().get_instance_config(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self, request), fields(parent = %request.parent))]
    async fn list_instances(
        &self,
        request: instance_proto::ListInstancesRequest,
    ) -> Result<instance_proto::ListInstancesResponse> {
        let request = &request;
        retry(&self.retry, "ListInstances", || async move {
            let request = self.admin_request(request.clone()).await?;
            let response = self.instance_admin().list_instances(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_instance(&self, name: &str) -> Result<instance_proto::Instance> {
        retry(&self.retry, "GetInstance", || async move {
            let request = self
                .admin_request(instance_proto::GetInstanceRequest {
                    name: name.to_string(),
                })
                .await?;
            let response = self.instance_admin().get_instance(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self, request), fields(instance_id = %request.instance_id))]
    async fn create_instance(
        &self,
        request: instance_proto::CreateInstanceRequest,
    ) -> Result<longrunning_proto::Operation> {
        let request = self.admin_request(request).await?;
        let operation = self.instance_admin().create_instance(request).await?.into_inner();
        debug!(operation = %operation.name, "create instance started");
        Ok(operation)
    }

    #[instrument(skip(self, request))]
    async fn update_instance(
        &self,
        request: instance_proto::UpdateInstanceRequest,
    ) -> Result<longrunning_proto::Operation> {
        let request = self.admin_request(request).await?;
        let operation = self.instance_admin().update_instance(request).await?.into_inner();
        debug!(operation = %operation.name, "update instance started");
        Ok(operation)
    }

    #[instrument(skip(self))]
    async fn delete_instance(&self, name: &str) -> Result<()> {
        let request = self
            .admin_request(instance_proto::DeleteInstanceRequest {
                name: name.to_string(),
            })
            .await?;
        self.instance_admin().delete_instance(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_instance_iam_policy(&self, resource: &str) -> Result<iam_proto::Policy> {
        retry(&self.retry, "GetIamPolicy", || async move {
            let request = self
                .admin_request(iam_proto::GetIamPolicyRequest {
                    resource: resource.to_string(),
                })
                .await?;
            let response = self.instance_admin().get_iam_policy(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self, policy))]
    async fn set_instance_iam_policy(
        &self,
        resource: &str,
        policy: iam_proto::Policy,
    ) -> Result<iam_proto::Policy> {
        let request = self
            .admin_request(iam_proto::SetIamPolicyRequest {
                resource: resource.to_string(),
                policy: Some(policy),
            })
            .await?;
        Ok(self.instance_admin().set_iam_policy(request).await?.into_inner())
    }

    #[instrument(skip(self, permissions))]
    async fn test_instance_iam_permissions(
        &self,
        resource: &str,
        permissions: Vec<String>,
    ) -> Result<Vec<String>> {
        let permissions = &permissions;
        retry(&self.retry, "TestIamPermissions", || async move {
            let request = self
                .admin_request(iam_proto::TestIamPermissionsRequest {
                    resource: resource.to_string(),
                    permissions: permissions.clone(),
                })
                .await?;
            let response = self.instance_admin().test_iam_permissions(request).await?;
            Ok(response.into_inner().permissions)
        })
        .await
    }

    #[instrument(skip(self, request), fields(parent = %request.parent))]
    async fn list_databases(
        &self,
        request: database_proto::ListDatabasesRequest,
    ) -> Result<database_proto::ListDatabasesResponse> {
        let request = &request;
        retry(&self.retry, "ListDatabases", || async move {
            let request = self.admin_request(request.clone()).await?;
            let response = self.database_admin().list_databases(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_database(&self, name: &str) -> Result<database_proto::Database> {
        retry(&self.retry, "GetDatabase", || async move {
            let request = self
                .admin_request(database_proto::GetDatabaseRequest {
                    name: name.to_string(),
                })
                .await?;
            let response = self.database_admin().get_database(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self, request), fields(parent = %request.parent))]
    async fn create_database(
        &self,
        request: database_proto::CreateDatabaseRequest,
    ) -> Result<longrunning_proto::Operation> {
        let request = self.admin_request(request).await?;
        let operation = self.database_admin().create_database(request).await?.into_inner();
        debug!(operation = %operation.name, "create database started");
        Ok(operation)
    }

    #[instrument(skip(self, request), fields(database = %request.database))]
    async fn update_database_ddl(
        &self,
        request: database_proto::UpdateDatabaseDdlRequest,
    ) -> Result<longrunning_proto::Operation> {
        let request = self.admin_request(request).await?;
        let operation = self
            .database_admin()
            .update_database_ddl(request)
            .await?
            .into_inner();
        debug!(operation = %operation.name, "ddl update started");
        Ok(operation)
    }

    #[instrument(skip(self))]
    async fn drop_database(&self, name: &str) -> Result<()> {
        let request = self
            .admin_request(database_proto::DropDatabaseRequest {
                database: name.to_string(),
            })
            .await?;
        self.database_admin().drop_database(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_database_ddl(&self, name: &str) -> Result<Vec<String>> {
        retry(&self.retry, "GetDatabaseDdl", || async move {
            let request = self
                .admin_request(database_proto::GetDatabaseDdlRequest {
                    database: name.to_string(),
                })
                .await?;
            let response = self.database_admin().get_database_ddl(request).await?;
            Ok(response.into_inner().statements)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_database_iam_policy(&self, resource: &str) -> Result<iam_proto::Policy> {
        retry(&self.retry, "GetIamPolicy", || async move {
            let request = self
                .admin_request(iam_proto::GetIamPolicyRequest {
                    resource: resource.to_string(),
                })
                .await?;
            let response = self.database_admin().get_iam_policy(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self, policy))]
    async fn set_database_iam_policy(
        &self,
        resource: &str,
        policy: iam_proto::Policy,
    ) -> Result<iam_proto::Policy> {
        let request = self
            .admin_request(iam_proto::SetIamPolicyRequest {
                resource: resource.to_string(),
                policy: Some(policy),
            })
            .await?;
        Ok(self.database_admin().set_iam_policy(request).await?.into_inner())
    }

    #[instrument(skip(self, permissions))]
    async fn test_database_iam_permissions(
        &self,
        resource: &str,
        permissions: Vec<String>,
    ) -> Result<Vec<String>> {
        let permissions = &permissions;
        retry(&self.retry, "TestIamPermissions", || async move {
            let request = self
                .admin_request(iam_proto::TestIamPermissionsRequest {
                    resource: resource.to_string(),
                    permissions: permissions.clone(),
                })
                .await?;
            let response = self.database_admin().test_iam_permissions(request).await?;
            Ok(response.into_inner().permissions)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_operation(&self, name: &str) -> Result<longrunning_proto::Operation> {
        retry(&self.retry, "GetOperation", || async move {
            let request = self
                .admin_request(longrunning_proto::GetOperationRequest {
                    name: name.to_string(),
                })
                .await?;
            let response = self.operations().get_operation(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn cancel_operation(&self, name: &str) -> Result<()> {
        let request = self
            .admin_request(longrunning_proto::CancelOperationRequest {
                name: name.to_string(),
            })
            .await?;
        self.operations().cancel_operation(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_session(&self, database: &str) -> Result<spanner_proto::Session> {
        let request = self
            .request(
                spanner_proto::CreateSessionRequest {
                    database: database.to_string(),
                    session: None,
                },
                database,
            )
            .await?;
        let session = self.spanner().create_session(request).await?.into_inner();
        debug!(session = %session.name, "session created");
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn get_session(&self, name: &str) -> Result<spanner_proto::Session> {
        retry(&self.retry, "GetSession", || async move {
            let request = self
                .request(
                    spanner_proto::GetSessionRequest {
                        name: name.to_string(),
                    },
                    session_prefix(name),
                )
                .await?;
            let response = self.spanner().get_session(request).await?;
            Ok(response.into_inner())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, name: &str) -> Result<()> {
        let request = self
            .request(
                spanner_proto::DeleteSessionRequest {
                    name: name.to_string(),
                },
                session_prefix(name),
            )
            .await?;
        self.spanner().delete_session(request).await?;
        Ok(())
    }
}
