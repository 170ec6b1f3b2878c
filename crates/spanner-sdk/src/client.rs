// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Spanner client: the entry point for a project.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::backend::{GrpcBackend, SharedBackend};
use crate::config::SdkConfig;
use crate::database::{self, Database};
use crate::error::{Result, SdkError};
use crate::instance::{self, CreateInstanceOptions, Instance};
use crate::instance_config::InstanceConfig;
use crate::job::{FromOperation, Job};
use crate::list::List;
use crate::paths;
use crate::session::Session;

/// Client for the instances, databases and sessions of one project.
///
/// Cloning is cheap; clones share the underlying channel.
#[derive(Clone)]
pub struct Spanner {
    backend: SharedBackend,
    default_instance_id: Option<String>,
}

impl Spanner {
    /// Validate `config`, resolve credentials and connect.
    #[instrument(skip(config), fields(project = config.project_id.as_deref().unwrap_or_default()))]
    pub async fn connect(config: SdkConfig) -> Result<Self> {
        let backend = GrpcBackend::connect(&config).await?;
        info!(endpoint = %config.endpoint, "spanner client ready");
        Ok(Self {
            backend: Arc::new(backend),
            default_instance_id: config.default_instance_id,
        })
    }

    /// Connect using [`SdkConfig::from_env`].
    pub async fn from_env() -> Result<Self> {
        Self::connect(SdkConfig::from_env()?).await
    }

    /// Use a custom backend.
    pub fn with_backend(backend: SharedBackend) -> Self {
        Self {
            backend,
            default_instance_id: None,
        }
    }

    /// Set the instance returned by [`Spanner::default_instance`].
    pub fn with_default_instance(mut self, instance_id: impl Into<String>) -> Self {
        self.default_instance_id = Some(instance_id.into());
        self
    }

    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    pub fn project_id(&self) -> &str {
        self.backend.project_id()
    }

    // =========================================================================
    // Instances
    // =========================================================================

    /// List the project's instances, one page at a time.
    pub async fn instances(&self, token: Option<String>, max: Option<u32>) -> Result<List<Instance>> {
        List::fetch(self.backend.clone(), (), token, max).await
    }

    /// Get an instance, `None` if it does not exist.
    #[instrument(skip(self))]
    pub async fn instance(&self, instance_id: &str) -> Result<Option<Instance>> {
        let path = paths::instance_path(self.project_id(), instance_id);
        match self.backend.get_instance(&path).await {
            Ok(grpc) => Ok(Some(Instance::from_proto(grpc, self.backend.clone()))),
            Err(err) if err.is_not_found() => {
                debug!("instance not found");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Get the configured default instance.
    pub async fn default_instance(&self) -> Result<Option<Instance>> {
        let instance_id = self.default_instance_id.as_deref().ok_or_else(|| {
            SdkError::Config("no default instance configured (set SPANNER_INSTANCE)".to_string())
        })?;
        self.instance(instance_id).await
    }

    /// Start creating an instance.
    #[instrument(skip(self, options))]
    pub async fn create_instance(
        &self,
        instance_id: &str,
        options: CreateInstanceOptions,
    ) -> Result<Job<Instance>> {
        let request = instance::create_request(self.project_id(), instance_id, options)?;
        let operation = self.backend.create_instance(request).await?;
        info!(operation = %operation.name, "creating instance");
        Ok(Job::from_proto(operation, self.backend.clone()))
    }

    // =========================================================================
    // Instance configs
    // =========================================================================

    pub async fn instance_configs(
        &self,
        token: Option<String>,
        max: Option<u32>,
    ) -> Result<List<InstanceConfig>> {
        List::fetch(self.backend.clone(), (), token, max).await
    }

    /// Get an instance config by id or full path, `None` if it does not exist.
    #[instrument(skip(self))]
    pub async fn instance_config(&self, instance_config: &str) -> Result<Option<InstanceConfig>> {
        let path = paths::instance_config_path_or_id(self.project_id(), instance_config);
        match self.backend.get_instance_config(&path).await {
            Ok(grpc) => Ok(Some(InstanceConfig::from_proto(grpc))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    // =========================================================================
    // Databases
    // =========================================================================

    pub async fn databases(
        &self,
        instance_id: &str,
        token: Option<String>,
        max: Option<u32>,
    ) -> Result<List<Database>> {
        List::fetch(self.backend.clone(), instance_id.to_string(), token, max).await
    }

    /// Get a database, `None` if it does not exist.
    #[instrument(skip(self))]
    pub async fn database(&self, instance_id: &str, database_id: &str) -> Result<Option<Database>> {
        let path = paths::database_path(self.project_id(), instance_id, database_id);
        match self.backend.get_database(&path).await {
            Ok(grpc) => Ok(Some(Database::from_proto(grpc, self.backend.clone()))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Start creating a database. `statements` are applied once it exists.
    #[instrument(skip(self, statements))]
    pub async fn create_database(
        &self,
        instance_id: &str,
        database_id: &str,
        statements: Vec<String>,
    ) -> Result<Job<Database>> {
        database::create(
            &self.backend,
            self.project_id(),
            instance_id,
            database_id,
            statements,
        )
        .await
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Create a new session, or get `session_id` if given.
    ///
    /// Returns `None` when the requested session does not exist.
    #[instrument(skip(self))]
    pub async fn session(
        &self,
        instance_id: &str,
        database_id: &str,
        session_id: Option<&str>,
    ) -> Result<Option<Session>> {
        let grpc = match session_id {
            None => {
                let database = paths::database_path(self.project_id(), instance_id, database_id);
                self.backend.create_session(&database).await?
            }
            Some(session_id) => {
                let path =
                    paths::session_path(self.project_id(), instance_id, database_id, session_id);
                match self.backend.get_session(&path).await {
                    Ok(grpc) => grpc,
                    Err(err) if err.is_not_found() => return Ok(None),
                    Err(err) => return Err(err),
                }
            }
        };
        Ok(Some(Session::from_proto(grpc, self.backend.clone())))
    }

    // =========================================================================
    // Jobs
    // =========================================================================

    /// Resume a job from its operation name.
    #[instrument(skip(self))]
    pub async fn job<T: FromOperation>(&self, operation_name: &str) -> Result<Job<T>> {
        let operation = self.backend.get_operation(operation_name).await?;
        Ok(Job::from_proto(operation, self.backend.clone()))
    }
}

impl std::fmt::Debug for Spanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spanner")
            .field("project_id", &self.project_id())
            .finish()
    }
}
