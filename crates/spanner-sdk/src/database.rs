// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Spanner databases.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use spanner_protocol::database_proto::{self, database};
use spanner_protocol::prost_types::Any;
use tracing::{info, instrument};

use crate::backend::SharedBackend;
use crate::error::{Result, SdkError};
use crate::job::{self, FromOperation, Job};
use crate::list::{Page, Paged, page_size};
use crate::paths;
use crate::policy::Policy;
use crate::session::Session;
use crate::validate;

/// Lifecycle state of a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatabaseState {
    Unspecified,
    Creating,
    Ready,
}

impl From<database::State> for DatabaseState {
    fn from(state: database::State) -> Self {
        match state {
            database::State::Unspecified => DatabaseState::Unspecified,
            database::State::Creating => DatabaseState::Creating,
            database::State::Ready => DatabaseState::Ready,
        }
    }
}

/// Statement that creates `database_id`.
pub fn create_statement(database_id: &str) -> String {
    format!("CREATE DATABASE `{}`", database_id)
}

/// Start creating a database; `statements` run after the database exists.
pub(crate) async fn create(
    backend: &SharedBackend,
    project_id: &str,
    instance_id: &str,
    database_id: &str,
    statements: Vec<String>,
) -> Result<Job<Database>> {
    validate::database_id(database_id)?;

    let operation = backend
        .create_database(database_proto::CreateDatabaseRequest {
            parent: paths::instance_path(project_id, instance_id),
            create_statement: create_statement(database_id),
            extra_statements: statements,
        })
        .await?;
    Ok(Job::from_proto(operation, backend.clone()))
}

/// A database within an instance.
#[derive(Clone)]
pub struct Database {
    grpc: database_proto::Database,
    backend: SharedBackend,
    ddl: Option<Vec<String>>,
    policy: Option<Policy>,
}

impl Database {
    pub fn from_proto(grpc: database_proto::Database, backend: SharedBackend) -> Self {
        Self {
            grpc,
            backend,
            ddl: None,
            policy: None,
        }
    }

    pub fn grpc(&self) -> &database_proto::Database {
        &self.grpc
    }

    pub fn project_id(&self) -> &str {
        paths::match_project_from_database_name(&self.grpc.name).unwrap_or_default()
    }

    pub fn instance_id(&self) -> &str {
        paths::match_instance_from_database_name(&self.grpc.name).unwrap_or_default()
    }

    pub fn database_id(&self) -> &str {
        paths::match_database_from_database_name(&self.grpc.name).unwrap_or_default()
    }

    /// Full resource name.
    pub fn path(&self) -> &str {
        &self.grpc.name
    }

    pub fn state(&self) -> DatabaseState {
        self.grpc.state().into()
    }

    pub fn is_creating(&self) -> bool {
        self.state() == DatabaseState::Creating
    }

    pub fn is_ready(&self) -> bool {
        self.state() == DatabaseState::Ready
    }

    /// The schema as DDL statements, fetched once unless `force`.
    pub async fn ddl(&mut self, force: bool) -> Result<&[String]> {
        if force || self.ddl.is_none() {
            let statements = self.backend.get_database_ddl(&self.grpc.name).await?;
            self.ddl = Some(statements);
        }
        Ok(self.ddl.as_deref().unwrap_or_default())
    }

    /// Apply schema changes. `operation_id` lets a retried call be
    /// recognised as the same change.
    #[instrument(skip(self, statements), fields(database = %self.grpc.name))]
    pub async fn update(
        &mut self,
        statements: Vec<String>,
        operation_id: Option<String>,
    ) -> Result<Job<()>> {
        if statements.is_empty() {
            return Err(SdkError::InvalidInput("no DDL statements given".to_string()));
        }
        let operation = self
            .backend
            .update_database_ddl(database_proto::UpdateDatabaseDdlRequest {
                database: self.grpc.name.clone(),
                statements,
                operation_id: operation_id.unwrap_or_default(),
            })
            .await?;
        self.ddl = None;
        Ok(Job::from_proto(operation, self.backend.clone()))
    }

    /// Permanently delete the database.
    #[instrument(skip(self), fields(database = %self.grpc.name))]
    pub async fn drop(&self) -> Result<()> {
        self.backend.drop_database(&self.grpc.name).await?;
        info!("database dropped");
        Ok(())
    }

    pub async fn reload(&mut self) -> Result<&mut Self> {
        self.grpc = self.backend.get_database(&self.grpc.name).await?;
        Ok(self)
    }

    /// Create a new session on this database.
    pub async fn session(&self) -> Result<Session> {
        let grpc = self.backend.create_session(&self.grpc.name).await?;
        Ok(Session::from_proto(grpc, self.backend.clone()))
    }

    /// The database's IAM policy, fetched once and then cached unless `force`.
    pub async fn policy(&mut self, force: bool) -> Result<&Policy> {
        if force || self.policy.is_none() {
            let grpc = self.backend.get_database_iam_policy(&self.grpc.name).await?;
            self.policy = Some(Policy::from_proto(grpc));
        }
        self.policy
            .as_ref()
            .ok_or_else(|| SdkError::UnexpectedResponse("policy not loaded".to_string()))
    }

    #[instrument(skip(self, policy), fields(database = %self.grpc.name))]
    pub async fn set_policy(&mut self, policy: &Policy) -> Result<&Policy> {
        let grpc = self
            .backend
            .set_database_iam_policy(&self.grpc.name, policy.to_proto())
            .await?;
        Ok(self.policy.insert(Policy::from_proto(grpc)))
    }

    pub async fn update_policy<F>(&mut self, update: F) -> Result<&Policy>
    where
        F: FnOnce(&mut Policy),
    {
        let mut policy = self.policy(true).await?.clone();
        update(&mut policy);
        self.set_policy(&policy).await
    }

    pub async fn test_permissions<I, S>(&self, permissions: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let permissions = permissions.into_iter().map(Into::into).collect();
        self.backend
            .test_database_iam_permissions(&self.grpc.name, permissions)
            .await
    }
}

impl FromOperation for Database {
    fn from_response(backend: &SharedBackend, response: Option<&Any>) -> Result<Self> {
        let any = response.ok_or_else(|| {
            SdkError::UnexpectedResponse("database operation finished without a response".into())
        })?;
        let grpc = job::unpack(any, job::DATABASE_TYPE)?;
        Ok(Database::from_proto(grpc, backend.clone()))
    }
}

#[async_trait]
impl Paged for Database {
    /// Instance id.
    type Scope = String;

    async fn fetch_page(
        backend: &SharedBackend,
        instance_id: &String,
        token: Option<&str>,
        max: Option<u32>,
    ) -> Result<Page<Self>> {
        let response = backend
            .list_databases(database_proto::ListDatabasesRequest {
                parent: paths::instance_path(backend.project_id(), instance_id),
                page_size: page_size(max),
                page_token: token.unwrap_or_default().to_string(),
            })
            .await?;
        let databases = response
            .databases
            .into_iter()
            .map(|grpc| Database::from_proto(grpc, backend.clone()))
            .collect();
        Ok(Page::new(databases, response.next_page_token))
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.grpc.name)
            .field("state", &self.state())
            .finish()
    }
}

impl Serialize for Database {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Database", 4)?;
        state.serialize_field("path", self.path())?;
        state.serialize_field("instance_id", self.instance_id())?;
        state.serialize_field("database_id", self.database_id())?;
        state.serialize_field("state", &self.state())?;
        state.end()
    }
}
