// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Common test infrastructure for spanner-sdk integration tests.
//!
//! Provides an in-memory [`FakeBackend`] that stores instances, databases,
//! policies and sessions, pages list results with index tokens, and
//! finishes operations after a configurable number of polls.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use prost::Message;
use spanner_sdk::protocol::longrunning_proto::{Operation, operation};
use spanner_sdk::protocol::prost_types::{Any, Timestamp};
use spanner_sdk::protocol::{
    database_proto, iam_proto, instance_proto, longrunning_proto, rpc_proto, spanner_proto,
};
use spanner_sdk::{PollSettings, Result, SdkError, SharedBackend, Spanner, SpannerBackend, type_url};

pub const PROJECT: &str = "test";

/// What happens to stored resources when an operation finishes.
#[derive(Debug, Clone)]
enum Effect {
    InstanceReady(String),
    DatabaseReady(String),
    ApplyDdl(String, Vec<String>),
}

#[derive(Debug, Clone)]
struct PendingOperation {
    running: Operation,
    finished: Operation,
    polls_left: u32,
    effect: Option<Effect>,
}

#[derive(Default)]
struct State {
    instance_configs: Vec<instance_proto::InstanceConfig>,
    instances: BTreeMap<String, instance_proto::Instance>,
    databases: BTreeMap<String, database_proto::Database>,
    ddl: HashMap<String, Vec<String>>,
    policies: HashMap<String, iam_proto::Policy>,
    sessions: HashMap<String, spanner_proto::Session>,
    operations: HashMap<String, PendingOperation>,
    granted_permissions: Vec<String>,
    failures: HashMap<String, VecDeque<tonic::Code>>,
    calls: Vec<String>,
    update_requests: Vec<instance_proto::UpdateInstanceRequest>,
    create_database_requests: Vec<database_proto::CreateDatabaseRequest>,
    ddl_requests: Vec<database_proto::UpdateDatabaseDdlRequest>,
    set_policies: Vec<iam_proto::Policy>,
    polls_until_done: u32,
    poll: Option<PollSettings>,
    next_id: u64,
}

/// In-memory implementation of the service.
pub struct FakeBackend {
    project_id: String,
    state: Mutex<State>,
}

pub fn pack<M: Message>(full_name: &str, message: &M) -> Any {
    Any {
        type_url: type_url(full_name),
        value: message.encode_to_vec(),
    }
}

pub fn instance_path(instance_id: &str) -> String {
    format!("projects/{}/instances/{}", PROJECT, instance_id)
}

pub fn database_path(instance_id: &str, database_id: &str) -> String {
    format!("{}/databases/{}", instance_path(instance_id), database_id)
}

pub fn config_path(config_id: &str) -> String {
    format!("projects/{}/instanceConfigs/{}", PROJECT, config_id)
}

pub fn instance_fixture(instance_id: &str) -> instance_proto::Instance {
    instance_proto::Instance {
        name: instance_path(instance_id),
        config: config_path("regional-us-central1"),
        display_name: format!("{} display", instance_id),
        node_count: 1,
        state: instance_proto::instance::State::Ready as i32,
        labels: [("env".to_string(), "production".to_string())].into(),
    }
}

pub fn database_fixture(instance_id: &str, database_id: &str) -> database_proto::Database {
    database_proto::Database {
        name: database_path(instance_id, database_id),
        state: database_proto::database::State::Ready as i32,
    }
}

pub fn viewer_policy() -> iam_proto::Policy {
    iam_proto::Policy {
        version: 0,
        etag: vec![0x08, 0x01],
        bindings: vec![iam_proto::Binding {
            role: "roles/viewer".to_string(),
            members: vec![
                "user:viewer@example.com".to_string(),
                "serviceAccount:1234567890@developer.gserviceaccount.com".to_string(),
            ],
        }],
    }
}

pub fn owner_policy() -> iam_proto::Policy {
    iam_proto::Policy {
        version: 0,
        etag: vec![0x08, 0x01],
        bindings: vec![iam_proto::Binding {
            role: "roles/owner".to_string(),
            members: vec![
                "user:owner@example.com".to_string(),
                "serviceAccount:0987654321@developer.gserviceaccount.com".to_string(),
            ],
        }],
    }
}

fn not_found(what: &str, name: &str) -> SdkError {
    SdkError::from(tonic::Status::not_found(format!("{} not found: {}", what, name)))
}

fn paginate<T: Clone>(items: &[T], token: &str, page_size: i32) -> Result<(Vec<T>, String)> {
    let start: usize = if token.is_empty() {
        0
    } else {
        token
            .parse()
            .map_err(|_| SdkError::from(tonic::Status::invalid_argument("bad page token")))?
    };
    let size = if page_size > 0 {
        page_size as usize
    } else {
        items.len().max(1)
    };
    let end = (start + size).min(items.len());
    let page = items.get(start..end).unwrap_or_default().to_vec();
    let next = if end < items.len() {
        end.to_string()
    } else {
        String::new()
    };
    Ok((page, next))
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            project_id: PROJECT.to_string(),
            state: Mutex::new(State::default()),
        }
    }

    /// A client over a fresh fake backend.
    pub fn client() -> (Spanner, Arc<FakeBackend>) {
        let fake = Arc::new(Self::new());
        let backend: SharedBackend = fake.clone();
        (Spanner::with_backend(backend), fake)
    }

    pub fn shared(self: &Arc<Self>) -> SharedBackend {
        self.clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Record the call and fail it if a failure was queued for `method`.
    fn enter(&self, method: &str, arg: &str) -> Result<()> {
        let mut state = self.state();
        state.calls.push(format!("{} {}", method, arg));
        if let Some(code) = state.failures.get_mut(method).and_then(VecDeque::pop_front) {
            return Err(SdkError::from(tonic::Status::new(code, "injected failure")));
        }
        Ok(())
    }

    pub fn add_instance_config(&self, config_id: &str, display_name: &str) {
        self.state().instance_configs.push(instance_proto::InstanceConfig {
            name: config_path(config_id),
            display_name: display_name.to_string(),
        });
    }

    pub fn add_instance(&self, instance: instance_proto::Instance) {
        self.state().instances.insert(instance.name.clone(), instance);
    }

    pub fn add_database(&self, database: database_proto::Database, ddl: Vec<String>) {
        let mut state = self.state();
        state.ddl.insert(database.name.clone(), ddl);
        state.databases.insert(database.name.clone(), database);
    }

    pub fn set_policy(&self, resource: &str, policy: iam_proto::Policy) {
        self.state().policies.insert(resource.to_string(), policy);
    }

    pub fn grant_permissions(&self, permissions: &[&str]) {
        self.state().granted_permissions = permissions.iter().map(|p| p.to_string()).collect();
    }

    /// Operations report done after this many `get_operation` calls.
    pub fn set_polls_until_done(&self, polls: u32) {
        self.state().polls_until_done = polls;
    }

    /// Override the polling policy handed to jobs.
    pub fn set_poll_settings(&self, poll: PollSettings) {
        self.state().poll = Some(poll);
    }

    /// Fail the next call to `method` with `code`.
    pub fn fail_next(&self, method: &str, code: tonic::Code) {
        self.state()
            .failures
            .entry(method.to_string())
            .or_default()
            .push_back(code);
    }

    /// Register an operation that finishes with an error.
    pub fn add_failed_operation(&self, name: &str, code: i32, message: &str) {
        let finished = Operation {
            name: name.to_string(),
            metadata: None,
            done: true,
            result: Some(operation::Result::Error(rpc_proto::Status {
                code,
                message: message.to_string(),
                details: vec![],
            })),
        };
        self.state().operations.insert(
            name.to_string(),
            PendingOperation {
                running: finished.clone(),
                finished,
                polls_left: 0,
                effect: None,
            },
        );
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.split(' ').next() == Some(method))
            .count()
    }

    pub fn update_requests(&self) -> Vec<instance_proto::UpdateInstanceRequest> {
        self.state().update_requests.clone()
    }

    pub fn create_database_requests(&self) -> Vec<database_proto::CreateDatabaseRequest> {
        self.state().create_database_requests.clone()
    }

    pub fn ddl_requests(&self) -> Vec<database_proto::UpdateDatabaseDdlRequest> {
        self.state().ddl_requests.clone()
    }

    pub fn set_policies(&self) -> Vec<iam_proto::Policy> {
        self.state().set_policies.clone()
    }

    pub fn stored_instance(&self, instance_id: &str) -> Option<instance_proto::Instance> {
        self.state().instances.get(&instance_path(instance_id)).cloned()
    }

    pub fn stored_database(&self, instance_id: &str, database_id: &str) -> Option<database_proto::Database> {
        self.state()
            .databases
            .get(&database_path(instance_id, database_id))
            .cloned()
    }

    pub fn session_count(&self) -> usize {
        self.state().sessions.len()
    }

    fn start_operation(
        &self,
        state: &mut State,
        parent: &str,
        metadata: Any,
        response: Option<Any>,
        effect: Effect,
    ) -> Operation {
        state.next_id += 1;
        let name = format!("{}/operations/{}", parent, state.next_id);
        let running = Operation {
            name: name.clone(),
            metadata: Some(metadata.clone()),
            done: false,
            result: None,
        };
        let finished = Operation {
            name: name.clone(),
            metadata: Some(metadata),
            done: true,
            result: Some(operation::Result::Response(response.unwrap_or(Any {
                type_url: type_url("google.protobuf.Empty"),
                value: vec![],
            }))),
        };

        let pending = PendingOperation {
            running,
            finished,
            polls_left: state.polls_until_done,
            effect: Some(effect),
        };
        if pending.polls_left == 0 {
            apply(state, pending.effect.clone());
        }
        let current = if pending.polls_left == 0 {
            pending.finished.clone()
        } else {
            pending.running.clone()
        };
        state.operations.insert(name, pending);
        current
    }
}

fn apply(state: &mut State, effect: Option<Effect>) {
    match effect {
        Some(Effect::InstanceReady(name)) => {
            if let Some(instance) = state.instances.get_mut(&name) {
                instance.state = instance_proto::instance::State::Ready as i32;
            }
        }
        Some(Effect::DatabaseReady(name)) => {
            if let Some(database) = state.databases.get_mut(&name) {
                database.state = database_proto::database::State::Ready as i32;
            }
        }
        Some(Effect::ApplyDdl(name, statements)) => {
            state.ddl.entry(name).or_default().extend(statements);
        }
        None => {}
    }
}

fn now() -> Timestamp {
    Timestamp {
        seconds: 1_700_000_000,
        nanos: 0,
    }
}

#[async_trait]
impl SpannerBackend for FakeBackend {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn poll_settings(&self) -> PollSettings {
        self.state().poll.clone().unwrap_or(PollSettings {
            initial_delay: Duration::from_millis(10),
            multiplier: 1.0,
            max_delay: Duration::from_millis(10),
            total_timeout: Duration::from_secs(5),
        })
    }

    async fn list_instance_configs(
        &self,
        request: instance_proto::ListInstanceConfigsRequest,
    ) -> Result<instance_proto::ListInstanceConfigsResponse> {
        self.enter("list_instance_configs", &request.page_token)?;
        let state = self.state();
        let (instance_configs, next_page_token) =
            paginate(&state.instance_configs, &request.page_token, request.page_size)?;
        Ok(instance_proto::ListInstanceConfigsResponse {
            instance_configs,
            next_page_token,
        })
    }

    async fn get_instance_config(&self, name: &str) -> Result<instance_proto::InstanceConfig> {
        self.enter("get_instance_config", name)?;
        self.state()
            .instance_configs
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| not_found("instance config", name))
    }

    async fn list_instances(
        &self,
        request: instance_proto::ListInstancesRequest,
    ) -> Result<instance_proto::ListInstancesResponse> {
        self.enter("list_instances", &request.page_token)?;
        let state = self.state();
        let all: Vec<_> = state.instances.values().cloned().collect();
        let (instances, next_page_token) = paginate(&all, &request.page_token, request.page_size)?;
        Ok(instance_proto::ListInstancesResponse {
            instances,
            next_page_token,
        })
    }

    async fn get_instance(&self, name: &str) -> Result<instance_proto::Instance> {
        self.enter("get_instance", name)?;
        self.state()
            .instances
            .get(name)
            .cloned()
            .ok_or_else(|| not_found("instance", name))
    }

    async fn create_instance(
        &self,
        request: instance_proto::CreateInstanceRequest,
    ) -> Result<longrunning_proto::Operation> {
        self.enter("create_instance", &request.instance_id)?;
        let mut state = self.state();
        let mut instance = request
            .instance
            .ok_or_else(|| SdkError::from(tonic::Status::invalid_argument("instance required")))?;
        if state.instances.contains_key(&instance.name) {
            return Err(SdkError::from(tonic::Status::already_exists(instance.name)));
        }

        instance.state = instance_proto::instance::State::Creating as i32;
        state.instances.insert(instance.name.clone(), instance.clone());

        let metadata = instance_proto::CreateInstanceMetadata {
            instance: Some(instance.clone()),
            start_time: Some(now()),
            cancel_time: None,
            end_time: None,
        };
        let mut ready = instance.clone();
        ready.state = instance_proto::instance::State::Ready as i32;

        Ok(self.start_operation(
            &mut state,
            &instance.name,
            pack("google.spanner.admin.instance.v1.CreateInstanceMetadata", &metadata),
            Some(pack("google.spanner.admin.instance.v1.Instance", &ready)),
            Effect::InstanceReady(instance.name.clone()),
        ))
    }

    async fn update_instance(
        &self,
        request: instance_proto::UpdateInstanceRequest,
    ) -> Result<longrunning_proto::Operation> {
        let update = request
            .instance
            .clone()
            .ok_or_else(|| SdkError::from(tonic::Status::invalid_argument("instance required")))?;
        self.enter("update_instance", &update.name)?;
        let mut state = self.state();
        state.update_requests.push(request);

        let stored = state
            .instances
            .get_mut(&update.name)
            .ok_or_else(|| not_found("instance", &update.name))?;
        stored.display_name = update.display_name.clone();
        stored.node_count = update.node_count;
        stored.labels = update.labels.clone();
        let updated = stored.clone();

        let metadata = instance_proto::UpdateInstanceMetadata {
            instance: Some(updated.clone()),
            start_time: Some(now()),
            cancel_time: None,
            end_time: None,
        };
        Ok(self.start_operation(
            &mut state,
            &updated.name,
            pack("google.spanner.admin.instance.v1.UpdateInstanceMetadata", &metadata),
            Some(pack("google.spanner.admin.instance.v1.Instance", &updated)),
            Effect::InstanceReady(updated.name.clone()),
        ))
    }

    async fn delete_instance(&self, name: &str) -> Result<()> {
        self.enter("delete_instance", name)?;
        let mut state = self.state();
        state
            .instances
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| not_found("instance", name))?;
        let prefix = format!("{}/", name);
        state.databases.retain(|db, _| !db.starts_with(&prefix));
        Ok(())
    }

    async fn get_instance_iam_policy(&self, resource: &str) -> Result<iam_proto::Policy> {
        self.enter("get_instance_iam_policy", resource)?;
        Ok(self.state().policies.get(resource).cloned().unwrap_or_default())
    }

    async fn set_instance_iam_policy(
        &self,
        resource: &str,
        policy: iam_proto::Policy,
    ) -> Result<iam_proto::Policy> {
        self.enter("set_instance_iam_policy", resource)?;
        let mut state = self.state();
        state.set_policies.push(policy.clone());
        state.policies.insert(resource.to_string(), policy.clone());
        Ok(policy)
    }

    async fn test_instance_iam_permissions(
        &self,
        resource: &str,
        permissions: Vec<String>,
    ) -> Result<Vec<String>> {
        self.enter("test_instance_iam_permissions", resource)?;
        let state = self.state();
        Ok(permissions
            .into_iter()
            .filter(|p| state.granted_permissions.contains(p))
            .collect())
    }

    async fn list_databases(
        &self,
        request: database_proto::ListDatabasesRequest,
    ) -> Result<database_proto::ListDatabasesResponse> {
        self.enter("list_databases", &request.parent)?;
        let state = self.state();
        let prefix = format!("{}/databases/", request.parent);
        let all: Vec<_> = state
            .databases
            .values()
            .filter(|db| db.name.starts_with(&prefix))
            .cloned()
            .collect();
        let (databases, next_page_token) = paginate(&all, &request.page_token, request.page_size)?;
        Ok(database_proto::ListDatabasesResponse {
            databases,
            next_page_token,
        })
    }

    async fn get_database(&self, name: &str) -> Result<database_proto::Database> {
        self.enter("get_database", name)?;
        self.state()
            .databases
            .get(name)
            .cloned()
            .ok_or_else(|| not_found("database", name))
    }

    async fn create_database(
        &self,
        request: database_proto::CreateDatabaseRequest,
    ) -> Result<longrunning_proto::Operation> {
        self.enter("create_database", &request.parent)?;
        let mut state = self.state();
        state.create_database_requests.push(request.clone());

        if !state.instances.contains_key(&request.parent) {
            return Err(not_found("instance", &request.parent));
        }
        let database_id = request
            .create_statement
            .trim_start_matches("CREATE DATABASE `")
            .trim_end_matches('`')
            .to_string();
        let name = format!("{}/databases/{}", request.parent, database_id);
        if state.databases.contains_key(&name) {
            return Err(SdkError::from(tonic::Status::already_exists(name)));
        }

        let database = database_proto::Database {
            name: name.clone(),
            state: database_proto::database::State::Creating as i32,
        };
        state.databases.insert(name.clone(), database.clone());
        state.ddl.insert(name.clone(), request.extra_statements.clone());

        let metadata = database_proto::CreateDatabaseMetadata {
            database: name.clone(),
        };
        let ready = database_proto::Database {
            name: name.clone(),
            state: database_proto::database::State::Ready as i32,
        };
        Ok(self.start_operation(
            &mut state,
            &name,
            pack("google.spanner.admin.database.v1.CreateDatabaseMetadata", &metadata),
            Some(pack("google.spanner.admin.database.v1.Database", &ready)),
            Effect::DatabaseReady(name.clone()),
        ))
    }

    async fn update_database_ddl(
        &self,
        request: database_proto::UpdateDatabaseDdlRequest,
    ) -> Result<longrunning_proto::Operation> {
        self.enter("update_database_ddl", &request.database)?;
        let mut state = self.state();
        state.ddl_requests.push(request.clone());
        if !state.databases.contains_key(&request.database) {
            return Err(not_found("database", &request.database));
        }

        let metadata = database_proto::UpdateDatabaseDdlMetadata {
            database: request.database.clone(),
            statements: request.statements.clone(),
            commit_timestamps: vec![now()],
        };
        Ok(self.start_operation(
            &mut state,
            &request.database,
            pack("google.spanner.admin.database.v1.UpdateDatabaseDdlMetadata", &metadata),
            None,
            Effect::ApplyDdl(request.database.clone(), request.statements.clone()),
        ))
    }

    async fn drop_database(&self, name: &str) -> Result<()> {
        self.enter("drop_database", name)?;
        let mut state = self.state();
        state
            .databases
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| not_found("database", name))
    }

    async fn get_database_ddl(&self, name: &str) -> Result<Vec<String>> {
        self.enter("get_database_ddl", name)?;
        self.state()
            .ddl
            .get(name)
            .cloned()
            .ok_or_else(|| not_found("database", name))
    }

    async fn get_database_iam_policy(&self, resource: &str) -> Result<iam_proto::Policy> {
        self.enter("get_database_iam_policy", resource)?;
        Ok(self.state().policies.get(resource).cloned().unwrap_or_default())
    }

    async fn set_database_iam_policy(
        &self,
        resource: &str,
        policy: iam_proto::Policy,
    ) -> Result<iam_proto::Policy> {
        self.enter("set_database_iam_policy", resource)?;
        let mut state = self.state();
        state.set_policies.push(policy.clone());
        state.policies.insert(resource.to_string(), policy.clone());
        Ok(policy)
    }

    async fn test_database_iam_permissions(
        &self,
        resource: &str,
        permissions: Vec<String>,
    ) -> Result<Vec<String>> {
        self.enter("test_database_iam_permissions", resource)?;
        let state = self.state();
        Ok(permissions
            .into_iter()
            .filter(|p| state.granted_permissions.contains(p))
            .collect())
    }

    async fn get_operation(&self, name: &str) -> Result<longrunning_proto::Operation> {
        self.enter("get_operation", name)?;
        let mut state = self.state();
        let pending = state
            .operations
            .get_mut(name)
            .ok_or_else(|| not_found("operation", name))?;

        if pending.polls_left == 0 {
            return Ok(pending.finished.clone());
        }
        pending.polls_left -= 1;
        if pending.polls_left > 0 {
            return Ok(pending.running.clone());
        }

        let finished = pending.finished.clone();
        let effect = pending.effect.take();
        apply(&mut state, effect);
        Ok(finished)
    }

    async fn cancel_operation(&self, name: &str) -> Result<()> {
        self.enter("cancel_operation", name)?;
        let mut state = self.state();
        let pending = state
            .operations
            .get_mut(name)
            .ok_or_else(|| not_found("operation", name))?;
        let cancelled = Operation {
            name: name.to_string(),
            metadata: pending.running.metadata.clone(),
            done: true,
            result: Some(operation::Result::Error(rpc_proto::Status {
                code: tonic::Code::Cancelled as i32,
                message: "operation cancelled".to_string(),
                details: vec![],
            })),
        };
        pending.finished = cancelled;
        pending.polls_left = 0;
        pending.effect = None;
        Ok(())
    }

    async fn create_session(&self, database: &str) -> Result<spanner_proto::Session> {
        self.enter("create_session", database)?;
        let mut state = self.state();
        if !state.databases.contains_key(database) {
            return Err(not_found("database", database));
        }
        state.next_id += 1;
        let session = spanner_proto::Session {
            name: format!("{}/sessions/session-{}", database, state.next_id),
            labels: HashMap::new(),
            create_time: Some(now()),
            approximate_last_use_time: None,
        };
        state.sessions.insert(session.name.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, name: &str) -> Result<spanner_proto::Session> {
        self.enter("get_session", name)?;
        self.state()
            .sessions
            .get(name)
            .cloned()
            .ok_or_else(|| not_found("session", name))
    }

    async fn delete_session(&self, name: &str) -> Result<()> {
        self.enter("delete_session", name)?;
        self.state()
            .sessions
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| not_found("session", name))
    }
}
