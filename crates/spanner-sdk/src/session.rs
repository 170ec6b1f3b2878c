// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Data-plane sessions.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use spanner_protocol::spanner_proto;
use tracing::{debug, instrument};

use crate::backend::SharedBackend;
use crate::error::Result;
use crate::job::timestamp_to_datetime;
use crate::paths;

/// A session on a database, the context in which data-plane work runs.
#[derive(Clone)]
pub struct Session {
    grpc: spanner_proto::Session,
    backend: SharedBackend,
}

impl Session {
    pub fn from_proto(grpc: spanner_proto::Session, backend: SharedBackend) -> Self {
        Self { grpc, backend }
    }

    pub fn grpc(&self) -> &spanner_proto::Session {
        &self.grpc
    }

    fn var(&self, name: &str) -> &str {
        paths::SESSION
            .extract(&self.grpc.name, name)
            .unwrap_or_default()
    }

    pub fn project_id(&self) -> &str {
        self.var("project")
    }

    pub fn instance_id(&self) -> &str {
        self.var("instance")
    }

    pub fn database_id(&self) -> &str {
        self.var("database")
    }

    pub fn session_id(&self) -> &str {
        self.var("session")
    }

    /// Full resource name.
    pub fn path(&self) -> &str {
        &self.grpc.name
    }

    pub fn labels(&self) -> &HashMap<String, String> {
        &self.grpc.labels
    }

    pub fn create_time(&self) -> Option<DateTime<Utc>> {
        self.grpc.create_time.as_ref().and_then(timestamp_to_datetime)
    }

    pub fn approximate_last_use_time(&self) -> Option<DateTime<Utc>> {
        self.grpc
            .approximate_last_use_time
            .as_ref()
            .and_then(timestamp_to_datetime)
    }

    /// Refresh from the service. Fails with `NotFound` once the session expired.
    pub async fn reload(&mut self) -> Result<&mut Self> {
        self.grpc = self.backend.get_session(&self.grpc.name).await?;
        Ok(self)
    }

    #[instrument(skip(self), fields(session = %self.grpc.name))]
    pub async fn delete(&self) -> Result<()> {
        self.backend.delete_session(&self.grpc.name).await?;
        debug!("session deleted");
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("path", &self.grpc.name).finish()
    }
}

impl Serialize for Session {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Session", 3)?;
        state.serialize_field("path", self.path())?;
        state.serialize_field("session_id", self.session_id())?;
        state.serialize_field("create_time", &self.create_time())?;
        state.end()
    }
}
