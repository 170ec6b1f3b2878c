// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Long-running operations.
//!
//! Mutating calls such as creating an instance return a [`Job`]. The job
//! can be reloaded, waited on, or cancelled; once done its result is
//! decoded into the resource the call produced.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use prost::Message;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use spanner_protocol::longrunning_proto::{Operation, operation};
use spanner_protocol::prost_types::{Any, Timestamp};
use spanner_protocol::{database_proto, instance_proto};
use tokio::time::Instant;
use tracing::{debug, info, instrument};

use crate::backend::SharedBackend;
use crate::error::{Result, SdkError};

pub(crate) const INSTANCE_TYPE: &str = "google.spanner.admin.instance.v1.Instance";
pub(crate) const DATABASE_TYPE: &str = "google.spanner.admin.database.v1.Database";
const CREATE_INSTANCE_METADATA_TYPE: &str = "google.spanner.admin.instance.v1.CreateInstanceMetadata";
const UPDATE_INSTANCE_METADATA_TYPE: &str = "google.spanner.admin.instance.v1.UpdateInstanceMetadata";
const CREATE_DATABASE_METADATA_TYPE: &str = "google.spanner.admin.database.v1.CreateDatabaseMetadata";
const UPDATE_DATABASE_DDL_METADATA_TYPE: &str =
    "google.spanner.admin.database.v1.UpdateDatabaseDdlMetadata";

/// Type URL under which a message of `full_name` is packed.
pub fn type_url(full_name: &str) -> String {
    format!("type.googleapis.com/{}", full_name)
}

/// Decode a packed message after checking its type.
pub(crate) fn unpack<M: Message + Default>(any: &Any, full_name: &str) -> Result<M> {
    let type_name = any.type_url.rsplit('/').next().unwrap_or_default();
    if type_name != full_name {
        return Err(SdkError::UnexpectedResponse(format!(
            "expected {}, got {}",
            full_name, any.type_url
        )));
    }
    Ok(M::decode(any.value.as_slice())?)
}

pub(crate) fn timestamp_to_datetime(ts: &Timestamp) -> Option<DateTime<Utc>> {
    let nanos = u32::try_from(ts.nanos).ok()?;
    DateTime::from_timestamp(ts.seconds, nanos)
}

/// A value a finished job resolves to.
pub trait FromOperation: Sized + Send {
    /// Decode the job's response. `response` is `None` when the operation
    /// finished without one.
    fn from_response(backend: &SharedBackend, response: Option<&Any>) -> Result<Self>;
}

impl FromOperation for () {
    fn from_response(_backend: &SharedBackend, _response: Option<&Any>) -> Result<Self> {
        Ok(())
    }
}

/// The error a job finished with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobError {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<JobError> for SdkError {
    fn from(err: JobError) -> Self {
        SdkError::Operation {
            code: err.code,
            message: err.message,
        }
    }
}

/// Progress information attached to a job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobMetadata {
    CreateInstance(instance_proto::CreateInstanceMetadata),
    UpdateInstance(instance_proto::UpdateInstanceMetadata),
    CreateDatabase(database_proto::CreateDatabaseMetadata),
    UpdateDatabaseDdl(database_proto::UpdateDatabaseDdlMetadata),
    /// Metadata of a type this SDK does not decode.
    Unknown(Any),
}

impl JobMetadata {
    pub fn decode(any: &Any) -> Result<Self> {
        let type_name = any.type_url.rsplit('/').next().unwrap_or_default();
        Ok(match type_name {
            CREATE_INSTANCE_METADATA_TYPE => Self::CreateInstance(unpack(any, type_name)?),
            UPDATE_INSTANCE_METADATA_TYPE => Self::UpdateInstance(unpack(any, type_name)?),
            CREATE_DATABASE_METADATA_TYPE => Self::CreateDatabase(unpack(any, type_name)?),
            UPDATE_DATABASE_DDL_METADATA_TYPE => Self::UpdateDatabaseDdl(unpack(any, type_name)?),
            _ => Self::Unknown(any.clone()),
        })
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::CreateInstance(m) => m.start_time.as_ref().and_then(timestamp_to_datetime),
            Self::UpdateInstance(m) => m.start_time.as_ref().and_then(timestamp_to_datetime),
            _ => None,
        }
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::CreateInstance(m) => m.end_time.as_ref().and_then(timestamp_to_datetime),
            Self::UpdateInstance(m) => m.end_time.as_ref().and_then(timestamp_to_datetime),
            _ => None,
        }
    }

    pub fn cancel_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::CreateInstance(m) => m.cancel_time.as_ref().and_then(timestamp_to_datetime),
            Self::UpdateInstance(m) => m.cancel_time.as_ref().and_then(timestamp_to_datetime),
            _ => None,
        }
    }

    /// Commit times of the DDL statements applied so far.
    pub fn commit_timestamps(&self) -> Vec<DateTime<Utc>> {
        match self {
            Self::UpdateDatabaseDdl(m) => m
                .commit_timestamps
                .iter()
                .filter_map(timestamp_to_datetime)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Handle to a long-running operation that resolves to `T`.
pub struct Job<T> {
    grpc: Operation,
    backend: SharedBackend,
    _resolves: PhantomData<fn() -> T>,
}

impl<T: FromOperation> Job<T> {
    pub fn from_proto(grpc: Operation, backend: SharedBackend) -> Self {
        Self {
            grpc,
            backend,
            _resolves: PhantomData,
        }
    }

    /// Operation name, usable with `Spanner::job` to resume the job later.
    pub fn name(&self) -> &str {
        &self.grpc.name
    }

    pub fn grpc(&self) -> &Operation {
        &self.grpc
    }

    pub fn is_done(&self) -> bool {
        self.grpc.done
    }

    pub fn error(&self) -> Option<JobError> {
        match &self.grpc.result {
            Some(operation::Result::Error(status)) => Some(JobError {
                code: status.code,
                message: status.message.clone(),
            }),
            _ => None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error().is_some()
    }

    /// The produced value, or `None` while the job is still running.
    pub fn result(&self) -> Result<Option<T>> {
        if !self.grpc.done {
            return Ok(None);
        }
        match &self.grpc.result {
            Some(operation::Result::Error(status)) => Err(SdkError::Operation {
                code: status.code,
                message: status.message.clone(),
            }),
            Some(operation::Result::Response(any)) => {
                T::from_response(&self.backend, Some(any)).map(Some)
            }
            None => T::from_response(&self.backend, None).map(Some),
        }
    }

    pub fn metadata(&self) -> Result<Option<JobMetadata>> {
        self.grpc.metadata.as_ref().map(JobMetadata::decode).transpose()
    }

    /// Refresh the operation from the service.
    #[instrument(skip(self), fields(job = %self.grpc.name))]
    pub async fn reload(&mut self) -> Result<&mut Self> {
        self.grpc = self.backend.get_operation(&self.grpc.name).await?;
        debug!(done = self.grpc.done, "job reloaded");
        Ok(self)
    }

    /// Poll until the job is done, backing off between polls.
    #[instrument(skip(self), fields(job = %self.grpc.name))]
    pub async fn wait_until_done(&mut self) -> Result<&mut Self> {
        let poll = self.backend.poll_settings();
        let started = Instant::now();
        let mut attempt = 0u32;

        while !self.grpc.done {
            let remaining = poll.total_timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                return Err(SdkError::Timeout(poll.total_timeout.as_millis() as u64));
            }
            attempt += 1;
            // The last poll is shortened to the remaining budget.
            tokio::time::sleep(poll.delay_for_attempt(attempt).min(remaining)).await;
            self.reload().await?;
        }

        info!(polls = attempt, error = self.has_error(), "job finished");
        Ok(self)
    }

    /// Ask the service to cancel the job.
    #[instrument(skip(self), fields(job = %self.grpc.name))]
    pub async fn cancel(&self) -> Result<()> {
        self.backend.cancel_operation(&self.grpc.name).await
    }
}

impl<T> fmt::Debug for Job<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.grpc.name)
            .field("done", &self.grpc.done)
            .finish()
    }
}

impl<T: FromOperation> Serialize for Job<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let error = self.error();
        let mut state = serializer.serialize_struct("Job", 4)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("done", &self.is_done())?;
        state.serialize_field("error_code", &error.as_ref().map(|e| e.code))?;
        state.serialize_field("error_message", &error.as_ref().map(|e| e.message.as_str()))?;
        state.end()
    }
}
