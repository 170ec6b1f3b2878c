// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Spanner SDK
//!
//! Client for managing Cloud Spanner instances, instance configs,
//! databases, IAM policies and sessions.
//!
//! # Architecture
//!
//! ```text
//! Spanner ──► Instance / InstanceConfig / Database / Session / Job
//!    │                          │
//!    └──────► SpannerBackend ◄──┘   (GrpcBackend over spanner-protocol)
//! ```
//!
//! Resource wrappers hold a shared backend handle, so they can reload
//! themselves and issue follow-up calls without going through the client.
//!
//! # Example
//!
//! ```no_run
//! use spanner_sdk::{CreateInstanceOptions, SdkConfig, Spanner};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let spanner = Spanner::connect(SdkConfig::from_env()?).await?;
//!
//! // List every instance in the project
//! for instance in spanner.instances(None, None).await?.all(None).await? {
//!     println!("{} ({} nodes)", instance.instance_id(), instance.nodes());
//! }
//!
//! // Create an instance and wait for it
//! let options = CreateInstanceOptions::new("regional-us-central1", 1).with_name("Orders");
//! let mut job = spanner.create_instance("orders-prod", options).await?;
//! job.wait_until_done().await?;
//! let instance = job.result()?.expect("job is done");
//!
//! // Create a database with a schema
//! let mut job = instance
//!     .create_database("orders", vec!["CREATE TABLE t (id INT64) PRIMARY KEY (id)".into()])
//!     .await?;
//! job.wait_until_done().await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
mod client;
mod config;
pub mod credentials;
mod database;
mod error;
mod instance;
mod instance_config;
mod job;
mod list;
pub mod paths;
mod policy;
pub mod retry;
mod session;
mod validate;

pub use backend::{GrpcBackend, SharedBackend, SpannerBackend};
pub use client::Spanner;
pub use config::{DEFAULT_SCOPES, SdkConfig};
pub use credentials::{Credentials, CredentialsSource};
pub use database::{Database, DatabaseState, create_statement};
pub use error::{Result, SdkError};
pub use instance::{CreateInstanceOptions, Instance, InstanceState};
pub use instance_config::InstanceConfig;
pub use job::{FromOperation, Job, JobError, JobMetadata, type_url};
pub use list::{List, Page, Paged};
pub use policy::Policy;
pub use retry::{PollSettings, RetrySettings};
pub use session::Session;

pub use spanner_protocol as protocol;
