// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Spanner Protocol - gRPC + Protobuf communication layer
//!
//! This crate provides the wire layer used by `spanner-sdk` to talk to the
//! Cloud Spanner service:
//! - Instance Admin API (instances, instance configs, instance IAM)
//! - Database Admin API (databases, DDL, database IAM)
//! - Spanner data-plane API (sessions)
//! - Long-running operations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    spanner-protocol                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RPC Layer: generated tonic clients (unary calls)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Serialization: Protobuf (prost)                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Transport: HTTP/2 + TLS (tonic channel)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The message and client modules under `google` are checked-in prost/tonic
//! output for the service's published protobuf definitions.
//!
//! # Usage
//!
//! ```ignore
//! use spanner_protocol::{ChannelConfig, instance_proto};
//! use spanner_protocol::instance_proto::instance_admin_client::InstanceAdminClient;
//!
//! let channel = ChannelConfig::default().connect().await?;
//! let mut client = InstanceAdminClient::new(channel);
//!
//! let response = client
//!     .list_instances(instance_proto::ListInstancesRequest {
//!         parent: "projects/my-project".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

pub mod channel;

/// Generated protobuf types and gRPC clients, laid out by protobuf package.
pub mod google {
    pub mod spanner {
        pub mod v1 {
            include!("gen/google.spanner.v1.rs");
        }

        pub mod admin {
            pub mod instance {
                pub mod v1 {
                    include!("gen/google.spanner.admin.instance.v1.rs");
                }
            }

            pub mod database {
                pub mod v1 {
                    include!("gen/google.spanner.admin.database.v1.rs");
                }
            }
        }
    }

    pub mod iam {
        pub mod v1 {
            include!("gen/google.iam.v1.rs");
        }
    }

    pub mod longrunning {
        include!("gen/google.longrunning.rs");
    }

    pub mod rpc {
        include!("gen/google.rpc.rs");
    }
}

// Short aliases for the packages the SDK works with
pub use google::iam::v1 as iam_proto;
pub use google::longrunning as longrunning_proto;
pub use google::rpc as rpc_proto;
pub use google::spanner::admin::database::v1 as database_proto;
pub use google::spanner::admin::instance::v1 as instance_proto;
pub use google::spanner::v1 as spanner_proto;

// Protobuf well-known types used in the generated messages
pub use prost_types;

// Re-export main types
pub use channel::{ChannelConfig, ChannelError, DEFAULT_ENDPOINT};
