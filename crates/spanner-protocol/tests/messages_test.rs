// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wire compatibility tests for the generated Spanner messages.

use prost::Message;
use spanner_protocol::instance_proto::{self, instance};
use spanner_protocol::longrunning_proto::{Operation, operation};
use spanner_protocol::prost_types::Any;
use spanner_protocol::{database_proto, iam_proto, rpc_proto};

#[test]
fn test_operation_carries_packed_instance() {
    let instance = instance_proto::Instance {
        name: "projects/p/instances/i".to_string(),
        config: "projects/p/instanceConfigs/regional-us-central1".to_string(),
        display_name: "My Instance".to_string(),
        node_count: 3,
        state: instance::State::Ready as i32,
        labels: [("env".to_string(), "production".to_string())].into(),
    };

    let op = Operation {
        name: "projects/p/instances/i/operations/1".to_string(),
        metadata: None,
        done: true,
        result: Some(operation::Result::Response(Any {
            type_url: "type.googleapis.com/google.spanner.admin.instance.v1.Instance".to_string(),
            value: instance.encode_to_vec(),
        })),
    };

    let decoded = Operation::decode(op.encode_to_vec().as_slice()).unwrap();
    assert!(decoded.done);

    let Some(operation::Result::Response(any)) = decoded.result else {
        panic!("expected response");
    };
    let unpacked = instance_proto::Instance::decode(any.value.as_slice()).unwrap();
    assert_eq!(unpacked, instance);
    assert_eq!(unpacked.state(), instance::State::Ready);
}

#[test]
fn test_operation_error_result() {
    let op = Operation {
        name: "operations/2".to_string(),
        metadata: None,
        done: true,
        result: Some(operation::Result::Error(rpc_proto::Status {
            code: 6,
            message: "instance already exists".to_string(),
            details: vec![],
        })),
    };

    let decoded = Operation::decode(op.encode_to_vec().as_slice()).unwrap();
    match decoded.result {
        Some(operation::Result::Error(status)) => {
            assert_eq!(status.code, 6);
            assert_eq!(status.message, "instance already exists");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_unknown_state_falls_back_to_default() {
    let db = database_proto::Database {
        name: "projects/p/instances/i/databases/d".to_string(),
        state: 42,
    };
    assert_eq!(db.state(), database_proto::database::State::Unspecified);
}

#[test]
fn test_state_names() {
    assert_eq!(instance::State::Creating.as_str_name(), "CREATING");
    assert_eq!(
        instance::State::from_str_name("READY"),
        Some(instance::State::Ready)
    );
    assert_eq!(instance::State::from_str_name("DELETED"), None);
}

#[test]
fn test_policy_field_numbers() {
    // bindings is field 4 and etag field 3 on the wire
    let policy = iam_proto::Policy {
        version: 1,
        bindings: vec![iam_proto::Binding {
            role: "roles/viewer".to_string(),
            members: vec!["user:viewer@example.com".to_string()],
        }],
        etag: b"\x08\x01".to_vec(),
    };
    let bytes = policy.encode_to_vec();
    assert_eq!(bytes[0], 0x08); // field 1, varint
    assert!(bytes.contains(&0x1a)); // field 3, length-delimited
    assert!(bytes.contains(&0x22)); // field 4, length-delimited
}
