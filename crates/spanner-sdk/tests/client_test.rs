// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Client-level tests against the in-memory backend.

mod common;

use common::{FakeBackend, config_path, instance_path, instance_fixture};
use spanner_sdk::{CreateInstanceOptions, InstanceState, SdkError};

#[tokio::test]
async fn test_project_id_comes_from_backend() {
    let (spanner, _fake) = FakeBackend::client();
    assert_eq!(spanner.project_id(), "test");
}

#[tokio::test]
async fn test_get_instance() {
    let (spanner, fake) = FakeBackend::client();
    fake.add_instance(instance_fixture("my-instance-id"));

    let instance = spanner.instance("my-instance-id").await.unwrap().unwrap();
    assert_eq!(instance.project_id(), "test");
    assert_eq!(instance.instance_id(), "my-instance-id");
    assert_eq!(instance.path(), "projects/test/instances/my-instance-id");
    assert_eq!(instance.name(), "my-instance-id display");
    assert_eq!(instance.config_id(), "regional-us-central1");
    assert_eq!(instance.nodes(), 1);
    assert_eq!(instance.state(), InstanceState::Ready);
    assert!(instance.is_ready());
    assert_eq!(instance.labels()["env"], "production");
}

#[tokio::test]
async fn test_missing_instance_is_none() {
    let (spanner, _fake) = FakeBackend::client();
    assert!(spanner.instance("does-not-exist").await.unwrap().is_none());
}

#[tokio::test]
async fn test_other_errors_are_raised() {
    let (spanner, fake) = FakeBackend::client();
    fake.fail_next("get_instance", tonic::Code::PermissionDenied);

    let err = spanner.instance("my-instance-id").await.unwrap_err();
    assert!(matches!(err, SdkError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_default_instance() {
    let (spanner, fake) = FakeBackend::client();
    fake.add_instance(instance_fixture("default-instance"));

    let err = spanner.default_instance().await.unwrap_err();
    assert!(matches!(err, SdkError::Config(_)));

    let spanner = spanner.with_default_instance("default-instance");
    let instance = spanner.default_instance().await.unwrap().unwrap();
    assert_eq!(instance.instance_id(), "default-instance");
}

#[tokio::test]
async fn test_create_instance_job() {
    let (spanner, fake) = FakeBackend::client();
    fake.set_polls_until_done(2);

    let options = CreateInstanceOptions::new("regional-us-central1", 3)
        .with_name("My New Instance")
        .with_label("env", "staging");
    let mut job = spanner.create_instance("new-instance", options).await.unwrap();

    assert!(!job.is_done());
    assert!(job.result().unwrap().is_none());
    assert_eq!(
        fake.stored_instance("new-instance").unwrap().config,
        config_path("regional-us-central1")
    );

    job.wait_until_done().await.unwrap();
    assert!(job.is_done());
    assert!(!job.has_error());

    let instance = job.result().unwrap().unwrap();
    assert_eq!(instance.instance_id(), "new-instance");
    assert_eq!(instance.name(), "My New Instance");
    assert_eq!(instance.nodes(), 3);
    assert!(instance.is_ready());
    assert_eq!(fake.call_count("get_operation"), 2);
}

#[tokio::test]
async fn test_create_instance_name_defaults_to_id() {
    let (spanner, fake) = FakeBackend::client();

    let options = CreateInstanceOptions::new(config_path("regional-europe-west1"), 1);
    spanner.create_instance("plain-instance", options).await.unwrap();

    let stored = fake.stored_instance("plain-instance").unwrap();
    assert_eq!(stored.display_name, "plain-instance");
    assert_eq!(stored.config, config_path("regional-europe-west1"));
}

#[tokio::test]
async fn test_create_instance_validates_before_sending() {
    let (spanner, fake) = FakeBackend::client();

    let err = spanner
        .create_instance("Bad_Id", CreateInstanceOptions::new("regional-us-central1", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::InvalidInput(_)));

    let err = spanner
        .create_instance("good-instance", CreateInstanceOptions::new("regional-us-central1", 0))
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::InvalidInput(_)));
    assert_eq!(fake.call_count("create_instance"), 0);
}

#[tokio::test]
async fn test_create_existing_instance() {
    let (spanner, fake) = FakeBackend::client();
    fake.add_instance(instance_fixture("taken-instance"));

    let err = spanner
        .create_instance("taken-instance", CreateInstanceOptions::new("regional-us-central1", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::AlreadyExists(_)));
}

#[tokio::test]
async fn test_instance_configs() {
    let (spanner, fake) = FakeBackend::client();
    fake.add_instance_config("regional-us-central1", "US Central 1");
    fake.add_instance_config("regional-europe-west1", "Europe West 1");

    let configs = spanner.instance_configs(None, None).await.unwrap();
    assert_eq!(configs.len(), 2);
    assert!(!configs.has_next());
    assert_eq!(configs.items()[0].instance_config_id(), "regional-us-central1");

    let config = spanner.instance_config("regional-europe-west1").await.unwrap().unwrap();
    assert_eq!(config.display_name(), "Europe West 1");
    assert_eq!(config.path(), config_path("regional-europe-west1"));

    let by_path = spanner
        .instance_config(&config_path("regional-us-central1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_path.name(), "US Central 1");

    assert!(spanner.instance_config("nowhere").await.unwrap().is_none());
}

#[tokio::test]
async fn test_instance_config_lookup() {
    let (spanner, fake) = FakeBackend::client();
    fake.add_instance_config("regional-us-central1", "US Central 1");
    fake.add_instance(instance_fixture("my-instance-id"));

    let instance = spanner.instance("my-instance-id").await.unwrap().unwrap();
    let config = instance.config().await.unwrap().unwrap();
    assert_eq!(config.display_name(), "US Central 1");
}

#[tokio::test]
async fn test_instance_paths_are_scoped_to_project() {
    let (spanner, fake) = FakeBackend::client();
    fake.add_instance(instance_fixture("my-instance-id"));

    spanner.instance("my-instance-id").await.unwrap();
    assert_eq!(
        fake.calls(),
        vec![format!("get_instance {}", instance_path("my-instance-id"))]
    );
}

#[tokio::test]
async fn test_create_instance_from_config_object() {
    let (spanner, fake) = FakeBackend::client();
    fake.add_instance_config("regional-asia-east1", "Asia East 1");

    let config = spanner.instance_config("regional-asia-east1").await.unwrap().unwrap();
    spanner
        .create_instance("asia-instance", CreateInstanceOptions::new(&config, 1))
        .await
        .unwrap();

    assert_eq!(
        fake.stored_instance("asia-instance").unwrap().config,
        config_path("regional-asia-east1")
    );
}
