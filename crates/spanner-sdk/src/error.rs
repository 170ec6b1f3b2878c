// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for spanner-sdk.

use thiserror::Error;
use tonic::Code;

/// Result type using SdkError.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors that can occur when using the Spanner SDK.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection to the service failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Request or wait timed out.
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// Credentials could not be loaded or exchanged for a token.
    #[error("credentials error: {0}")]
    Credentials(String),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The resource being created already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The caller lacks permission for the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The request did not carry valid authentication.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// The service rejected an argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The system is not in a state required for the operation.
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),

    /// The operation was aborted, typically due to a concurrency issue.
    #[error("aborted: {0}")]
    Aborted(String),

    /// The service is currently unavailable.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The deadline expired before the operation could complete.
    #[error("deadline exceeded: {0}")]
    DeadlineExceeded(String),

    /// A quota or resource limit was exhausted.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Server returned any other error status.
    #[error("server error [{code}]: {message}")]
    Server { code: String, message: String },

    /// A long-running operation finished with an error.
    #[error("operation failed [{code}]: {message}")]
    Operation { code: i32, message: String },

    /// Unexpected response from server.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid input rejected before sending.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Protocol error.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl SdkError {
    /// Check if this error means the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::NotFound(_))
    }

    /// Check if the failed call may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SdkError::Unavailable(_) | SdkError::DeadlineExceeded(_)
        )
    }
}

impl From<tonic::Status> for SdkError {
    fn from(status: tonic::Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            Code::NotFound => SdkError::NotFound(message),
            Code::AlreadyExists => SdkError::AlreadyExists(message),
            Code::PermissionDenied => SdkError::PermissionDenied(message),
            Code::Unauthenticated => SdkError::Unauthenticated(message),
            Code::InvalidArgument | Code::OutOfRange => SdkError::InvalidArgument(message),
            Code::FailedPrecondition => SdkError::FailedPrecondition(message),
            Code::Aborted => SdkError::Aborted(message),
            Code::Unavailable => SdkError::Unavailable(message),
            Code::DeadlineExceeded => SdkError::DeadlineExceeded(message),
            Code::ResourceExhausted => SdkError::ResourceExhausted(message),
            code => SdkError::Server {
                code: format!("{:?}", code),
                message,
            },
        }
    }
}

impl From<spanner_protocol::ChannelError> for SdkError {
    fn from(err: spanner_protocol::ChannelError) -> Self {
        match err {
            spanner_protocol::ChannelError::Timeout(ms) => SdkError::Timeout(ms),
            other => SdkError::Connection(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<prost::DecodeError> for SdkError {
    fn from(err: prost::DecodeError) -> Self {
        SdkError::Protocol(err.to_string())
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        SdkError::Credentials(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for SdkError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        SdkError::Credentials(err.to_string())
    }
}

impl From<std::io::Error> for SdkError {
    fn from(err: std::io::Error) -> Self {
        SdkError::Connection(err.to_string())
    }
}
