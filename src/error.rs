//! Error types for databroker-client.
//!
//! Two runtime failure kinds exist at this layer:
//!
//! - [`ClientError::ConnectionTimeout`] — the channel never reached READY
//!   within the connect deadline. Fatal to that connect attempt; the caller
//!   decides whether to try again.
//! - [`ClientError::Broker`] — a stub-level status failure on a unary call or
//!   subscription setup. The message keeps the original status text prefixed
//!   with the status label (`NOT_FOUND`, `PERMISSION_DENIED`,
//!   `UNAUTHENTICATED`, `INVALID_ARGUMENT`, `UNAVAILABLE`, `DATA_LOSS`,
//!   `ALREADY_EXISTS`, ...) so callers can pattern-match categories by
//!   substring. No structured code surface is offered beyond that; this is a
//!   deliberately weak contract kept for compatibility with the upstream
//!   status surface.
//!
//! Constructing an invoker or connection on a non-READY channel is a
//! programming error and panics via assertion instead of returning a value.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The channel did not reach READY within the wait deadline.
    #[error("timed out after {timeout:?} waiting for the channel to become ready")]
    ConnectionTimeout { timeout: Duration },

    /// A broker call failed at the transport/status layer.
    #[error("databroker request failed: {message}")]
    Broker { message: String },
}

impl ClientError {
    pub(crate) fn broker(message: impl Into<String>) -> Self {
        Self::Broker {
            message: message.into(),
        }
    }
}

impl From<tonic::Status> for ClientError {
    fn from(status: tonic::Status) -> Self {
        Self::Broker {
            message: format!("{}: {}", status_label(status.code()), status.message()),
        }
    }
}

/// The canonical SCREAMING_SNAKE name of a gRPC status code.
pub(crate) fn status_label(code: tonic::Code) -> &'static str {
    use tonic::Code;

    match code {
        Code::Ok => "OK",
        Code::Cancelled => "CANCELLED",
        Code::Unknown => "UNKNOWN",
        Code::InvalidArgument => "INVALID_ARGUMENT",
        Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
        Code::NotFound => "NOT_FOUND",
        Code::AlreadyExists => "ALREADY_EXISTS",
        Code::PermissionDenied => "PERMISSION_DENIED",
        Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
        Code::FailedPrecondition => "FAILED_PRECONDITION",
        Code::Aborted => "ABORTED",
        Code::OutOfRange => "OUT_OF_RANGE",
        Code::Unimplemented => "UNIMPLEMENTED",
        Code::Internal => "INTERNAL",
        Code::Unavailable => "UNAVAILABLE",
        Code::DataLoss => "DATA_LOSS",
        Code::Unauthenticated => "UNAUTHENTICATED",
    }
}
