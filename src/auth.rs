//! Authentication attachment.
//!
//! The broker accepts a bearer-style credential on every call. This module
//! isolates that concern: a token is an opaque scheme + credential pair, a
//! [`TokenCell`] is the shared slot both protocol generations observe, and
//! [`authorized`] stamps the `authorization` header onto one outbound
//! request. When no token is set, calls go out without the header.
//!
//! The cell is read-mostly shared state. Assignment is a single synchronous
//! field write; the last write wins and only the *next* outbound call picks
//! it up — setting a token never triggers a network call by itself.

use std::sync::{Arc, RwLock};

use tonic::metadata::MetadataValue;
use tonic::Request;

use crate::error::ClientError;

/// An opaque credential attached to outbound broker calls.
///
/// The header value is exactly `"<scheme> <token>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    scheme: String,
    token: String,
}

impl AuthToken {
    /// A token with an explicit scheme.
    pub fn new(scheme: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            token: token.into(),
        }
    }

    /// A `Bearer`-scheme token, the broker's usual credential form.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new("Bearer", token)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// The full `authorization` header value.
    pub fn header_value(&self) -> String {
        format!("{} {}", self.scheme, self.token)
    }
}

/// Shared, mutable token slot observed by the invokers.
#[derive(Debug, Clone, Default)]
pub(crate) struct TokenCell {
    inner: Arc<RwLock<Option<AuthToken>>>,
}

impl TokenCell {
    pub(crate) fn set(&self, token: Option<AuthToken>) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = token;
    }

    pub(crate) fn get(&self) -> Option<AuthToken> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Wrap an outbound message, attaching the credential header when present.
///
/// A token that does not form a valid ASCII header value is reported as a
/// broker error at call time rather than being silently dropped.
pub(crate) fn authorized<T>(message: T, cell: &TokenCell) -> Result<Request<T>, ClientError> {
    let mut request = Request::new(message);

    if let Some(token) = cell.get() {
        let value = MetadataValue::try_from(token.header_value()).map_err(|_| {
            ClientError::broker("INVALID_ARGUMENT: authorization token is not valid header ASCII")
        })?;
        let _ = request.metadata_mut().insert("authorization", value);
    }

    Ok(request)
}
