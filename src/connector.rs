//! Session establishment.
//!
//! A [`Connector`] turns an endpoint or a prepared channel into a
//! [`Connection`], bounding the wait with a deadline. It holds only
//! configuration — timeout and an optional initial credential — so one
//! connector can establish any number of sessions.

use std::time::Duration;

use tonic::transport::Endpoint;
use tracing::{debug, warn};

use crate::auth::AuthToken;
use crate::channel::SignalChannel;
use crate::connection::Connection;
use crate::error::ClientError;

/// Deadline applied when none is configured.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds broker sessions.
#[derive(Debug, Clone)]
pub struct Connector {
    timeout: Duration,
    auth_token: Option<AuthToken>,
}

impl Connector {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_CONNECT_TIMEOUT,
            auth_token: None,
        }
    }

    /// Bound session establishment with a custom deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Seed every established session with this credential. The session can
    /// still replace it later via
    /// [`Connection::set_auth_token`](crate::connection::Connection::set_auth_token).
    pub fn with_auth_token(mut self, token: AuthToken) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Establish a session over a prepared channel, waiting up to the
    /// deadline for it to become READY. The channel is not torn down on
    /// timeout — its owner decides its fate.
    pub async fn connect(&self, channel: SignalChannel) -> Result<Connection, ClientError> {
        debug!(timeout = ?self.timeout, "waiting for channel to become ready");
        tokio::time::timeout(self.timeout, channel.wait_ready())
            .await
            .map_err(|_| {
                warn!(timeout = ?self.timeout, "channel did not become ready in time");
                ClientError::ConnectionTimeout {
                    timeout: self.timeout,
                }
            })?;

        Ok(Connection::new(channel, self.auth_token.clone()))
    }

    /// Dial an endpoint and establish a session over the resulting channel,
    /// all within the deadline.
    pub async fn dial(&self, endpoint: Endpoint) -> Result<Connection, ClientError> {
        debug!(uri = %endpoint.uri(), timeout = ?self.timeout, "dialing broker endpoint");
        let transport = tokio::time::timeout(self.timeout, endpoint.connect())
            .await
            .map_err(|_| ClientError::ConnectionTimeout {
                timeout: self.timeout,
            })?
            .map_err(|e| {
                warn!(uri = %endpoint.uri(), error = %e, "dial failed");
                ClientError::broker(format!("UNAVAILABLE: failed to dial broker endpoint: {e}"))
            })?;

        Ok(Connection::new(
            SignalChannel::ready(transport),
            self.auth_token.clone(),
        ))
    }
}

impl Default for Connector {
    fn default() -> Self {
        Self::new()
    }
}
