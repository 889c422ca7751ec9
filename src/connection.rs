//! An active broker session.
//!
//! A [`Connection`] wraps a READY channel and exposes both protocol
//! generations over it simultaneously — `v1` for entry-oriented brokers,
//! `v2` for signal-oriented ones — plus the cross-cutting session concerns:
//! the shared credential and disconnect notification.
//!
//! One watch task per connection observes the channel. The first transition
//! away from READY tears the session down: the channel is forced to
//! SHUTDOWN (unless it already is), every registered [`DisconnectListener`]
//! fires exactly once in registration order, and the task ends. Listeners
//! registered after teardown never fire.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::auth::{AuthToken, TokenCell};
use crate::channel::{ChannelState, SignalChannel};
use crate::listener::{DisconnectListener, ListenerId, MultiListener};
use crate::v1::{InvokerV1, ProtocolV1};
use crate::v2::{InvokerV2, ProtocolV2};

/// An established session with a broker, valid until the channel leaves
/// READY. Not reusable: a torn-down connection stays down, reconnecting
/// means building a new one.
pub struct Connection {
    channel: SignalChannel,
    /// Generation-1 operations (entry-oriented).
    pub v1: ProtocolV1,
    /// Generation-2 operations (signal-oriented).
    pub v2: ProtocolV2,
    invoker_v1: Arc<InvokerV1>,
    invoker_v2: Arc<InvokerV2>,
    token: TokenCell,
    listeners: Arc<MultiListener<dyn DisconnectListener>>,
    watch_task: JoinHandle<()>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("state", &self.channel.state())
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Build a session over a channel that is already READY.
    ///
    /// # Panics
    /// When the channel is not READY — connecting is the
    /// [`Connector`](crate::connector::Connector)'s job, not this type's.
    pub(crate) fn new(channel: SignalChannel, token: Option<AuthToken>) -> Self {
        assert_eq!(
            channel.state(),
            ChannelState::Ready,
            "channel must be READY before constructing a connection"
        );

        let invoker_v1 = Arc::new(InvokerV1::new(&channel));
        let invoker_v2 = Arc::new(InvokerV2::new(&channel));
        let listeners: Arc<MultiListener<dyn DisconnectListener>> =
            Arc::new(MultiListener::new());

        let connection = Self {
            v1: ProtocolV1::new(Arc::clone(&invoker_v1)),
            v2: ProtocolV2::new(Arc::clone(&invoker_v2)),
            invoker_v1,
            invoker_v2,
            token: TokenCell::default(),
            listeners: Arc::clone(&listeners),
            watch_task: Self::spawn_watch(channel.clone(), listeners),
            channel,
        };
        connection.set_auth_token(token);
        connection
    }

    /// Single state-watch registration for the whole connection lifetime.
    /// Ends itself after the one teardown it exists to report.
    fn spawn_watch(
        channel: SignalChannel,
        listeners: Arc<MultiListener<dyn DisconnectListener>>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut rx = channel.watch();
            loop {
                if *rx.borrow_and_update() != ChannelState::Ready {
                    break;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }

            debug!("connection left ready state, tearing down");
            channel.shutdown_now();
            for listener in listeners.snapshot() {
                listener.on_disconnect();
            }
        })
    }

    /// The credential currently attached to outbound calls.
    pub fn auth_token(&self) -> Option<AuthToken> {
        self.token.get()
    }

    /// Replace the credential for all subsequent calls on both protocol
    /// generations. Synchronous; takes effect from the next outbound call.
    /// `None` clears the credential.
    pub fn set_auth_token(&self, token: Option<AuthToken>) {
        self.token.set(token.clone());
        self.invoker_v1.set_token(token.clone());
        self.invoker_v2.set_token(token);
    }

    /// Register for the connection's teardown event. Listeners fire exactly
    /// once, in registration order, when the channel first leaves READY.
    pub fn register_disconnect_listener(
        &self,
        listener: Arc<dyn DisconnectListener>,
    ) -> ListenerId {
        self.listeners.register(listener)
    }

    /// Remove a previously registered listener. Returns false for unknown
    /// ids.
    pub fn unregister_disconnect_listener(&self, id: ListenerId) -> bool {
        self.listeners.unregister(id)
    }

    /// The current channel state. READY means the session is usable.
    pub fn state(&self) -> ChannelState {
        self.channel.state()
    }

    /// Tear the session down. Active subscriptions end, subsequent calls
    /// fail, and disconnect listeners fire (once — calling this on an
    /// already-closed connection is a no-op).
    pub fn disconnect(&self) {
        self.channel.shutdown_now();
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.watch_task.abort();
    }
}
