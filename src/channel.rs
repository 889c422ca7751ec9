//! Channel handle with observable connectivity state.
//!
//! The tonic transport multiplexes calls but does not expose gRPC
//! connectivity states, so this handle owns the observable state itself: a
//! [`tokio::sync::watch`] pair next to the transport. Whoever constructs the
//! transport drives the state — [`crate::connector::Connector::dial`] for
//! endpoints dialed by this crate, a [`ChannelStateHandle`] for externally
//! managed transports — and `shutdown_now` moves it terminally to SHUTDOWN.
//!
//! "Connected" is a state you observe, not a flag you poll: waiters suspend
//! on the watch until the state they need arrives.

use std::sync::Arc;

use tokio::sync::watch;
use tonic::transport::Channel;

/// Connectivity states of a broker channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Idle,
    Connecting,
    Ready,
    TransientFailure,
    Shutdown,
}

/// A multiplexable handle to one broker endpoint, shared by both protocol
/// generations' invokers. Cloning is cheap; all clones observe the same
/// connectivity state.
#[derive(Debug, Clone)]
pub struct SignalChannel {
    transport: Channel,
    state: Arc<watch::Sender<ChannelState>>,
}

impl SignalChannel {
    /// Wrap a transport that is already connected. The state starts READY.
    pub fn ready(transport: Channel) -> Self {
        Self::with_state(transport, ChannelState::Ready)
    }

    /// Wrap an externally managed transport. The returned
    /// [`ChannelStateHandle`] is the integration point for whatever owns the
    /// transport's lifecycle: it drives the observable state as the
    /// underlying connection moves.
    pub fn external(transport: Channel, initial: ChannelState) -> (Self, ChannelStateHandle) {
        let channel = Self::with_state(transport, initial);
        let handle = ChannelStateHandle {
            state: Arc::clone(&channel.state),
        };
        (channel, handle)
    }

    fn with_state(transport: Channel, initial: ChannelState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            transport,
            state: Arc::new(tx),
        }
    }

    /// The current connectivity state.
    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    /// Subscribe to state transitions.
    pub(crate) fn watch(&self) -> watch::Receiver<ChannelState> {
        self.state.subscribe()
    }

    /// The underlying transport. Invokers clone this per call.
    pub(crate) fn transport(&self) -> Channel {
        self.transport.clone()
    }

    /// Force the channel shut. Abrupt: in-flight calls and streams on this
    /// channel are to be treated as failed by their callers. Idempotent —
    /// a channel already in SHUTDOWN stays there and no event fires.
    pub fn shutdown_now(&self) {
        let changed = self.state.send_if_modified(|state| {
            if *state == ChannelState::Shutdown {
                false
            } else {
                *state = ChannelState::Shutdown;
                true
            }
        });

        if changed {
            tracing::debug!("channel forced to shutdown");
        }
    }

    /// Refuse calls on a channel that has been shut. The transport itself
    /// may still be alive; SHUTDOWN is a contract, not a socket state.
    pub(crate) fn ensure_open(&self) -> Result<(), crate::error::ClientError> {
        if self.state() == ChannelState::Shutdown {
            Err(crate::error::ClientError::broker(
                "UNAVAILABLE: channel is shut down",
            ))
        } else {
            Ok(())
        }
    }

    /// Suspend until the state becomes READY.
    pub(crate) async fn wait_ready(&self) {
        let mut rx = self.watch();
        while *rx.borrow_and_update() != ChannelState::Ready {
            if rx.changed().await.is_err() {
                // Sender is owned by this channel, so this is unreachable in
                // practice; park forever and let the caller's deadline fire.
                std::future::pending::<()>().await;
            }
        }
    }

    /// Suspend until the state becomes SHUTDOWN.
    pub(crate) async fn closed(&self) {
        let mut rx = self.watch();
        while *rx.borrow_and_update() != ChannelState::Shutdown {
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Drives the observable state of an externally managed transport.
#[derive(Debug, Clone)]
pub struct ChannelStateHandle {
    state: Arc<watch::Sender<ChannelState>>,
}

impl ChannelStateHandle {
    /// Record a connectivity transition. Transitions out of SHUTDOWN are
    /// ignored; shutdown is terminal.
    pub fn set(&self, new_state: ChannelState) {
        let _ = self.state.send_if_modified(|state| {
            if *state == ChannelState::Shutdown || *state == new_state {
                false
            } else {
                *state = new_state;
                true
            }
        });
    }
}
