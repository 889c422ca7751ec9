//! Databroker Client - Vehicle Signal Broker SDK
//!
//! Async client for a gRPC vehicle signal databroker, covering both of the
//! broker's protocol generations over a single shared channel:
//!
//! - **Connection lifecycle**: deadline-bounded establishment, observable
//!   channel state, exactly-once disconnect notification
//! - **Generation 1**: entry-oriented fetch/update/subscribe with field
//!   selection and signal-tree fan-out
//! - **Generation 2**: signal-oriented reads, actuation, metadata listing,
//!   value publishing and the bidirectional provider stream
//! - **Authentication**: one mutable credential attached to every call of
//!   both generations
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                   Connection                     │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐  │
//! │  │ ProtocolV1 │  │ ProtocolV2 │  │ disconnect │  │
//! │  └─────┬──────┘  └─────┬──────┘  │ listeners  │  │
//! │        ▼               ▼         └────────────┘  │
//! │  ┌────────────┐  ┌────────────┐                  │
//! │  │ InvokerV1  │  │ InvokerV2  │◄── auth token    │
//! │  └─────┬──────┘  └─────┬──────┘                  │
//! │        └───────┬───────┘                         │
//! │                ▼                                 │
//! │         SignalChannel (observable state)         │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! A [`Connector`] produces a [`Connection`]; the connection's `v1` and `v2`
//! facades are the operation surface. Subscriptions come back as pull-style
//! [`Subscription`] streams that end cleanly when the stream or the
//! connection does.

pub mod auth;
pub mod channel;
pub mod connection;
pub mod connector;
pub mod error;
pub mod listener;
pub mod subscription;
pub mod v1;
pub mod v2;

/// Generated wire types for both protocol generations.
pub mod proto {
    pub mod v1 {
        tonic::include_proto!("databroker.v1");
    }
    pub mod v2 {
        tonic::include_proto!("databroker.v2");
    }
}

// Re-export the main types
pub use auth::AuthToken;
pub use channel::{ChannelState, ChannelStateHandle, SignalChannel};
pub use connection::Connection;
pub use connector::{Connector, DEFAULT_CONNECT_TIMEOUT};
pub use error::ClientError;
pub use listener::{DisconnectListener, ListenerId, MultiListener};
pub use subscription::{Subscription, SubscriptionHandle};
