//! Protocol generation 2: signal-oriented broker operations.
//!
//! Signals are addressed uniformly by [`SignalAddress`] (dotted path or
//! numeric id). Adds actuation, metadata listing, value publishing, server
//! info and the bidirectional provider stream on top of the fetch/subscribe
//! surface.

mod invoker;
mod protocol;
mod request;

pub use invoker::InvokerV2;
pub use protocol::ProtocolV2;
pub use request::{
    ActuateRequest, BatchActuateRequest, FetchValueRequest, FetchValuesRequest,
    ListMetadataRequest, PublishValueRequest, SignalAddress, SubscribeByIdRequest,
    SubscribeRequest,
};
