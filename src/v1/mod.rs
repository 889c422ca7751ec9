//! Protocol generation 1: entry-oriented broker operations.
//!
//! Signals are addressed by dotted path only; every operation selects the
//! entry aspects it touches through [`Field`](crate::proto::v1::Field)
//! selectors. The [`invoker`] owns the stub calls, the [`protocol`] facade
//! adds request objects, a listener adapter and signal-tree fan-out.

mod invoker;
mod protocol;
mod request;
mod tree;

pub use invoker::InvokerV1;
pub use protocol::{PathListener, ProtocolV1, TreeListener};
pub use request::{
    FetchRequest, SubscribeRequest, TreeFetchRequest, TreeSubscribeRequest, TreeUpdateRequest,
    TreeUpdateResponse, UpdateRequest,
};
pub use tree::{SignalLeaf, SignalTree};
