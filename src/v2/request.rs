//! Request objects for the generation-2 facade.

use crate::proto::v2::{signal_id, Datapoint, SignalId, Value};

/// A signal identifier: hierarchical dotted path or numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalAddress {
    Path(String),
    Id(i32),
}

impl SignalAddress {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn id(id: i32) -> Self {
        Self::Id(id)
    }

    pub(crate) fn into_proto(self) -> SignalId {
        let signal = match self {
            Self::Path(path) => signal_id::Signal::Path(path),
            Self::Id(id) => signal_id::Signal::Id(id),
        };
        SignalId {
            signal: Some(signal),
        }
    }
}

impl From<&str> for SignalAddress {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<String> for SignalAddress {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<i32> for SignalAddress {
    fn from(id: i32) -> Self {
        Self::Id(id)
    }
}

/// Read the latest value of one signal.
#[derive(Debug, Clone)]
pub struct FetchValueRequest {
    pub signal: SignalAddress,
}

impl FetchValueRequest {
    pub fn new(signal: impl Into<SignalAddress>) -> Self {
        Self {
            signal: signal.into(),
        }
    }
}

/// Read the latest values of a set of signals; responses keep request order.
#[derive(Debug, Clone)]
pub struct FetchValuesRequest {
    pub signals: Vec<SignalAddress>,
}

impl FetchValuesRequest {
    pub fn new(signals: Vec<SignalAddress>) -> Self {
        Self { signals }
    }
}

/// Register for updates of a set of paths.
///
/// `buffer_size` bounds how many updates are held for a slow consumer
/// before the oldest are dropped; `None` leaves buffering unbounded.
#[derive(Debug, Clone)]
pub struct SubscribeRequest {
    pub paths: Vec<String>,
    pub buffer_size: Option<u32>,
}

impl SubscribeRequest {
    pub fn new(paths: Vec<String>) -> Self {
        Self {
            paths,
            buffer_size: None,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: u32) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }
}

/// Register for updates of a set of numeric signal ids.
#[derive(Debug, Clone)]
pub struct SubscribeByIdRequest {
    pub ids: Vec<i32>,
    pub buffer_size: Option<u32>,
}

impl SubscribeByIdRequest {
    pub fn new(ids: Vec<i32>) -> Self {
        Self {
            ids,
            buffer_size: None,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: u32) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }
}

/// Command one actuator to a value.
#[derive(Debug, Clone)]
pub struct ActuateRequest {
    pub signal: SignalAddress,
    pub value: Value,
}

impl ActuateRequest {
    pub fn new(signal: impl Into<SignalAddress>, value: Value) -> Self {
        Self {
            signal: signal.into(),
            value,
        }
    }
}

/// Command several actuators to one value, all-or-nothing at the stub
/// boundary.
#[derive(Debug, Clone)]
pub struct BatchActuateRequest {
    pub signals: Vec<SignalAddress>,
    pub value: Value,
}

impl BatchActuateRequest {
    pub fn new(signals: Vec<SignalAddress>, value: Value) -> Self {
        Self { signals, value }
    }
}

/// List metadata of signals under `root` matching `filter`.
#[derive(Debug, Clone)]
pub struct ListMetadataRequest {
    pub root: String,
    pub filter: String,
}

impl ListMetadataRequest {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            filter: String::new(),
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Publish a signal value (low-frequency path; providers pushing at high
/// frequency use the provider stream instead).
#[derive(Debug, Clone)]
pub struct PublishValueRequest {
    pub signal: SignalAddress,
    pub datapoint: Datapoint,
}

impl PublishValueRequest {
    pub fn new(signal: impl Into<SignalAddress>, datapoint: Datapoint) -> Self {
        Self {
            signal: signal.into(),
            datapoint,
        }
    }
}
