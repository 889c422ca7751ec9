//! Request objects for the generation-1 facade.
//!
//! Value types pairing a path (or tree) with field selectors and, for
//! writes, the datapoint payload. Immutable once constructed and never
//! retried internally. Fields default to the current value when
//! unspecified.

use crate::proto::v1::{Datapoint, Field};
use crate::v1::tree::SignalTree;

fn default_fields() -> Vec<Field> {
    vec![Field::Value]
}

/// Read one entry.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub path: String,
    pub fields: Vec<Field>,
}

impl FetchRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fields: default_fields(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }
}

/// Replace aspects of one entry with a new datapoint.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub path: String,
    pub datapoint: Datapoint,
    pub fields: Vec<Field>,
}

impl UpdateRequest {
    pub fn new(path: impl Into<String>, datapoint: Datapoint) -> Self {
        Self {
            path: path.into(),
            datapoint,
            fields: default_fields(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }
}

/// Register for updates of one path.
#[derive(Debug, Clone)]
pub struct SubscribeRequest {
    pub path: String,
    pub fields: Vec<Field>,
}

impl SubscribeRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fields: default_fields(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }
}

/// Read a whole tree and re-apply the response onto it.
#[derive(Debug, Clone)]
pub struct TreeFetchRequest<T: SignalTree> {
    pub tree: T,
    pub fields: Vec<Field>,
}

impl<T: SignalTree> TreeFetchRequest<T> {
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            fields: default_fields(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }
}

/// Register for updates of every leaf of a tree.
#[derive(Debug, Clone)]
pub struct TreeSubscribeRequest<T: SignalTree> {
    pub tree: T,
    pub fields: Vec<Field>,
}

impl<T: SignalTree> TreeSubscribeRequest<T> {
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            fields: default_fields(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }
}

/// Write every leaf of a tree.
#[derive(Debug, Clone)]
pub struct TreeUpdateRequest<T: SignalTree> {
    pub tree: T,
    pub fields: Vec<Field>,
}

impl<T: SignalTree> TreeUpdateRequest<T> {
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            fields: default_fields(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }
}

/// Aggregate of the per-leaf responses of a tree update, in traversal order.
#[derive(Debug, Clone)]
pub struct TreeUpdateResponse {
    pub responses: Vec<crate::proto::v1::SetResponse>,
}
