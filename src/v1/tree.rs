//! Signal-tree seam.
//!
//! The concrete tree model describing hierarchies and per-node metadata is
//! an external collaborator; this layer consumes it as plain path/value
//! pairs through the [`SignalTree`] trait. Trees are treated as immutable
//! values: applying a broker response produces a new tree, the original is
//! untouched.

use crate::proto::v1::Datapoint;

/// One leaf signal carrying an actual value. Branch/group nodes never
/// appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalLeaf {
    pub path: String,
    pub datapoint: Datapoint,
}

impl SignalLeaf {
    pub fn new(path: impl Into<String>, datapoint: Datapoint) -> Self {
        Self {
            path: path.into(),
            datapoint,
        }
    }
}

/// A typed hierarchical signal structure, consumed by the facade as
/// path/value pairs.
pub trait SignalTree: Clone + Send + Sync {
    /// The dotted path of the tree's root node.
    fn path(&self) -> &str;

    /// Every leaf signal in traversal order.
    fn leaves(&self) -> Vec<SignalLeaf>;

    /// A copy of the tree with the entry at `path` replaced by `datapoint`.
    /// Unknown paths leave the tree unchanged.
    #[must_use]
    fn with_entry(self, path: &str, datapoint: &Datapoint) -> Self;
}
