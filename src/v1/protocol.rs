//! Generation-1 session facade.
//!
//! Ergonomic layer over [`InvokerV1`]: request objects in, typed responses
//! out. Simple operations are direct pass-throughs; tree operations fan out
//! to one invoker call per leaf. Facade methods add no error handling of
//! their own — invoker errors propagate unchanged.

use std::sync::Arc;

use futures::Stream;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::proto::v1::{
    EntryUpdate, GetResponse, SetResponse, StreamedUpdateRequest, StreamedUpdateResponse,
    SubscribeResponse,
};
use crate::subscription::{Subscription, SubscriptionHandle};
use crate::v1::invoker::InvokerV1;
use crate::v1::request::{
    FetchRequest, SubscribeRequest, TreeFetchRequest, TreeSubscribeRequest, TreeUpdateRequest,
    TreeUpdateResponse, UpdateRequest,
};
use crate::v1::tree::SignalTree;

/// Notified about updates of a subscribed path.
///
/// The push counterpart of consuming a [`Subscription`] directly; both run
/// over the same underlying stream registration.
pub trait PathListener: Send + Sync {
    fn on_entry_changed(&self, updates: Vec<EntryUpdate>);
    fn on_error(&self, error: ClientError);
}

/// Notified with whole updated tree values as subscribed leaves change.
///
/// The tree-typed counterpart of [`PathListener`]: entry updates are applied
/// back onto the tree before notification, so the listener always sees a
/// consistent tree value rather than raw entries.
pub trait TreeListener<T: SignalTree>: Send + Sync {
    fn on_tree_changed(&self, tree: &T);
    fn on_error(&self, error: ClientError);
}

/// Public generation-1 surface of a connection.
pub struct ProtocolV1 {
    invoker: Arc<InvokerV1>,
}

impl ProtocolV1 {
    pub(crate) fn new(invoker: Arc<InvokerV1>) -> Self {
        Self { invoker }
    }

    /// Read one entry.
    pub async fn fetch(&self, request: FetchRequest) -> Result<GetResponse, ClientError> {
        debug!(path = %request.path, "fetching entry");
        self.invoker.fetch(&request.path, &request.fields).await
    }

    /// Read a tree: one fetch for the root path, then each returned entry
    /// applied back onto the tree, producing a new tree value. Entries the
    /// response does not cover stay unchanged.
    pub async fn fetch_tree<T: SignalTree>(
        &self,
        request: TreeFetchRequest<T>,
    ) -> Result<T, ClientError> {
        let root = request.tree.path().to_owned();
        let response = self.invoker.fetch(&root, &request.fields).await?;

        if response.entries.is_empty() {
            warn!(path = %root, "no entries returned for tree fetch");
            return Ok(request.tree);
        }

        let mut tree = request.tree;
        for entry in response.entries {
            match entry.value {
                Some(datapoint) => tree = tree.with_entry(&entry.path, &datapoint),
                None => debug!(path = %entry.path, "entry carries no value, tree node unchanged"),
            }
        }

        Ok(tree)
    }

    /// Replace aspects of one entry.
    pub async fn update(&self, request: UpdateRequest) -> Result<SetResponse, ClientError> {
        debug!(path = %request.path, "updating entry");
        self.invoker
            .update(&request.path, &request.datapoint, &request.fields)
            .await
    }

    /// Write every leaf of a tree: one invoker call per leaf, responses
    /// aggregated in traversal order.
    ///
    /// Compound-operation limitation: the first failing call propagates
    /// immediately and the remaining writes are not issued. Writes already
    /// applied by the broker are not rolled back — the broker keeps
    /// whichever prefix succeeded.
    pub async fn update_tree<T: SignalTree>(
        &self,
        request: TreeUpdateRequest<T>,
    ) -> Result<TreeUpdateResponse, ClientError> {
        let leaves = request.tree.leaves();
        debug!(path = %request.tree.path(), leaves = leaves.len(), "updating tree");

        let mut responses = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            let response = self
                .invoker
                .update(&leaf.path, &leaf.datapoint, &request.fields)
                .await?;
            responses.push(response);
        }

        Ok(TreeUpdateResponse { responses })
    }

    /// Register for updates of a path, consumed as a pull sequence.
    pub async fn subscribe(
        &self,
        request: SubscribeRequest,
    ) -> Result<Subscription<SubscribeResponse>, ClientError> {
        self.invoker.subscribe(&request.path, &request.fields).await
    }

    /// Register for updates of a path, delivered to a listener. The
    /// returned handle cancels the shared stream registration.
    pub async fn subscribe_with_listener(
        &self,
        request: SubscribeRequest,
        listener: Arc<dyn PathListener>,
    ) -> Result<SubscriptionHandle, ClientError> {
        let mut subscription = self.subscribe(request).await?;

        let task = tokio::spawn(async move {
            while let Some(item) = subscription.next().await {
                match item {
                    Ok(response) => listener.on_entry_changed(response.updates),
                    Err(error) => listener.on_error(error),
                }
            }
        });

        Ok(SubscriptionHandle::new(task))
    }

    /// Register for updates of every leaf under a tree's root path,
    /// delivered to the listener as updated tree values.
    ///
    /// Each notification applies the received entry updates onto the
    /// current tree with [`SignalTree::with_entry`] and hands the listener
    /// the result; entries outside the tree leave it unchanged. The
    /// returned handle cancels the stream registration.
    pub async fn subscribe_tree<T: SignalTree + 'static>(
        &self,
        request: TreeSubscribeRequest<T>,
        listener: Arc<dyn TreeListener<T>>,
    ) -> Result<SubscriptionHandle, ClientError> {
        let root = request.tree.path().to_owned();
        debug!(path = %root, "subscribing tree");
        let mut subscription = self.invoker.subscribe(&root, &request.fields).await?;

        let mut tree = request.tree;
        let task = tokio::spawn(async move {
            while let Some(item) = subscription.next().await {
                match item {
                    Ok(response) => {
                        for update in response.updates {
                            let Some(entry) = update.entry else { continue };
                            if let Some(datapoint) = entry.value {
                                tree = tree.with_entry(&entry.path, &datapoint);
                            }
                        }
                        listener.on_tree_changed(&tree);
                    }
                    Err(error) => listener.on_error(error),
                }
            }
        });

        Ok(SubscriptionHandle::new(task))
    }

    /// Open the bidirectional provider update stream.
    pub async fn streamed_update<S>(
        &self,
        updates: S,
    ) -> Result<Subscription<StreamedUpdateResponse>, ClientError>
    where
        S: Stream<Item = StreamedUpdateRequest> + Send + 'static,
    {
        self.invoker.streamed_update(updates).await
    }
}
