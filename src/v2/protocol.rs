//! Generation-2 session facade.
//!
//! Ergonomic layer over [`InvokerV2`]: request objects in, typed responses
//! out. Every method is a direct pass-through; the facade adds no error
//! handling of its own.

use std::sync::Arc;

use futures::Stream;
use tracing::debug;

use crate::error::ClientError;
use crate::proto::v2::{
    ActuateResponse, BatchActuateResponse, GetServerInfoResponse, GetValueResponse,
    GetValuesResponse, ListMetadataResponse, OpenProviderStreamRequest,
    OpenProviderStreamResponse, PublishValueResponse, SubscribeByIdResponse, SubscribeResponse,
};
use crate::subscription::Subscription;
use crate::v2::invoker::InvokerV2;
use crate::v2::request::{
    ActuateRequest, BatchActuateRequest, FetchValueRequest, FetchValuesRequest,
    ListMetadataRequest, PublishValueRequest, SubscribeByIdRequest, SubscribeRequest,
};

/// Public generation-2 surface of a connection.
pub struct ProtocolV2 {
    invoker: Arc<InvokerV2>,
}

impl ProtocolV2 {
    pub(crate) fn new(invoker: Arc<InvokerV2>) -> Self {
        Self { invoker }
    }

    /// Read the latest value of one signal.
    pub async fn fetch_value(
        &self,
        request: FetchValueRequest,
    ) -> Result<GetValueResponse, ClientError> {
        self.invoker.fetch_value(request.signal).await
    }

    /// Read the latest values of a set of signals, in request order.
    pub async fn fetch_values(
        &self,
        request: FetchValuesRequest,
    ) -> Result<GetValuesResponse, ClientError> {
        self.invoker.fetch_values(request.signals).await
    }

    /// Register for updates of a set of paths. Delivery starts with the
    /// current snapshot of every requested signal, then streams changes.
    pub async fn subscribe(
        &self,
        request: SubscribeRequest,
    ) -> Result<Subscription<SubscribeResponse>, ClientError> {
        debug!(paths = ?request.paths, "subscribing by path");
        self.invoker
            .subscribe(request.paths, request.buffer_size)
            .await
    }

    /// Register for updates of a set of numeric signal ids.
    pub async fn subscribe_by_id(
        &self,
        request: SubscribeByIdRequest,
    ) -> Result<Subscription<SubscribeByIdResponse>, ClientError> {
        debug!(ids = ?request.ids, "subscribing by id");
        self.invoker
            .subscribe_by_id(request.ids, request.buffer_size)
            .await
    }

    /// Command one actuator.
    pub async fn actuate(&self, request: ActuateRequest) -> Result<ActuateResponse, ClientError> {
        self.invoker.actuate(request.signal, request.value).await
    }

    /// Command several actuators to one value.
    pub async fn batch_actuate(
        &self,
        request: BatchActuateRequest,
    ) -> Result<BatchActuateResponse, ClientError> {
        self.invoker
            .batch_actuate(request.signals, request.value)
            .await
    }

    /// List metadata of signals under a root branch.
    pub async fn list_metadata(
        &self,
        request: ListMetadataRequest,
    ) -> Result<ListMetadataResponse, ClientError> {
        self.invoker
            .list_metadata(&request.root, &request.filter)
            .await
    }

    /// Publish a signal value. Low-frequency path; providers pushing at
    /// high frequency use [`open_provider_stream`](Self::open_provider_stream).
    pub async fn publish_value(
        &self,
        request: PublishValueRequest,
    ) -> Result<PublishValueResponse, ClientError> {
        self.invoker
            .publish_value(request.signal, request.datapoint)
            .await
    }

    /// Open the bidirectional provider stream.
    pub async fn open_provider_stream<S>(
        &self,
        requests: S,
    ) -> Result<Subscription<OpenProviderStreamResponse>, ClientError>
    where
        S: Stream<Item = OpenProviderStreamRequest> + Send + 'static,
    {
        self.invoker.open_provider_stream(requests).await
    }

    /// Broker metadata: name and version.
    pub async fn fetch_server_info(&self) -> Result<GetServerInfoResponse, ClientError> {
        self.invoker.fetch_server_info().await
    }
}
