//! Generation-2 invoker: the stub boundary.
//!
//! Same contract as the generation-1 invoker: channel must be READY at
//! construction, credential attached per call, every stub failure rewrapped
//! exactly once as [`ClientError::Broker`] with the status label preserved
//! in the message.

use futures::Stream;
use tracing::debug;

use crate::auth::{authorized, AuthToken, TokenCell};
use crate::channel::{ChannelState, SignalChannel};
use crate::error::ClientError;
use crate::proto::v2::broker_client::BrokerClient;
use crate::proto::v2::{
    ActuateRequest, ActuateResponse, BatchActuateRequest, BatchActuateResponse, Datapoint,
    GetServerInfoRequest, GetServerInfoResponse, GetValueRequest, GetValueResponse,
    GetValuesRequest, GetValuesResponse,
    ListMetadataRequest, ListMetadataResponse, OpenProviderStreamRequest,
    OpenProviderStreamResponse, PublishValueRequest, PublishValueResponse, SubscribeByIdRequest,
    SubscribeByIdResponse, SubscribeRequest, SubscribeResponse, Value,
};
use crate::subscription::Subscription;
use crate::v2::request::SignalAddress;

/// Direct access to the generation-2 stub over a ready channel.
pub struct InvokerV2 {
    channel: SignalChannel,
    client: BrokerClient<tonic::transport::Channel>,
    token: TokenCell,
}

impl InvokerV2 {
    /// The channel must already be READY; invokers never renegotiate
    /// connection state.
    ///
    /// # Panics
    /// When the channel is not READY — a programming error.
    pub(crate) fn new(channel: &SignalChannel) -> Self {
        assert_eq!(
            channel.state(),
            ChannelState::Ready,
            "channel must be READY before constructing an invoker"
        );

        Self {
            channel: channel.clone(),
            client: BrokerClient::new(channel.transport()),
            token: TokenCell::default(),
        }
    }

    /// Replace the credential used by subsequent calls. Last write wins.
    pub(crate) fn set_token(&self, token: Option<AuthToken>) {
        self.token.set(token);
    }

    /// Latest value of one signal. A signal that exists but has no valid
    /// value comes back as a datapoint with no value set.
    pub async fn fetch_value(&self, signal: SignalAddress) -> Result<GetValueResponse, ClientError> {
        self.channel.ensure_open()?;
        let request = GetValueRequest {
            signal_id: Some(signal.into_proto()),
        };

        let response = self
            .client
            .clone()
            .get_value(authorized(request, &self.token)?)
            .await?;
        Ok(response.into_inner())
    }

    /// Latest values of a set of signals, in request order.
    pub async fn fetch_values(
        &self,
        signals: Vec<SignalAddress>,
    ) -> Result<GetValuesResponse, ClientError> {
        self.channel.ensure_open()?;
        let request = GetValuesRequest {
            signal_ids: signals.into_iter().map(SignalAddress::into_proto).collect(),
        };

        let response = self
            .client
            .clone()
            .get_values(authorized(request, &self.token)?)
            .await?;
        Ok(response.into_inner())
    }

    /// Register for updates of a set of paths.
    ///
    /// The broker answers immediately with the current snapshot of every
    /// requested signal (an explicit empty datapoint for signals without a
    /// value), then streams changes in send order. `buffer_size` bounds the
    /// update buffer; when the consumer lags, the oldest buffered update is
    /// dropped to admit the newest.
    pub async fn subscribe(
        &self,
        paths: Vec<String>,
        buffer_size: Option<u32>,
    ) -> Result<Subscription<SubscribeResponse>, ClientError> {
        self.channel.ensure_open()?;
        let request = SubscribeRequest {
            signal_paths: paths,
            buffer_size: buffer_size.unwrap_or(0),
        };

        let response = self
            .client
            .clone()
            .subscribe(authorized(request, &self.token)?)
            .await?;
        Ok(Subscription::spawn(
            response.into_inner(),
            self.channel.clone(),
            buffer_size.map(|size| size as usize),
        ))
    }

    /// Register for updates of a set of numeric signal ids. Same snapshot
    /// and buffering contract as [`subscribe`](Self::subscribe).
    pub async fn subscribe_by_id(
        &self,
        ids: Vec<i32>,
        buffer_size: Option<u32>,
    ) -> Result<Subscription<SubscribeByIdResponse>, ClientError> {
        self.channel.ensure_open()?;
        let request = SubscribeByIdRequest {
            signal_ids: ids,
            buffer_size: buffer_size.unwrap_or(0),
        };

        let response = self
            .client
            .clone()
            .subscribe_by_id(authorized(request, &self.token)?)
            .await?;
        Ok(Subscription::spawn(
            response.into_inner(),
            self.channel.clone(),
            buffer_size.map(|size| size as usize),
        ))
    }

    /// Command one actuator.
    pub async fn actuate(
        &self,
        signal: SignalAddress,
        value: Value,
    ) -> Result<ActuateResponse, ClientError> {
        self.channel.ensure_open()?;
        let request = ActuateRequest {
            signal_id: Some(signal.into_proto()),
            value: Some(value),
        };

        let response = self
            .client
            .clone()
            .actuate(authorized(request, &self.token)?)
            .await?;
        Ok(response.into_inner())
    }

    /// Command several actuators to one value. All-or-nothing at the stub
    /// boundary: a failed call forwards nothing. Whether a broker applies a
    /// batch partially is a protocol-level contract, not enforced here.
    pub async fn batch_actuate(
        &self,
        signals: Vec<SignalAddress>,
        value: Value,
    ) -> Result<BatchActuateResponse, ClientError> {
        self.channel.ensure_open()?;
        let request = BatchActuateRequest {
            actuate_requests: signals
                .into_iter()
                .map(|signal| ActuateRequest {
                    signal_id: Some(signal.into_proto()),
                    value: Some(value.clone()),
                })
                .collect(),
        };

        let response = self
            .client
            .clone()
            .batch_actuate(authorized(request, &self.token)?)
            .await?;
        Ok(response.into_inner())
    }

    /// Metadata of signals under `root` matching `filter`.
    pub async fn list_metadata(
        &self,
        root: &str,
        filter: &str,
    ) -> Result<ListMetadataResponse, ClientError> {
        self.channel.ensure_open()?;
        let request = ListMetadataRequest {
            root: root.to_owned(),
            filter: filter.to_owned(),
        };

        let response = self
            .client
            .clone()
            .list_metadata(authorized(request, &self.token)?)
            .await?;
        Ok(response.into_inner())
    }

    /// Publish a signal value.
    pub async fn publish_value(
        &self,
        signal: SignalAddress,
        datapoint: Datapoint,
    ) -> Result<PublishValueResponse, ClientError> {
        self.channel.ensure_open()?;
        let request = PublishValueRequest {
            signal_id: Some(signal.into_proto()),
            data_point: Some(datapoint),
        };

        let response = self
            .client
            .clone()
            .publish_value(authorized(request, &self.token)?)
            .await?;
        Ok(response.into_inner())
    }

    /// Open the bidirectional provider stream.
    ///
    /// Claim messages either get a terminal status closing the whole stream
    /// (strict case) or are silently accepted; publish messages produce a
    /// per-signal error record on failure and nothing on success; a
    /// batch-actuate command from the broker expects one accept/reject
    /// response per signal. Per-item errors never end the stream — only a
    /// terminal condition does.
    pub async fn open_provider_stream<S>(
        &self,
        requests: S,
    ) -> Result<Subscription<OpenProviderStreamResponse>, ClientError>
    where
        S: Stream<Item = OpenProviderStreamRequest> + Send + 'static,
    {
        self.channel.ensure_open()?;
        debug!("opening provider stream");
        let response = self
            .client
            .clone()
            .open_provider_stream(authorized(requests, &self.token)?)
            .await?;
        Ok(Subscription::spawn(
            response.into_inner(),
            self.channel.clone(),
            None,
        ))
    }

    /// Broker metadata.
    pub async fn fetch_server_info(&self) -> Result<GetServerInfoResponse, ClientError> {
        self.channel.ensure_open()?;
        let response = self
            .client
            .clone()
            .get_server_info(authorized(GetServerInfoRequest {}, &self.token)?)
            .await?;
        Ok(response.into_inner())
    }
}
