//! Generation-1 invoker: the stub boundary.
//!
//! Translates fetch/update/subscribe intents into calls on the generated
//! stub, attaching the credential to every outbound request and rewrapping
//! each stub failure exactly once as [`ClientError::Broker`]. Owns nothing
//! but a clone of the shared channel and the token cell; the channel's
//! lifecycle belongs to the connection.

use futures::Stream;

use crate::auth::{authorized, AuthToken, TokenCell};
use crate::channel::{ChannelState, SignalChannel};
use crate::error::ClientError;
use crate::proto::v1::broker_client::BrokerClient;
use crate::proto::v1::{
    DataEntry, Datapoint, EntryRequest, EntryUpdate, Field, GetRequest, GetResponse, SetRequest,
    SetResponse, StreamedUpdateRequest, StreamedUpdateResponse, SubscribeEntry, SubscribeRequest,
    SubscribeResponse,
};
use crate::subscription::Subscription;

fn encode_fields(fields: &[Field]) -> Vec<i32> {
    fields.iter().map(|field| *field as i32).collect()
}

/// Direct access to the generation-1 stub over a ready channel.
pub struct InvokerV1 {
    channel: SignalChannel,
    client: BrokerClient<tonic::transport::Channel>,
    token: TokenCell,
}

impl InvokerV1 {
    /// The channel must already be READY; invokers never renegotiate
    /// connection state.
    ///
    /// # Panics
    /// When the channel is not READY — that is a programming error, not a
    /// runtime condition to recover from.
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

    /// Read the entry at `path`, selecting `fields`.
    pub async fn fetch(&self, path: &str, fields: &[Field]) -> Result<GetResponse, ClientError> {
        self.channel.ensure_open()?;
        let request = GetRequest {
            entries: vec![EntryRequest {
                path: path.to_owned(),
                view: 0,
                fields: encode_fields(fields),
            }],
        };

        let response = self
            .client
            .clone()
            .get(authorized(request, &self.token)?)
            .await?;
        Ok(response.into_inner())
    }

    /// Replace the selected `fields` of the entry at `path` with
    /// `datapoint` — one entry update per field in a single call. An
    /// actuator-target field routes the datapoint to the target slot, every
    /// other field to the value slot.
    pub async fn update(
        &self,
        path: &str,
        datapoint: &Datapoint,
        fields: &[Field],
    ) -> Result<SetResponse, ClientError> {
        self.channel.ensure_open()?;
        let updates = fields
            .iter()
            .map(|field| {
                let mut entry = DataEntry {
                    path: path.to_owned(),
                    ..Default::default()
                };
                match field {
                    Field::ActuatorTarget => entry.actuator_target = Some(datapoint.clone()),
                    _ => entry.value = Some(datapoint.clone()),
                }
                EntryUpdate {
                    entry: Some(entry),
                    fields: vec![*field as i32],
                }
            })
            .collect();

        let response = self
            .client
            .clone()
            .set(authorized(SetRequest { updates }, &self.token)?)
            .await?;
        Ok(response.into_inner())
    }

    /// Register for updates of `path`. No explicit buffer control in this
    /// generation; default stub behavior applies.
    pub async fn subscribe(
        &self,
        path: &str,
        fields: &[Field],
    ) -> Result<Subscription<SubscribeResponse>, ClientError> {
        self.channel.ensure_open()?;
        let request = SubscribeRequest {
            entries: vec![SubscribeEntry {
                path: path.to_owned(),
                view: 0,
                fields: encode_fields(fields),
            }],
        };

        let response = self
            .client
            .clone()
            .subscribe(authorized(request, &self.token)?)
            .await?;
        Ok(Subscription::spawn(
            response.into_inner(),
            self.channel.clone(),
            None,
        ))
    }

    /// Open the bidirectional update stream used by providers to push
    /// entry updates continuously.
    pub async fn streamed_update<S>(
        &self,
        updates: S,
    ) -> Result<Subscription<StreamedUpdateResponse>, ClientError>
    where
        S: Stream<Item = StreamedUpdateRequest> + Send + 'static,
    {
        self.channel.ensure_open()?;
        let response = self
            .client
            .clone()
            .streamed_update(authorized(updates, &self.token)?)
            .await?;
        Ok(Subscription::spawn(
            response.into_inner(),
            self.channel.clone(),
            None,
        ))
    }
}
