//! In-process mock broker shared by the integration tests.
//!
//! Implements both generated broker services over a duplex transport, so
//! every test runs against a real tonic client/server pair without opening
//! a socket. State is seeded per test; counters expose what the broker saw.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::{Stream, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::{Endpoint, Server, Uri};
use tonic::{Request, Response, Status, Streaming};

use databroker_client::proto::v1 as pv1;
use databroker_client::proto::v2 as pv2;
use databroker_client::SignalChannel;

// =============================================================================
// Broker state
// =============================================================================

#[derive(Debug, Clone, Default)]
struct V1Entry {
    value: Option<pv1::Datapoint>,
    actuator_target: Option<pv1::Datapoint>,
}

#[derive(Debug, Clone)]
struct V2Signal {
    id: i32,
    data_type: pv2::DataType,
    datapoint: Option<pv2::Datapoint>,
}

pub struct BrokerState {
    expected_auth: Option<String>,
    v1_entries: Mutex<HashMap<String, V1Entry>>,
    v2_signals: Mutex<HashMap<String, V2Signal>>,
    set_calls: AtomicUsize,
    actuate_calls: AtomicUsize,
    v1_tx: broadcast::Sender<pv1::EntryUpdate>,
    v2_tx: broadcast::Sender<(String, pv2::Datapoint)>,
}

impl BrokerState {
    pub fn new() -> Self {
        let (v1_tx, _) = broadcast::channel(64);
        let (v2_tx, _) = broadcast::channel(64);
        Self {
            expected_auth: None,
            v1_entries: Mutex::new(HashMap::new()),
            v2_signals: Mutex::new(HashMap::new()),
            set_calls: AtomicUsize::new(0),
            actuate_calls: AtomicUsize::new(0),
            v1_tx,
            v2_tx,
        }
    }

    /// Require this exact `authorization` header value on every call.
    pub fn with_auth(mut self, header_value: impl Into<String>) -> Self {
        self.expected_auth = Some(header_value.into());
        self
    }

    pub fn with_v1_entry(self, path: impl Into<String>, value: Option<pv1::Datapoint>) -> Self {
        self.v1_entries.lock().unwrap().insert(
            path.into(),
            V1Entry {
                value,
                actuator_target: None,
            },
        );
        self
    }

    pub fn with_v2_signal(
        self,
        id: i32,
        path: impl Into<String>,
        data_type: pv2::DataType,
        datapoint: Option<pv2::Datapoint>,
    ) -> Self {
        self.v2_signals.lock().unwrap().insert(
            path.into(),
            V2Signal {
                id,
                data_type,
                datapoint,
            },
        );
        self
    }

    /// Number of generation-1 Set calls received.
    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    /// Number of actuations received (single and batched, per signal).
    pub fn actuate_calls(&self) -> usize {
        self.actuate_calls.load(Ordering::SeqCst)
    }

    pub fn v1_actuator_target(&self, path: &str) -> Option<pv1::Datapoint> {
        self.v1_entries
            .lock()
            .unwrap()
            .get(path)
            .and_then(|entry| entry.actuator_target.clone())
    }

    fn check_auth(&self, metadata: &tonic::metadata::MetadataMap) -> Result<(), Status> {
        let Some(expected) = &self.expected_auth else {
            return Ok(());
        };
        match metadata.get("authorization").and_then(|v| v.to_str().ok()) {
            Some(value) if value == expected => Ok(()),
            _ => Err(Status::unauthenticated("missing or invalid credential")),
        }
    }

    fn resolve_path(&self, signal: &pv2::SignalId) -> Result<String, Status> {
        let signals = self.v2_signals.lock().unwrap();
        match &signal.signal {
            Some(pv2::signal_id::Signal::Path(path)) => {
                if signals.contains_key(path) {
                    Ok(path.clone())
                } else {
                    Err(Status::not_found(format!("no signal {path}")))
                }
            }
            Some(pv2::signal_id::Signal::Id(id)) => signals
                .iter()
                .find(|(_, signal)| signal.id == *id)
                .map(|(path, _)| path.clone())
                .ok_or_else(|| Status::not_found(format!("no signal with id {id}"))),
            None => Err(Status::invalid_argument("empty signal id")),
        }
    }

    fn publish_v2(&self, path: &str, datapoint: pv2::Datapoint) -> Result<(), Status> {
        {
            let mut signals = self.v2_signals.lock().unwrap();
            let signal = signals
                .get_mut(path)
                .ok_or_else(|| Status::not_found(format!("no signal {path}")))?;
            if let Some(value) = &datapoint.value {
                if !matches_type(value, signal.data_type) {
                    return Err(Status::invalid_argument(format!(
                        "value type does not match signal type of {path}"
                    )));
                }
            }
            signal.datapoint = Some(datapoint.clone());
        }
        let _ = self.v2_tx.send((path.to_owned(), datapoint));
        Ok(())
    }
}

fn matches_type(value: &pv2::Value, data_type: pv2::DataType) -> bool {
    use pv2::value::TypedValue;
    matches!(
        (&value.typed_value, data_type),
        (Some(TypedValue::String(_)), pv2::DataType::String)
            | (Some(TypedValue::Bool(_)), pv2::DataType::Boolean)
            | (Some(TypedValue::Int32(_)), pv2::DataType::Int32)
            | (Some(TypedValue::Int64(_)), pv2::DataType::Int64)
            | (Some(TypedValue::Uint32(_)), pv2::DataType::Uint32)
            | (Some(TypedValue::Uint64(_)), pv2::DataType::Uint64)
            | (Some(TypedValue::Float(_)), pv2::DataType::Float)
            | (Some(TypedValue::Double(_)), pv2::DataType::Double)
            | (Some(TypedValue::StringArray(_)), pv2::DataType::StringArray)
    )
}

// =============================================================================
// Generation-1 service
// =============================================================================

struct MockV1 {
    state: Arc<BrokerState>,
}

#[tonic::async_trait]
impl pv1::broker_server::Broker for MockV1 {
    async fn get(
        &self,
        request: Request<pv1::GetRequest>,
    ) -> Result<Response<pv1::GetResponse>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();

        let entries = self.state.v1_entries.lock().unwrap();
        let mut out = Vec::new();
        for entry_request in req.entries {
            // Exact match or branch prefix, so tree fetches resolve too.
            let prefix = format!("{}.", entry_request.path);
            let mut matched = false;
            for (path, entry) in entries.iter() {
                if *path == entry_request.path || path.starts_with(&prefix) {
                    matched = true;
                    out.push(pv1::DataEntry {
                        path: path.clone(),
                        value: entry.value.clone(),
                        actuator_target: entry.actuator_target.clone(),
                        metadata: None,
                    });
                }
            }
            if !matched {
                return Err(Status::not_found(format!(
                    "no entry {}",
                    entry_request.path
                )));
            }
        }
        out.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Response::new(pv1::GetResponse {
            entries: out,
            errors: Vec::new(),
            error: None,
        }))
    }

    async fn set(
        &self,
        request: Request<pv1::SetRequest>,
    ) -> Result<Response<pv1::SetResponse>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();
        self.state.set_calls.fetch_add(1, Ordering::SeqCst);

        for update in req.updates {
            apply_v1_update(&self.state, &update)?;
            let _ = self.state.v1_tx.send(update);
        }

        Ok(Response::new(pv1::SetResponse::default()))
    }

    type SubscribeStream =
        Pin<Box<dyn Stream<Item = Result<pv1::SubscribeResponse, Status>> + Send + 'static>>;

    async fn subscribe(
        &self,
        request: Request<pv1::SubscribeRequest>,
    ) -> Result<Response<Self::SubscribeStream>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();

        let mut updates_rx = self.state.v1_tx.subscribe();
        // Subscribing a branch path covers its leaf entries, like Get.
        let snapshot = {
            let entries = self.state.v1_entries.lock().unwrap();
            let mut updates = Vec::new();
            for entry in &req.entries {
                let prefix = format!("{}.", entry.path);
                let mut matched = false;
                for (path, stored) in entries.iter() {
                    if *path == entry.path || path.starts_with(&prefix) {
                        matched = true;
                        updates.push(pv1::EntryUpdate {
                            entry: Some(pv1::DataEntry {
                                path: path.clone(),
                                value: stored.value.clone(),
                                actuator_target: stored.actuator_target.clone(),
                                metadata: None,
                            }),
                            fields: entry.fields.clone(),
                        });
                    }
                }
                if !matched {
                    return Err(Status::not_found(format!("no entry {}", entry.path)));
                }
            }
            updates.sort_by(|a, b| {
                let left = a.entry.as_ref().map(|e| e.path.as_str()).unwrap_or("");
                let right = b.entry.as_ref().map(|e| e.path.as_str()).unwrap_or("");
                left.cmp(right)
            });
            updates
        };
        let paths: HashSet<String> = req.entries.iter().map(|e| e.path.clone()).collect();

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            if tx
                .send(Ok(pv1::SubscribeResponse { updates: snapshot }))
                .await
                .is_err()
            {
                return;
            }
            while let Ok(update) = updates_rx.recv().await {
                let matches = update.entry.as_ref().is_some_and(|entry| {
                    paths.contains(&entry.path)
                        || paths
                            .iter()
                            .any(|root| entry.path.starts_with(&format!("{root}.")))
                });
                if matches {
                    let response = pv1::SubscribeResponse {
                        updates: vec![update],
                    };
                    if tx.send(Ok(response)).await.is_err() {
                        return;
                    }
                }
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }

    type StreamedUpdateStream =
        Pin<Box<dyn Stream<Item = Result<pv1::StreamedUpdateResponse, Status>> + Send + 'static>>;

    async fn streamed_update(
        &self,
        request: Request<Streaming<pv1::StreamedUpdateRequest>>,
    ) -> Result<Response<Self::StreamedUpdateStream>, Status> {
        self.state.check_auth(request.metadata())?;
        let mut inbound = request.into_inner();
        let state = Arc::clone(&self.state);

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            while let Some(message) = inbound.next().await {
                let Ok(message) = message else { return };
                let mut response = pv1::StreamedUpdateResponse::default();
                for update in message.updates {
                    if let Err(status) = apply_v1_update(&state, &update) {
                        response.errors.push(pv1::DataEntryError {
                            path: update
                                .entry
                                .as_ref()
                                .map(|e| e.path.clone())
                                .unwrap_or_default(),
                            error: Some(pv1::Error {
                                code: 404,
                                reason: "not_found".to_owned(),
                                message: status.message().to_owned(),
                            }),
                        });
                    } else {
                        let _ = state.v1_tx.send(update);
                    }
                }
                if tx.send(Ok(response)).await.is_err() {
                    return;
                }
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }
}

fn apply_v1_update(state: &BrokerState, update: &pv1::EntryUpdate) -> Result<(), Status> {
    let Some(data_entry) = &update.entry else {
        return Err(Status::invalid_argument("update carries no entry"));
    };

    let mut entries = state.v1_entries.lock().unwrap();
    let stored = entries
        .get_mut(&data_entry.path)
        .ok_or_else(|| Status::not_found(format!("no entry {}", data_entry.path)))?;

    for field in &update.fields {
        match pv1::Field::try_from(*field) {
            Ok(pv1::Field::ActuatorTarget) => {
                stored.actuator_target = data_entry.actuator_target.clone();
            }
            _ => {
                if data_entry.value.is_some() {
                    stored.value = data_entry.value.clone();
                }
            }
        }
    }
    Ok(())
}

// =============================================================================
// Generation-2 service
// =============================================================================

struct MockV2 {
    state: Arc<BrokerState>,
}

#[tonic::async_trait]
impl pv2::broker_server::Broker for MockV2 {
    async fn get_value(
        &self,
        request: Request<pv2::GetValueRequest>,
    ) -> Result<Response<pv2::GetValueResponse>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();
        let signal = req
            .signal_id
            .ok_or_else(|| Status::invalid_argument("missing signal id"))?;
        let path = self.state.resolve_path(&signal)?;

        let signals = self.state.v2_signals.lock().unwrap();
        let data_point = signals[&path].datapoint.clone().unwrap_or_default();
        Ok(Response::new(pv2::GetValueResponse {
            data_point: Some(data_point),
        }))
    }

    async fn get_values(
        &self,
        request: Request<pv2::GetValuesRequest>,
    ) -> Result<Response<pv2::GetValuesResponse>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();

        let mut data_points = Vec::with_capacity(req.signal_ids.len());
        for signal in req.signal_ids {
            let path = self.state.resolve_path(&signal)?;
            let signals = self.state.v2_signals.lock().unwrap();
            data_points.push(signals[&path].datapoint.clone().unwrap_or_default());
        }
        Ok(Response::new(pv2::GetValuesResponse { data_points }))
    }

    type SubscribeStream =
        Pin<Box<dyn Stream<Item = Result<pv2::SubscribeResponse, Status>> + Send + 'static>>;

    async fn subscribe(
        &self,
        request: Request<pv2::SubscribeRequest>,
    ) -> Result<Response<Self::SubscribeStream>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();

        let mut updates_rx = self.state.v2_tx.subscribe();
        let snapshot = {
            let signals = self.state.v2_signals.lock().unwrap();
            let mut entries = HashMap::new();
            for path in &req.signal_paths {
                let signal = signals
                    .get(path)
                    .ok_or_else(|| Status::not_found(format!("no signal {path}")))?;
                // Valueless signals still appear in the snapshot, as an
                // explicit empty datapoint.
                entries.insert(path.clone(), signal.datapoint.clone().unwrap_or_default());
            }
            entries
        };
        let paths: HashSet<String> = req.signal_paths.into_iter().collect();

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            if tx
                .send(Ok(pv2::SubscribeResponse { entries: snapshot }))
                .await
                .is_err()
            {
                return;
            }
            while let Ok((path, datapoint)) = updates_rx.recv().await {
                if paths.contains(&path) {
                    let response = pv2::SubscribeResponse {
                        entries: HashMap::from([(path, datapoint)]),
                    };
                    if tx.send(Ok(response)).await.is_err() {
                        return;
                    }
                }
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }

    type SubscribeByIdStream =
        Pin<Box<dyn Stream<Item = Result<pv2::SubscribeByIdResponse, Status>> + Send + 'static>>;

    async fn subscribe_by_id(
        &self,
        request: Request<pv2::SubscribeByIdRequest>,
    ) -> Result<Response<Self::SubscribeByIdStream>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();

        let mut updates_rx = self.state.v2_tx.subscribe();
        let (snapshot, id_by_path) = {
            let signals = self.state.v2_signals.lock().unwrap();
            let mut entries = HashMap::new();
            let mut id_by_path = HashMap::new();
            for id in &req.signal_ids {
                let (path, signal) = signals
                    .iter()
                    .find(|(_, signal)| signal.id == *id)
                    .ok_or_else(|| Status::not_found(format!("no signal with id {id}")))?;
                entries.insert(*id, signal.datapoint.clone().unwrap_or_default());
                id_by_path.insert(path.clone(), *id);
            }
            (entries, id_by_path)
        };

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            if tx
                .send(Ok(pv2::SubscribeByIdResponse { entries: snapshot }))
                .await
                .is_err()
            {
                return;
            }
            while let Ok((path, datapoint)) = updates_rx.recv().await {
                if let Some(id) = id_by_path.get(&path) {
                    let response = pv2::SubscribeByIdResponse {
                        entries: HashMap::from([(*id, datapoint)]),
                    };
                    if tx.send(Ok(response)).await.is_err() {
                        return;
                    }
                }
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }

    async fn actuate(
        &self,
        request: Request<pv2::ActuateRequest>,
    ) -> Result<Response<pv2::ActuateResponse>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();
        let signal = req
            .signal_id
            .ok_or_else(|| Status::invalid_argument("missing signal id"))?;
        let _ = self.state.resolve_path(&signal)?;
        self.state.actuate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Response::new(pv2::ActuateResponse {}))
    }

    async fn batch_actuate(
        &self,
        request: Request<pv2::BatchActuateRequest>,
    ) -> Result<Response<pv2::BatchActuateResponse>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();
        for actuate in req.actuate_requests {
            let signal = actuate
                .signal_id
                .ok_or_else(|| Status::invalid_argument("missing signal id"))?;
            let _ = self.state.resolve_path(&signal)?;
            self.state.actuate_calls.fetch_add(1, Ordering::SeqCst);
        }
        Ok(Response::new(pv2::BatchActuateResponse {}))
    }

    async fn list_metadata(
        &self,
        request: Request<pv2::ListMetadataRequest>,
    ) -> Result<Response<pv2::ListMetadataResponse>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();

        let signals = self.state.v2_signals.lock().unwrap();
        let mut metadata: Vec<pv2::Metadata> = signals
            .iter()
            .filter(|(path, _)| path.starts_with(&req.root))
            .map(|(path, signal)| pv2::Metadata {
                id: signal.id,
                path: path.clone(),
                data_type: signal.data_type as i32,
                description: String::new(),
                unit: String::new(),
            })
            .collect();
        metadata.sort_by_key(|m| m.id);

        Ok(Response::new(pv2::ListMetadataResponse { metadata }))
    }

    async fn publish_value(
        &self,
        request: Request<pv2::PublishValueRequest>,
    ) -> Result<Response<pv2::PublishValueResponse>, Status> {
        self.state.check_auth(request.metadata())?;
        let req = request.into_inner();
        let signal = req
            .signal_id
            .ok_or_else(|| Status::invalid_argument("missing signal id"))?;
        let path = self.state.resolve_path(&signal)?;
        let datapoint = req
            .data_point
            .ok_or_else(|| Status::invalid_argument("missing datapoint"))?;

        self.state.publish_v2(&path, datapoint)?;
        Ok(Response::new(pv2::PublishValueResponse {}))
    }

    type OpenProviderStreamStream = Pin<
        Box<dyn Stream<Item = Result<pv2::OpenProviderStreamResponse, Status>> + Send + 'static>,
    >;

    async fn open_provider_stream(
        &self,
        request: Request<Streaming<pv2::OpenProviderStreamRequest>>,
    ) -> Result<Response<Self::OpenProviderStreamStream>, Status> {
        self.state.check_auth(request.metadata())?;
        let mut inbound = request.into_inner();
        let state = Arc::clone(&self.state);

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            use pv2::open_provider_stream_request::Action as RequestAction;
            use pv2::open_provider_stream_response::Action as ResponseAction;

            while let Some(message) = inbound.next().await {
                let Ok(message) = message else { return };
                match message.action {
                    Some(RequestAction::ProvideActuationRequest(claim)) => {
                        // An unknown actuator in a claim is terminal for the
                        // whole stream.
                        for signal in &claim.actuator_identifiers {
                            if let Err(status) = state.resolve_path(signal) {
                                let _ = tx.send(Err(status)).await;
                                return;
                            }
                        }
                        let response = pv2::OpenProviderStreamResponse {
                            action: Some(ResponseAction::ProvideActuationResponse(
                                pv2::ProvideActuationResponse {},
                            )),
                        };
                        if tx.send(Ok(response)).await.is_err() {
                            return;
                        }
                    }
                    Some(RequestAction::PublishValuesRequest(publish)) => {
                        let mut status = HashMap::new();
                        for (id, datapoint) in publish.data_points {
                            let result = state
                                .resolve_path(&pv2::SignalId {
                                    signal: Some(pv2::signal_id::Signal::Id(id)),
                                })
                                .and_then(|path| state.publish_v2(&path, datapoint));
                            if let Err(error) = result {
                                let code = match error.code() {
                                    tonic::Code::InvalidArgument => {
                                        pv2::ErrorCode::InvalidArgument
                                    }
                                    _ => pv2::ErrorCode::NotFound,
                                };
                                status.insert(
                                    id,
                                    pv2::Error {
                                        code: code as i32,
                                        message: error.message().to_owned(),
                                    },
                                );
                            }
                        }
                        // Successful publishes are acknowledged by silence;
                        // only failures produce a response record.
                        if !status.is_empty() {
                            let response = pv2::OpenProviderStreamResponse {
                                action: Some(ResponseAction::PublishValuesResponse(
                                    pv2::PublishValuesResponse {
                                        request_id: publish.request_id,
                                        status,
                                    },
                                )),
                            };
                            if tx.send(Ok(response)).await.is_err() {
                                return;
                            }
                        }
                    }
                    Some(RequestAction::BatchActuateStreamResponse(_)) | None => {}
                }
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }

    async fn get_server_info(
        &self,
        request: Request<pv2::GetServerInfoRequest>,
    ) -> Result<Response<pv2::GetServerInfoResponse>, Status> {
        self.state.check_auth(request.metadata())?;
        Ok(Response::new(pv2::GetServerInfoResponse {
            name: "mock-databroker".to_owned(),
            version: "0.1.0".to_owned(),
            commit_hash: String::new(),
        }))
    }
}

// =============================================================================
// Harness
// =============================================================================

/// Serve both broker generations over an in-process duplex transport and
/// hand back a READY channel pointing at them.
pub async fn start_broker(state: Arc<BrokerState>) -> SignalChannel {
    let (client_io, server_io) = tokio::io::duplex(64 * 1024);

    tokio::spawn({
        let state = Arc::clone(&state);
        async move {
            let incoming = tokio_stream::once(Ok::<_, std::io::Error>(server_io));
            let _ = Server::builder()
                .add_service(pv1::broker_server::BrokerServer::new(MockV1 {
                    state: Arc::clone(&state),
                }))
                .add_service(pv2::broker_server::BrokerServer::new(MockV2 { state }))
                .serve_with_incoming(incoming)
                .await;
        }
    });

    let mut client_io = Some(client_io);
    let transport = Endpoint::try_from("http://mock.broker")
        .expect("static endpoint uri")
        .connect_with_connector(tower::service_fn(move |_: Uri| {
            let io = client_io.take();
            async move {
                io.ok_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "transport already taken")
                })
            }
        }))
        .await
        .expect("connect to in-process broker");

    SignalChannel::ready(transport)
}

// =============================================================================
// Datapoint helpers
// =============================================================================

pub fn v1_float(value: f32) -> pv1::Datapoint {
    pv1::Datapoint {
        timestamp: None,
        value: Some(pv1::datapoint::Value::Float(value)),
    }
}

pub fn v1_uint(value: u32) -> pv1::Datapoint {
    pv1::Datapoint {
        timestamp: None,
        value: Some(pv1::datapoint::Value::Uint32(value)),
    }
}

pub fn v2_float_value(value: f32) -> pv2::Value {
    pv2::Value {
        typed_value: Some(pv2::value::TypedValue::Float(value)),
    }
}

pub fn v2_float(value: f32) -> pv2::Datapoint {
    pv2::Datapoint {
        timestamp: None,
        value: Some(v2_float_value(value)),
    }
}

pub fn v2_string(value: &str) -> pv2::Datapoint {
    pv2::Datapoint {
        timestamp: None,
        value: Some(pv2::Value {
            typed_value: Some(pv2::value::TypedValue::String(value.to_owned())),
        }),
    }
}
