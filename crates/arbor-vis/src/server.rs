//! Axum web server exposing the graph document and the run engine.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use arbor_engine::{EngineConfig, EngineStatus, HoldDirection, RunController};
use arbor_graph::{Edge, Graph, Node, NodeId};
use arbor_stepper::AlgorithmState;

/// Shared application state.
pub struct AppState {
    graph: RwLock<Graph>,
    engine: RunController,
}

/// The graph document as it travels over the wire.
///
/// Plain node and edge lists plus the directedness flag. Parsing back into a
/// [`Graph`] re-validates every editing invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDoc {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub directed: bool,
}

impl From<&Graph> for GraphDoc {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
            directed: graph.directed(),
        }
    }
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server over an initial graph document.
    pub fn new(graph: Graph, config: EngineConfig) -> Self {
        Self {
            state: Arc::new(AppState {
                graph: RwLock::new(graph),
                engine: RunController::new(config),
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            // Graph document
            .route("/api/graph", get(graph_handler).put(replace_graph_handler))
            // Run lifecycle
            .route("/api/run", post(run_handler))
            .route("/api/status", get(status_handler))
            .route("/api/log", get(log_handler))
            // Playback controls
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/resume", post(resume_handler))
            .route("/api/playback/cancel", post(cancel_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/speed", post(speed_handler))
            .route("/api/playback/boost", post(boost_handler))
            .route("/api/playback/step", post(step_handler))
            .route("/api/playback/hold", post(hold_handler))
            .route("/api/playback/release", post(release_handler))
            .route("/api/playback/seek", post(seek_handler))
            // WebSocket for real-time updates
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> Result<(), std::io::Error> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await
    }
}

/// Server liveness response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    node_count: usize,
    edge_count: usize,
    phase: String,
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let graph = state.graph.read().await;
    Json(HealthResponse {
        status: "ok",
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        phase: state.engine.phase().to_string(),
    })
}

async fn graph_handler(State(state): State<Arc<AppState>>) -> Json<GraphDoc> {
    let graph = state.graph.read().await;
    Json(GraphDoc::from(&*graph))
}

/// Replace the stored graph document.
///
/// Refused with 409 while a run is active; editing invalidates the recorded
/// timeline, so an accepted replacement resets the engine.
async fn replace_graph_handler(
    State(state): State<Arc<AppState>>,
    Json(doc): Json<GraphDoc>,
) -> Result<Json<GraphDoc>, StatusCode> {
    if state.engine.phase().is_active() {
        return Err(StatusCode::CONFLICT);
    }
    let replacement = Graph::from_parts(doc.nodes, doc.edges, doc.directed).map_err(|err| {
        tracing::warn!(%err, "Rejected graph document");
        StatusCode::UNPROCESSABLE_ENTITY
    })?;

    state.engine.reset().await;
    let mut graph = state.graph.write().await;
    *graph = replacement;
    Ok(Json(GraphDoc::from(&*graph)))
}

#[derive(Default, Deserialize)]
struct RunRequest {
    /// Source node id; defaults to the first node in the document.
    source: Option<u64>,
}

#[derive(Serialize)]
struct RunResponse {
    started: bool,
    status: EngineStatus,
}

async fn run_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RunRequest>>,
) -> Result<Json<RunResponse>, StatusCode> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let graph = state.graph.read().await;

    let source = match req.source.map(NodeId).or_else(|| first_node(&graph)) {
        Some(source) => source,
        None => {
            // Empty graph; report the refusal without an error.
            return Ok(Json(RunResponse {
                started: false,
                status: state.engine.status(),
            }));
        }
    };

    let started = state
        .engine
        .begin_run(graph.nodes(), graph.edges(), graph.directed(), source)
        .await
        .map_err(|err| {
            tracing::warn!(%err, "Rejected run request");
            StatusCode::UNPROCESSABLE_ENTITY
        })?;

    Ok(Json(RunResponse {
        started,
        status: state.engine.status(),
    }))
}

fn first_node(graph: &Graph) -> Option<NodeId> {
    graph.nodes().first().map(|n| n.id)
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<EngineStatus> {
    Json(state.engine.status())
}

async fn log_handler(State(state): State<Arc<AppState>>) -> Json<Vec<AlgorithmState>> {
    Json(state.engine.log().await)
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<EngineStatus> {
    state.engine.pause();
    Json(state.engine.status())
}

async fn resume_handler(State(state): State<Arc<AppState>>) -> Json<EngineStatus> {
    state.engine.resume();
    Json(state.engine.status())
}

async fn cancel_handler(State(state): State<Arc<AppState>>) -> Json<EngineStatus> {
    state.engine.cancel();
    Json(state.engine.status())
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<EngineStatus> {
    state.engine.reset().await;
    Json(state.engine.status())
}

#[derive(Deserialize)]
struct SpeedRequest {
    multiplier: u32,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Json<EngineStatus> {
    state.engine.set_speed_multiplier(req.multiplier);
    Json(state.engine.status())
}

#[derive(Deserialize)]
struct BoostRequest {
    active: bool,
}

async fn boost_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BoostRequest>,
) -> Json<EngineStatus> {
    state.engine.set_boost(req.active);
    Json(state.engine.status())
}

#[derive(Deserialize)]
struct StepRequest {
    direction: HoldDirection,
}

async fn step_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StepRequest>,
) -> Json<EngineStatus> {
    state.engine.step(req.direction).await;
    Json(state.engine.status())
}

#[derive(Deserialize)]
struct HoldRequest {
    direction: HoldDirection,
}

async fn hold_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HoldRequest>,
) -> Json<EngineStatus> {
    state.engine.hold(req.direction).await;
    Json(state.engine.status())
}

async fn release_handler(State(state): State<Arc<AppState>>) -> Json<EngineStatus> {
    state.engine.release_hold().await;
    Json(state.engine.status())
}

#[derive(Deserialize)]
struct SeekRequest {
    index: usize,
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Json<EngineStatus> {
    state.engine.seek(req.index).await;
    Json(state.engine.status())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Push every status change to the client and apply incoming commands.
///
/// Command effects are not answered directly; anything a command changes
/// arrives through the status push like every other update.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut status_rx = state.engine.subscribe();

    // Greet with the current status so the client can render immediately.
    let current = status_rx.borrow_and_update().clone();
    if !send_status(&mut socket, &current).await {
        return;
    }

    loop {
        tokio::select! {
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = status_rx.borrow_and_update().clone();
                if !send_status(&mut socket, &status).await {
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Ok(cmd) = serde_json::from_str::<WsCommand>(&text) {
                            handle_ws_command(&state, cmd).await;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

async fn send_status(socket: &mut WebSocket, status: &EngineStatus) -> bool {
    match serde_json::to_string(status) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(_) => false,
    }
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum WsCommand {
    #[serde(rename = "run")]
    Run { source: Option<u64> },
    #[serde(rename = "pause")]
    Pause,
    #[serde(rename = "resume")]
    Resume,
    #[serde(rename = "cancel")]
    Cancel,
    #[serde(rename = "reset")]
    Reset,
    #[serde(rename = "step")]
    Step { direction: HoldDirection },
    #[serde(rename = "hold")]
    Hold { direction: HoldDirection },
    #[serde(rename = "release")]
    Release,
    #[serde(rename = "seek")]
    Seek { index: usize },
    #[serde(rename = "speed")]
    Speed { multiplier: u32 },
    #[serde(rename = "boost")]
    Boost { active: bool },
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) {
    match cmd {
        WsCommand::Run { source } => {
            let graph = state.graph.read().await;
            let Some(source) = source.map(NodeId).or_else(|| first_node(&graph)) else {
                return;
            };
            let begun = state
                .engine
                .begin_run(graph.nodes(), graph.edges(), graph.directed(), source)
                .await;
            if let Err(err) = begun {
                tracing::warn!(%err, "Rejected run command");
            }
        }
        WsCommand::Pause => state.engine.pause(),
        WsCommand::Resume => state.engine.resume(),
        WsCommand::Cancel => state.engine.cancel(),
        WsCommand::Reset => state.engine.reset().await,
        WsCommand::Step { direction } => {
            state.engine.step(direction).await;
        }
        WsCommand::Hold { direction } => state.engine.hold(direction).await,
        WsCommand::Release => state.engine.release_hold().await,
        WsCommand::Seek { index } => {
            state.engine.seek(index).await;
        }
        WsCommand::Speed { multiplier } => state.engine.set_speed_multiplier(multiplier),
        WsCommand::Boost { active } => state.engine.set_boost(active),
    }
}
