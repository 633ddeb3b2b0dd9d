//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{Endpoint, EndpointId, InboundCommand, ServerEvent},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
    usecase::{ChatSession, Handshake, ResolvedIdentity, RouteError, open_session},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub staff: bool,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let endpoint_id = EndpointId::generate();
    let handshake = Handshake {
        token: query.token,
        requests_staff: query.staff,
    };

    // 不正・期限切れのトークンは匿名にフォールバックせず拒否する
    let identity = match state.resolve_identity.execute(&handshake, endpoint_id) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!("Rejecting WebSocket connection: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity, endpoint_id)))
}

/// Spawns a task that drains the endpoint's channel into the WebSocket sink.
///
/// Domain events are converted to wire frames here.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let frame = match serde_json::to_string(&ServerMessage::from(event)) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize outbound event: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

fn parse_command(text: &str) -> Result<InboundCommand, RouteError> {
    let message: ClientMessage =
        serde_json::from_str(text).map_err(|e| RouteError::MalformedEvent(e.to_string()))?;
    InboundCommand::try_from(message).map_err(|e| RouteError::MalformedEvent(e.to_string()))
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    identity: ResolvedIdentity,
    endpoint_id: EndpointId,
) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    // Start draining before connecting so the history snapshot goes out first
    let mut send_task = pusher_loop(rx, sender);

    let session = match open_session(state.chat.clone(), identity, Endpoint::new(endpoint_id, tx))
        .await
    {
        Ok(session) => session,
        Err(e) => {
            // The connect step has already withdrawn this endpoint's presence
            tracing::error!("Failed to open session on endpoint {}: {}", endpoint_id, e);
            send_task.abort();
            return;
        }
    };

    let recv_session: Arc<dyn ChatSession> = session.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let result = match parse_command(&text) {
                        Ok(command) => {
                            tracing::debug!(
                                "'{}' sent {}",
                                recv_session.participant_id(),
                                command.kind()
                            );
                            recv_session.on_message(command).await
                        }
                        Err(e) => Err(e),
                    };
                    if let Err(e) = result {
                        tracing::warn!(
                            "Dropped event from '{}' on endpoint {}: {}",
                            recv_session.participant_id(),
                            recv_session.endpoint_id(),
                            e
                        );
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!(
                        "'{}' requested close of endpoint {}",
                        recv_session.participant_id(),
                        recv_session.endpoint_id()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    session.on_disconnect().await;
}
