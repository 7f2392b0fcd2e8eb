use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};

use super::events::ClientEvent;
use super::hub::{RoomHub, SessionId};
use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(AppState { hub, .. }): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: RoomHub) {
    let (sid, mut events) = hub.connect();
    tracing::info!(%sid, sessions = hub.session_count(), "User connected");

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to encode event");
                    continue;
                }
            };
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_hub = hub.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => {
                    if let Err(e) = dispatch(&recv_hub, sid, text.as_str()) {
                        tracing::warn!(%sid, error = %e, "Ignoring malformed event");
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    hub.disconnect(sid);
    tracing::info!(%sid, "User disconnected");
}

/// Applies one client frame to the hub.
pub fn dispatch(hub: &RoomHub, sid: SessionId, text: &str) -> Result<(), serde_json::Error> {
    match serde_json::from_str::<ClientEvent>(text)? {
        ClientEvent::JoinGroup(group) => {
            let notified = hub.join_group(sid, &group.0);
            tracing::info!(%sid, %group, members = hub.room_size(&group.0), notified, "Joined group");
        }
    }
    Ok(())
}
