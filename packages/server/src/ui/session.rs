//! Per-connection room session.
//!
//! One `RoomSession` exists per WebSocket connection. It owns the connection's
//! identity, decodes inbound frames and runs each event through the matching
//! use case while holding the shared event lock. State lives in the presence
//! registry; the session itself only remembers who it is.

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, PusherChannel, UserRecord},
    infrastructure::dto::websocket::{AckDto, ClientEvent, ClientFrame, ServerMessage},
};

use super::state::AppState;

pub struct RoomSession {
    connection_id: ConnectionId,
    /// Direct channel to this connection, used for acknowledgements
    outbound: PusherChannel,
    state: Arc<AppState>,
}

impl RoomSession {
    /// Register a new connection and start its session in the unjoined state.
    pub async fn open(state: Arc<AppState>, outbound: PusherChannel) -> Self {
        let connection_id = state
            .connect_client_usecase
            .execute(outbound.clone())
            .await;
        tracing::info!("New user connected: '{}'", connection_id);

        Self {
            connection_id,
            outbound,
            state,
        }
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    /// Handle one inbound text frame.
    pub async fn handle_text(&self, text: &str) {
        let frame = match ClientFrame::parse(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("Ignoring frame from '{}': {}", self.connection_id, e);
                return;
            }
        };

        let ack = frame.ack;
        match frame.into_event() {
            Ok(event) => {
                let _guard = self.state.event_lock.lock().await;
                self.dispatch(event, ack).await;
            }
            Err(e) => {
                tracing::warn!("Ignoring frame from '{}': {}", self.connection_id, e);
            }
        }
    }

    async fn dispatch(&self, event: ClientEvent, ack: Option<u64>) {
        match event {
            ClientEvent::Join(payload) => {
                match self
                    .state
                    .join_room_usecase
                    .execute(
                        &self.connection_id,
                        payload.name.as_deref(),
                        payload.room.as_deref(),
                    )
                    .await
                {
                    Ok(user) => {
                        tracing::info!(
                            "'{}' joined room '{}' as '{}'",
                            self.connection_id,
                            user.room,
                            user.name
                        );
                        self.acknowledge(ack, None);
                    }
                    Err(e) => {
                        tracing::warn!("Rejected join from '{}': {}", self.connection_id, e);
                        self.acknowledge(ack, Some(e.to_string()));
                    }
                }
            }
            ClientEvent::CreateMessage(payload) => {
                if let Err(e) = self
                    .state
                    .send_message_usecase
                    .execute(&self.connection_id, payload.text.as_deref())
                    .await
                {
                    tracing::debug!("Message from '{}' not sent: {}", self.connection_id, e);
                }
                // Acknowledged whether or not anything was sent
                self.acknowledge(ack, None);
            }
            ClientEvent::CreateLocationMessage(payload) => {
                if let Err(e) = self
                    .state
                    .send_location_usecase
                    .execute(&self.connection_id, payload.latitude, payload.longitude)
                    .await
                {
                    tracing::debug!("Location from '{}' not sent: {}", self.connection_id, e);
                }
            }
        }
    }

    /// Run the disconnect transition. Returns the record that was removed.
    pub async fn close(&self) -> Option<UserRecord> {
        let _guard = self.state.event_lock.lock().await;
        let removed = self
            .state
            .disconnect_client_usecase
            .execute(&self.connection_id)
            .await;

        match &removed {
            Some(user) => tracing::info!("'{}' left room '{}'", user.name, user.room),
            None => tracing::info!("User '{}' disconnected", self.connection_id),
        }
        removed
    }

    fn acknowledge(&self, ack: Option<u64>, error: Option<String>) {
        let Some(id) = ack else {
            return;
        };

        let frame = ServerMessage::Ack(AckDto { id, error });
        match frame.to_json() {
            Ok(json) => {
                if self.outbound.send(json).is_err() {
                    tracing::warn!("Failed to acknowledge frame of '{}'", self.connection_id);
                }
            }
            Err(e) => tracing::error!("Failed to encode ack: {}", e),
        }
    }
}
