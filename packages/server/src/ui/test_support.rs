//! UI テスト用のヘルパー

use std::sync::Arc;

use hiroba_shared::time::{Clock, FixedClock};
use tokio::sync::{Mutex, mpsc};

use super::{session::RoomSession, state::AppState};
use crate::{
    domain::{MessagePusher, PresenceRepository},
    infrastructure::{
        dto::websocket::{AckDto, MessageDto, ServerMessage},
        message_pusher::WebSocketMessagePusher,
        repository::InMemoryPresenceRepository,
    },
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetRoomsUseCase, JoinRoomUseCase,
        SendLocationUseCase, SendMessageUseCase,
    },
};

pub(super) const NOW: i64 = 1_700_000_000_000;

/// インメモリ実装と固定時刻で AppState を組み立てる
pub(super) fn create_test_state() -> Arc<AppState> {
    let repository: Arc<dyn PresenceRepository> = Arc::new(InMemoryPresenceRepository::default());
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(NOW));

    Arc::new(AppState {
        connect_client_usecase: Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
        join_room_usecase: Arc::new(JoinRoomUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        send_message_usecase: Arc::new(SendMessageUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        send_location_usecase: Arc::new(SendLocationUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
            repository.clone(),
            message_pusher,
            clock,
        )),
        get_rooms_usecase: Arc::new(GetRoomsUseCase::new(repository)),
        event_lock: Mutex::new(()),
    })
}

/// セッションを開き、そのクライアント宛ての受信側と一緒に返す
pub(super) async fn open(
    state: &Arc<AppState>,
) -> (RoomSession, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RoomSession::open(state.clone(), tx).await, rx)
}

/// 受信済みのフレームを全て取り出してデコードする
pub(super) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        messages.push(serde_json::from_str(&frame).unwrap());
    }
    messages
}

pub(super) fn ack(id: u64, error: Option<&str>) -> ServerMessage {
    ServerMessage::Ack(AckDto {
        id,
        error: error.map(str::to_string),
    })
}

pub(super) fn admin(text: &str) -> ServerMessage {
    ServerMessage::NewMessage(MessageDto {
        from: "Admin".to_string(),
        text: text.to_string(),
        created_at: NOW,
    })
}
