//! UseCase テスト用のヘルパー

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessagePusher},
    infrastructure::{
        dto::websocket::ServerMessage, message_pusher::WebSocketMessagePusher,
        repository::InMemoryPresenceRepository,
    },
};

pub(super) const NOW: i64 = 1_700_000_000_000;

pub(super) fn create_test_repository() -> Arc<InMemoryPresenceRepository> {
    Arc::new(InMemoryPresenceRepository::default())
}

pub(super) fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

pub(super) fn connection(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

/// クライアントを MessagePusher に登録し、受信側を返す
pub(super) async fn register(
    pusher: &WebSocketMessagePusher,
    id: &str,
) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    pusher.register_client(connection(id), tx).await;
    rx
}

/// 受信済みのフレームを全て取り出してデコードする
pub(super) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        messages.push(serde_json::from_str(&frame).unwrap());
    }
    messages
}
