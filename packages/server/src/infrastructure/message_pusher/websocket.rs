//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket 接続ごとの `UnboundedSender` を管理
//! - 接続とルームの対応（ルームグループ）を管理
//! - イベントを JSON にエンコードしてクライアントへ送信（push_to, broadcast_to_room）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信は fire-and-forget であり、一部の送信失敗は呼び出し側に伝えません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomEvent, RoomName},
    infrastructure::dto::websocket::ServerMessage,
};

/// 接続中のクライアント 1 件分の情報
struct ClientEntry {
    sender: PusherChannel,
    /// 所属しているルームグループ（未参加なら `None`）
    room: Option<RoomName>,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id.clone(), tx).await;
/// pusher.join_room(&connection_id, &room).await?;
/// pusher.broadcast_to_room(&room, &RoomEvent::UpdateUserList(names)).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: connection id
    clients: Arc<Mutex<HashMap<String, ClientEntry>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(event: &RoomEvent) -> Result<String, MessagePushError> {
        ServerMessage::from(event.clone())
            .to_json()
            .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }

    /// ルームグループ内の送信先にエンコード済みのフレームを送る
    async fn send_to_group(&self, room: &RoomName, excluded: Option<&ConnectionId>, frame: &str) {
        let clients = self.clients.lock().await;

        let targets = clients.iter().filter(|(id, entry)| {
            entry.room.as_ref() == Some(room)
                && excluded.is_none_or(|excluded| excluded.as_str() != id.as_str())
        });

        for (id, entry) in targets {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = entry.sender.send(frame.to_string()) {
                tracing::warn!("Failed to push message to client '{}': {}", id, e);
            } else {
                tracing::debug!("Broadcasted message to client '{}' in '{}'", id, room);
            }
        }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id.into_string(), ClientEntry { sender, room: None });
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id.as_str());
        tracing::debug!("Client '{}' unregistered from MessagePusher", connection_id);
    }

    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room: &RoomName,
    ) -> Result<(), MessagePushError> {
        let mut clients = self.clients.lock().await;
        let entry = clients
            .get_mut(connection_id.as_str())
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;

        if let Some(previous) = entry.room.replace(room.clone())
            && &previous != room
        {
            tracing::debug!("Client '{}' left room group '{}'", connection_id, previous);
        }
        tracing::debug!("Client '{}' joined room group '{}'", connection_id, room);
        Ok(())
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let entry = clients
            .get(connection_id.as_str())
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        entry
            .sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to client '{}'", connection_id);
        Ok(())
    }

    async fn broadcast_to_room(
        &self,
        room: &RoomName,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        self.send_to_group(room, None, &frame).await;
        Ok(())
    }

    async fn broadcast_to_room_except(
        &self,
        room: &RoomName,
        excluded: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        self.send_to_group(room, Some(excluded), &frame).await;
        Ok(())
    }
}
