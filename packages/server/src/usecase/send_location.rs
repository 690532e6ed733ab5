//! UseCase: 位置情報送信処理
//!
//! 参加済みの接続から届いた座標を地図 URL にしてルーム全体に送る。
//! 未参加の接続からの位置情報は黙って無視する。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ConnectionId, LocationMessage, MessagePusher, PresenceRepository, RoomEvent, Timestamp,
};

use super::error::SendLocationError;

/// 位置情報送信のユースケース
pub struct SendLocationUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendLocationUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 位置情報送信を実行
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        latitude: f64,
        longitude: f64,
    ) -> Result<LocationMessage, SendLocationError> {
        let user = self
            .repository
            .get_user(connection_id)
            .await
            .ok_or(SendLocationError::NotJoined)?;

        let message = LocationMessage::new(
            user.name.into_string(),
            latitude,
            longitude,
            Timestamp::new(self.clock.now_millis()),
        );
        self.message_pusher
            .broadcast_to_room(&user.room, &RoomEvent::NewLocationMessage(message.clone()))
            .await
            .map_err(|e| SendLocationError::BroadcastFailed(e.to_string()))?;

        Ok(message)
    }
}
