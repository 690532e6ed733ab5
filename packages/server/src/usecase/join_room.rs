//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 入力検証、レジストリの置き換え（remove → add）、ルームへの通知
//!
//! ### なぜこのテストが必要か
//! - 同じ接続が二度 join しても、二つのルームに同時に存在しないことを保証する
//! - 参加者リスト・歓迎メッセージ・入室通知の送信先が正しいことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加、2 人目の参加、別ルームへの移動
//! - 異常系：空文字列・空白のみ・文字列でない name/room

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, DisplayName, MessagePusher, PresenceRepository, RoomEvent,
    RoomName, Timestamp, UserRecord,
};

use super::{error::JoinRoomError, log_push_failure};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（プレゼンスレジストリの抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
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

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `name` - 表示名（文字列でなければ `None`）
    /// * `room` - ルーム名（文字列でなければ `None`）
    ///
    /// # Returns
    ///
    /// * `Ok(UserRecord)` - 登録したレコード
    /// * `Err(JoinRoomError)` - 入力が不正（状態は変更しない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        name: Option<&str>,
        room: Option<&str>,
    ) -> Result<UserRecord, JoinRoomError> {
        // 1. 入力検証
        let name = name
            .and_then(|name| DisplayName::new(name).ok())
            .ok_or(JoinRoomError::InvalidParams)?;
        let room = room
            .and_then(|room| RoomName::new(room).ok())
            .ok_or(JoinRoomError::InvalidParams)?;

        // 2. トランスポートレベルでルームのグループに参加
        if let Err(e) = self.message_pusher.join_room(connection_id, &room).await {
            tracing::warn!(
                "Failed to add '{}' to room group '{}': {}",
                connection_id,
                room,
                e
            );
        }

        // 3. 以前のレコードを削除してから新しいレコードを登録
        if let Some(previous) = self.repository.remove_user(connection_id).await {
            tracing::debug!(
                "'{}' left room '{}' by joining '{}'",
                previous.name,
                previous.room,
                room
            );
        }
        let user = self
            .repository
            .add_user(connection_id.clone(), name, room)
            .await;

        // 4. 参加者リスト、歓迎メッセージ、入室通知
        let now = Timestamp::new(self.clock.now_millis());

        let roster = RoomEvent::UpdateUserList(self.repository.get_user_list(&user.room).await);
        log_push_failure(
            self.message_pusher.broadcast_to_room(&user.room, &roster).await,
            &roster,
        );

        let welcome = RoomEvent::NewMessage(ChatMessage::welcome(now));
        log_push_failure(
            self.message_pusher.push_to(connection_id, &welcome).await,
            &welcome,
        );

        let joined = RoomEvent::NewMessage(ChatMessage::user_joined(&user.name, now));
        log_push_failure(
            self.message_pusher
                .broadcast_to_room_except(&user.room, connection_id, &joined)
                .await,
            &joined,
        );

        Ok(user)
    }
}
