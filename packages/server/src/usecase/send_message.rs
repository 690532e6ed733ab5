//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者の表示名と現在時刻でメッセージを組み立て、送信者を含むルーム全体へ送ること
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みユーザーからのメッセージ
//! - 異常系：未参加の接続、空のテキスト（何も送信しない）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePusher, MessageText, PresenceRepository, RoomEvent,
    Timestamp,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（プレゼンスレジストリの抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
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

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信者の接続 ID
    /// * `text` - メッセージ本文（文字列でなければ `None`）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ルームに送信したメッセージ
    /// * `Err(SendMessageError)` - 送信しなかった理由
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        text: Option<&str>,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. 送信者のレコードを取得
        let user = self
            .repository
            .get_user(connection_id)
            .await
            .ok_or(SendMessageError::NotJoined)?;

        // 2. 本文を検証
        let text = text
            .and_then(|text| MessageText::new(text).ok())
            .ok_or(SendMessageError::BlankText)?;

        // 3. 送信者を含むルーム全体にブロードキャスト
        let message = ChatMessage::new(
            user.name.into_string(),
            text.into_string(),
            Timestamp::new(self.clock.now_millis()),
        );
        self.message_pusher
            .broadcast_to_room(&user.room, &RoomEvent::NewMessage(message.clone()))
            .await
            .map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))?;

        Ok(message)
    }
}
