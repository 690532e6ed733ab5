//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - レジストリからの削除と、元のルームへの参加者リスト・退室通知の送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みユーザーの切断
//! - エッジケース：未参加のまま切断（何も送信しない）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePusher, PresenceRepository, RoomEvent, Timestamp,
    UserRecord,
};

use super::log_push_failure;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// Repository（プレゼンスレジストリの抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
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

    /// クライアント切断を実行
    ///
    /// # Returns
    ///
    /// 削除したレコード（未参加だった場合は `None`）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<UserRecord> {
        // 1. 送信チャンネルの登録解除（切断済みの接続には送らない）
        self.message_pusher.unregister_client(connection_id).await;

        // 2. レジストリから削除
        let user = self.repository.remove_user(connection_id).await?;

        // 3. 元のルームに参加者リストと退室通知を送信
        let roster = RoomEvent::UpdateUserList(self.repository.get_user_list(&user.room).await);
        log_push_failure(
            self.message_pusher.broadcast_to_room(&user.room, &roster).await,
            &roster,
        );

        let left = RoomEvent::NewMessage(ChatMessage::user_left(
            &user.name,
            Timestamp::new(self.clock.now_millis()),
        ));
        log_push_failure(
            self.message_pusher.broadcast_to_room(&user.room, &left).await,
            &left,
        );

        Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, MockMessagePusher, RoomName},
        infrastructure::dto::websocket::{MessageDto, ServerMessage},
        usecase::test_support::{
            NOW, connection, create_test_message_pusher, create_test_repository, drain, register,
        },
    };
    use hiroba_shared::time::FixedClock;

    #[tokio::test]
    async fn test_disconnect_notifies_former_room() {
        // テスト項目: 切断するとレジストリから削除され、残りの参加者に参加者リストと退室通知が届く
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = DisconnectClientUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            Arc::new(FixedClock::new(NOW)),
        );
        let room = RoomName::new("r1").unwrap();
        let mut rx_alice = register(&message_pusher, "a").await;
        let mut rx_bob = register(&message_pusher, "b").await;
        message_pusher.join_room(&connection("a"), &room).await.unwrap();
        message_pusher.join_room(&connection("b"), &room).await.unwrap();
        repository
            .add_user(connection("a"), DisplayName::new("Alice").unwrap(), room.clone())
            .await;
        repository
            .add_user(connection("b"), DisplayName::new("Bob").unwrap(), room.clone())
            .await;

        // when (操作):
        let removed = usecase.execute(&connection("a")).await;

        // then (期待する結果):
        assert_eq!(removed.unwrap().name.as_str(), "Alice");
        assert!(repository.get_user(&connection("a")).await.is_none());
        assert_eq!(
            drain(&mut rx_bob),
            vec![
                ServerMessage::UpdateUserList(vec!["Bob".to_string()]),
                ServerMessage::NewMessage(MessageDto {
                    from: "Admin".to_string(),
                    text: "Alice has left.".to_string(),
                    created_at: NOW,
                }),
            ]
        );
        // 切断したクライアントには何も届かない
        assert!(drain(&mut rx_alice).is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_without_record_broadcasts_nothing() {
        // テスト項目: 未参加の接続が切断しても何もブロードキャストされない
        // given (前提条件):
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_unregister_client()
            .times(1)
            .returning(|_| ());
        message_pusher.expect_broadcast_to_room().never();
        message_pusher.expect_broadcast_to_room_except().never();
        let usecase = DisconnectClientUseCase::new(
            create_test_repository(),
            Arc::new(message_pusher),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        let removed = usecase.execute(&connection("x")).await;

        // then (期待する結果):
        assert!(removed.is_none());
    }
}
