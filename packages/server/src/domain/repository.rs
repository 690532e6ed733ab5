//! Repository trait 定義
//!
//! ドメイン層が必要とするプレゼンス情報へのアクセスインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, RoomName, RoomSummary, UserRecord};

/// Presence Repository trait
///
/// 接続 ID から {表示名, ルーム} への対応を保持するプレゼンスレジストリへのインターフェース。
/// ユーザー情報を変更できるのはこの trait の実装だけであり、UseCase 層はこの trait に依存する。
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// ユーザーを追加する
    ///
    /// 同じ接続 ID の既存レコードは確認しない。呼び出し側が先に `remove_user` すること。
    async fn add_user(
        &self,
        connection_id: ConnectionId,
        name: DisplayName,
        room: RoomName,
    ) -> UserRecord;

    /// ユーザーを削除し、削除したレコードを返す（存在しなければ `None`）
    async fn remove_user(&self, connection_id: &ConnectionId) -> Option<UserRecord>;

    /// ユーザーを取得する
    async fn get_user(&self, connection_id: &ConnectionId) -> Option<UserRecord>;

    /// ルームの参加者の表示名リストを取得する（登録順）
    async fn get_user_list(&self, room: &RoomName) -> Vec<String>;

    /// 現在ユーザーがいる全てのルームを取得する
    async fn list_rooms(&self) -> Vec<RoomSummary>;
}
