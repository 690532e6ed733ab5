//! MessagePusher trait 定義
//!
//! 接続中のクライアントへの一方向の送信（ルーム単位のマルチキャスト）を抽象化します。
//! 送信の成否はクライアントに通知されません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomEvent, RoomName};

/// クライアントへの送信チャンネル（エンコード済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Message Pusher trait
///
/// ## 責務
///
/// - 接続ごとの送信チャンネルの管理
/// - 接続とルームの対応（トランスポートレベルのグルーピング）の管理
/// - 単一接続への送信、ルーム全体へのブロードキャスト
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントを登録する
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの登録を解除する（所属ルームからも外れる）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// クライアントをルームのグループに所属させる
    ///
    /// 接続が所属できるルームは一つだけで、以前のルームからは外れる。
    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room: &RoomName,
    ) -> Result<(), MessagePushError>;

    /// 特定のクライアントにイベントを送信する
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// ルームに所属する全てのクライアントにイベントを送信する
    async fn broadcast_to_room(
        &self,
        room: &RoomName,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// ルームに所属するクライアントのうち、指定したクライアント以外に送信する
    async fn broadcast_to_room_except(
        &self,
        room: &RoomName,
        excluded: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
