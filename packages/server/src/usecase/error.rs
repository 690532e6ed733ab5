//! UseCase 層のエラー型

use thiserror::Error;

/// 入室のエラー
///
/// `Display` の文字列はそのままクライアントへの ack に載せる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("Name and room name are required")]
    InvalidParams,
}

/// メッセージ送信のエラー（クライアントには通知しない）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("connection has not joined a room")]
    NotJoined,

    #[error("message text is blank")]
    BlankText,

    #[error("broadcast failed: {0}")]
    BroadcastFailed(String),
}

/// 位置情報送信のエラー（クライアントには通知しない）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendLocationError {
    #[error("connection has not joined a room")]
    NotJoined,

    #[error("broadcast failed: {0}")]
    BroadcastFailed(String),
}
