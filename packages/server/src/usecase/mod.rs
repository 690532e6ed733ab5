//! UseCase 層
//!
//! クライアントから届くイベントごとに 1 つのユースケースを定義します。
//! 各ユースケースは Repository と MessagePusher の trait にのみ依存します。

mod connect_client;
mod disconnect_client;
mod error;
mod get_rooms;
mod join_room;
mod send_location;
mod send_message;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{JoinRoomError, SendLocationError, SendMessageError};
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use send_location::SendLocationUseCase;
pub use send_message::SendMessageUseCase;

use crate::domain::{MessagePushError, RoomEvent};

/// ブロードキャストの失敗は呼び出し元に伝えず、ログにだけ残す
fn log_push_failure(result: Result<(), MessagePushError>, event: &RoomEvent) {
    if let Err(e) = result {
        tracing::warn!("Failed to deliver {:?}: {}", event, e);
    }
}

#[cfg(test)]
mod test_support;
