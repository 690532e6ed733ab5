//! Server state shared by every connection.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetRoomsUseCase, JoinRoomUseCase,
    SendLocationUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// SendLocationUseCase（位置情報送信のユースケース）
    pub send_location_usecase: Arc<SendLocationUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// Serializes event handling across all connections.
    ///
    /// Held for the whole validate → mutate → broadcast sequence of one event,
    /// so broadcasts to a room go out in the order events were accepted.
    pub event_lock: Mutex<()>,
}
