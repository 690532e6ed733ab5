//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, LocationMessage, RoomEvent, RoomSummary};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for dto::MessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            from: model.from,
            text: model.text,
            created_at: model.created_at.value(),
        }
    }
}

impl From<LocationMessage> for dto::LocationMessageDto {
    fn from(model: LocationMessage) -> Self {
        Self {
            from: model.from,
            url: model.url,
            created_at: model.created_at.value(),
        }
    }
}

impl From<RoomEvent> for dto::ServerMessage {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::NewMessage(message) => Self::NewMessage(message.into()),
            RoomEvent::NewLocationMessage(message) => Self::NewLocationMessage(message.into()),
            RoomEvent::UpdateUserList(users) => Self::UpdateUserList(users),
        }
    }
}

impl From<RoomSummary> for http::RoomSummaryDto {
    fn from(model: RoomSummary) -> Self {
        Self {
            name: model.name.into_string(),
            users: model.users,
        }
    }
}
