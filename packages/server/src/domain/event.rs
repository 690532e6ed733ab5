//! Events delivered from the server to connections.

use super::entity::{ChatMessage, LocationMessage};

/// An outbound event addressed to a connection or a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    NewMessage(ChatMessage),
    NewLocationMessage(LocationMessage),
    /// Current roster of a room, in registry order
    UpdateUserList(Vec<String>),
}
