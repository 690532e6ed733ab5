//! Presence registry aggregate.
//!
//! Maps each connection to at most one [`UserRecord`] and derives room
//! membership from those records on demand. Rooms are never stored; a room
//! exists exactly as long as some record names it.

use super::{ConnectionId, DisplayName, RoomName, RoomSummary, UserRecord};

/// In-memory presence registry, ordered by insertion.
#[derive(Debug, Default, Clone)]
pub struct PresenceRegistry {
    users: Vec<UserRecord>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record for the connection.
    ///
    /// Does not look for an existing record under the same id; callers that
    /// re-register a connection must `remove_user` first.
    pub fn add_user(
        &mut self,
        connection_id: ConnectionId,
        name: DisplayName,
        room: RoomName,
    ) -> UserRecord {
        let user = UserRecord::new(connection_id, name, room);
        self.users.push(user.clone());
        user
    }

    /// Remove the record of the connection, returning it if there was one.
    pub fn remove_user(&mut self, connection_id: &ConnectionId) -> Option<UserRecord> {
        let index = self
            .users
            .iter()
            .position(|user| &user.connection_id == connection_id)?;
        Some(self.users.remove(index))
    }

    pub fn get_user(&self, connection_id: &ConnectionId) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|user| &user.connection_id == connection_id)
    }

    /// Display names of everyone in `room`, in insertion order.
    pub fn get_user_list(&self, room: &RoomName) -> Vec<String> {
        self.users
            .iter()
            .filter(|user| &user.room == room)
            .map(|user| user.name.as_str().to_string())
            .collect()
    }

    /// Every occupied room, in order of first appearance, with its roster.
    pub fn rooms(&self) -> Vec<RoomSummary> {
        let mut rooms: Vec<RoomSummary> = Vec::new();
        for user in &self.users {
            match rooms.iter_mut().find(|room| room.name == user.room) {
                Some(room) => room.users.push(user.name.as_str().to_string()),
                None => rooms.push(RoomSummary {
                    name: user.room.clone(),
                    users: vec![user.name.as_str().to_string()],
                }),
            }
        }
        rooms
    }
}
