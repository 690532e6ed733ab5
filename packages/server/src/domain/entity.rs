//! Domain entities.

use super::value_object::{ConnectionId, DisplayName, RoomName, Timestamp};

/// Sender name used for messages generated by the server itself.
pub const ADMIN_NAME: &str = "Admin";

/// Presence of one connection: who it is and which room it is in.
///
/// A record is only ever inserted or removed as a whole, never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub connection_id: ConnectionId,
    pub name: DisplayName,
    pub room: RoomName,
}

impl UserRecord {
    pub fn new(connection_id: ConnectionId, name: DisplayName, room: RoomName) -> Self {
        Self {
            connection_id,
            name,
            room,
        }
    }
}

/// Chat message relayed to a room. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub from: String,
    pub text: String,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(from: impl Into<String>, text: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            from: from.into(),
            text: text.into(),
            created_at,
        }
    }

    /// Private greeting sent to a connection right after it joins.
    pub fn welcome(created_at: Timestamp) -> Self {
        Self::new(ADMIN_NAME, "Welcome to web chat", created_at)
    }

    pub fn user_joined(name: &DisplayName, created_at: Timestamp) -> Self {
        Self::new(ADMIN_NAME, format!("{} has joined.", name), created_at)
    }

    pub fn user_left(name: &DisplayName, created_at: Timestamp) -> Self {
        Self::new(ADMIN_NAME, format!("{} has left.", name), created_at)
    }
}

/// Shared location relayed to a room as a map link. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationMessage {
    pub from: String,
    pub url: String,
    pub created_at: Timestamp,
}

impl LocationMessage {
    pub fn new(from: impl Into<String>, latitude: f64, longitude: f64, created_at: Timestamp) -> Self {
        Self {
            from: from.into(),
            url: map_url(latitude, longitude),
            created_at,
        }
    }
}

/// Build the map link for a coordinate pair.
pub fn map_url(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps?q={},{}", latitude, longitude)
}

/// A room as derived from the registry at read time, with its roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: RoomName,
    pub users: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_notifications() {
        // テスト項目: 入室・退室・歓迎メッセージが Admin 名義で生成される
        // given (前提条件):
        let name = DisplayName::new("Bob").unwrap();
        let at = Timestamp::new(1000);

        // when (操作):
        let welcome = ChatMessage::welcome(at);
        let joined = ChatMessage::user_joined(&name, at);
        let left = ChatMessage::user_left(&name, at);

        // then (期待する結果):
        assert_eq!(welcome.from, ADMIN_NAME);
        assert_eq!(welcome.text, "Welcome to web chat");
        assert_eq!(joined.text, "Bob has joined.");
        assert_eq!(left.text, "Bob has left.");
        assert_eq!(left.created_at, at);
    }

    #[test]
    fn test_location_message_builds_map_url() {
        // テスト項目: 緯度経度から地図 URL が組み立てられる
        // given (前提条件):
        let at = Timestamp::new(2000);

        // when (操作):
        let message = LocationMessage::new("Alice", 35.6812, 139.7671, at);

        // then (期待する結果):
        assert_eq!(message.from, "Alice");
        assert_eq!(message.url, "https://www.google.com/maps?q=35.6812,139.7671");
    }

    #[test]
    fn test_map_url_formats_integral_and_negative_coordinates() {
        // テスト項目: 整数値や負の座標も余計な小数点なしで整形される
        // given / when (前提条件 / 操作):
        let url = map_url(1.0, -0.5);

        // then (期待する結果):
        assert_eq!(url, "https://www.google.com/maps?q=1,-0.5");
    }
}
