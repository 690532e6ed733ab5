//! WebSocket frame DTOs.
//!
//! Every text frame is a JSON envelope naming an event:
//!
//! ```text
//! client → server: {"event": "join", "data": {"name": "Alice", "room": "lobby"}, "ack": 1}
//! server → client: {"event": "newMessage", "data": {"from": "Admin", "text": "...", "createdAt": 0}}
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors raised while decoding a client frame
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown event '{0}'")]
    UnknownEvent(String),
}

/// Raw client → server envelope
#[derive(Debug, Deserialize)]
pub struct ClientFrame {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
    /// Acknowledgement id requested by the client, echoed back in an `ack` frame
    #[serde(default)]
    pub ack: Option<u64>,
}

impl ClientFrame {
    pub fn parse(text: &str) -> Result<Self, FrameError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode the payload according to the event name.
    ///
    /// Join and chat payloads of the wrong shape decode as empty payloads so
    /// that they are rejected (join) or dropped (chat) by the session rather
    /// than discarded before an acknowledgement can be sent.
    pub fn into_event(self) -> Result<ClientEvent, FrameError> {
        match self.event.as_str() {
            "join" => Ok(ClientEvent::Join(
                serde_json::from_value(self.data).unwrap_or_default(),
            )),
            "createMessage" => Ok(ClientEvent::CreateMessage(
                serde_json::from_value(self.data).unwrap_or_default(),
            )),
            "createLocationMessage" => Ok(ClientEvent::CreateLocationMessage(
                serde_json::from_value(self.data)?,
            )),
            _ => Err(FrameError::UnknownEvent(self.event)),
        }
    }
}

/// Decoded client → server event
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Join(JoinPayload),
    CreateMessage(CreateMessagePayload),
    CreateLocationMessage(LocationPayload),
}

/// Accept any JSON value; anything that is not a string becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JoinPayload {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub room: Option<String>,
}

/// `from` is accepted for compatibility but the server always uses the
/// sender's registered display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateMessagePayload {
    #[serde(default, deserialize_with = "lenient_string")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationPayload {
    pub latitude: f64,
    pub longitude: f64,
}

/// Server → client envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    NewMessage(MessageDto),
    NewLocationMessage(LocationMessageDto),
    UpdateUserList(Vec<String>),
    Ack(AckDto),
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub from: String,
    pub text: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMessageDto {
    pub from: String,
    pub url: String,
    pub created_at: i64,
}

/// Acknowledgement of a client frame; `error` is only present on rejection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckDto {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_frame() {
        // テスト項目: join フレームがペイロードと ack ID 付きでデコードされる
        // given (前提条件):
        let text = r#"{"event":"join","data":{"name":"Alice","room":"lobby"},"ack":7}"#;

        // when (操作):
        let frame = ClientFrame::parse(text).unwrap();
        let ack = frame.ack;
        let event = frame.into_event().unwrap();

        // then (期待する結果):
        assert_eq!(ack, Some(7));
        assert_eq!(
            event,
            ClientEvent::Join(JoinPayload {
                name: Some("Alice".to_string()),
                room: Some("lobby".to_string()),
            })
        );
    }

    #[test]
    fn test_non_string_join_fields_become_none() {
        // テスト項目: 文字列でない name/room は None として扱われる
        // given (前提条件):
        let text = r#"{"event":"join","data":{"name":42,"room":null}}"#;

        // when (操作):
        let event = ClientFrame::parse(text).unwrap().into_event().unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::Join(JoinPayload::default()));
    }

    #[test]
    fn test_join_with_non_object_payload_decodes_as_empty() {
        // テスト項目: オブジェクトでない join ペイロードは空のペイロードになる
        // given (前提条件):
        let text = r#"{"event":"join","data":"lobby","ack":1}"#;

        // when (操作):
        let event = ClientFrame::parse(text).unwrap().into_event().unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::Join(JoinPayload::default()));
    }

    #[test]
    fn test_parse_create_message_ignores_missing_from() {
        // テスト項目: from のない createMessage もデコードできる
        // given (前提条件):
        let text = r#"{"event":"createMessage","data":{"text":"hi"}}"#;

        // when (操作):
        let event = ClientFrame::parse(text).unwrap().into_event().unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::CreateMessage(CreateMessagePayload {
                from: None,
                text: Some("hi".to_string()),
            })
        );
    }

    #[test]
    fn test_location_frame_requires_numbers() {
        // テスト項目: 座標が数値でない位置情報フレームはエラーになる
        // given (前提条件):
        let valid = r#"{"event":"createLocationMessage","data":{"latitude":1.5,"longitude":-2}}"#;
        let invalid = r#"{"event":"createLocationMessage","data":{"latitude":"north"}}"#;

        // when (操作):
        let valid = ClientFrame::parse(valid).unwrap().into_event();
        let invalid = ClientFrame::parse(invalid).unwrap().into_event();

        // then (期待する結果):
        assert_eq!(
            valid.unwrap(),
            ClientEvent::CreateLocationMessage(LocationPayload {
                latitude: 1.5,
                longitude: -2.0,
            })
        );
        assert!(matches!(invalid, Err(FrameError::Malformed(_))));
    }

    #[test]
    fn test_unknown_event_and_garbage() {
        // テスト項目: 未知のイベント名や JSON でないテキストはエラーになる
        // given / when (前提条件 / 操作):
        let unknown = ClientFrame::parse(r#"{"event":"dance"}"#)
            .unwrap()
            .into_event();
        let garbage = ClientFrame::parse("hello");

        // then (期待する結果):
        assert!(matches!(unknown, Err(FrameError::UnknownEvent(name)) if name == "dance"));
        assert!(matches!(garbage, Err(FrameError::Malformed(_))));
    }

    #[test]
    fn test_server_message_wire_format() {
        // テスト項目: サーバーからのフレームが event/data 形式の camelCase JSON になる
        // given (前提条件):
        let message = ServerMessage::NewMessage(MessageDto {
            from: "Bob".to_string(),
            text: "hi".to_string(),
            created_at: 1000,
        });
        let ack = ServerMessage::Ack(AckDto { id: 3, error: None });

        // when (操作):
        let message_json = message.to_json().unwrap();
        let ack_json = ack.to_json().unwrap();

        // then (期待する結果):
        assert_eq!(
            message_json,
            r#"{"event":"newMessage","data":{"from":"Bob","text":"hi","createdAt":1000}}"#
        );
        assert_eq!(ack_json, r#"{"event":"ack","data":{"id":3}}"#);
    }
}
