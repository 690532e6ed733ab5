//! Domain layer: value objects, entities, the presence aggregate and the
//! interfaces the outer layers implement.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod presence;
pub mod repository;
pub mod value_object;

pub use entity::{ADMIN_NAME, ChatMessage, LocationMessage, RoomSummary, UserRecord};
pub use error::{MessagePushError, ValueObjectError};
pub use event::RoomEvent;
pub use factory::ConnectionIdFactory;
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use presence::PresenceRegistry;
pub use repository::PresenceRepository;
pub use value_object::{ConnectionId, DisplayName, MessageText, RoomName, Timestamp};
