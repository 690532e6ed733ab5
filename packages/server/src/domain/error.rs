//! Domain error types.

use thiserror::Error;

/// Errors raised when constructing a value object from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("display name must not be blank")]
    BlankDisplayName,

    #[error("room name must not be blank")]
    BlankRoomName,

    #[error("message text must not be blank")]
    BlankMessageText,
}

/// Errors raised by a [`MessagePusher`](super::MessagePusher) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The connection is not registered with the pusher
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    /// The outbound channel of the connection is closed
    #[error("failed to push message: {0}")]
    PushFailed(String),

    /// The event could not be encoded for the wire
    #[error("failed to encode event: {0}")]
    EncodeFailed(String),
}
