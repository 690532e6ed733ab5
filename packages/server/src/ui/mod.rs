//! UI layer: HTTP/WebSocket entry points of the chat relay.

mod handler;
mod server;
pub mod session;
mod signal;
pub mod state;
#[cfg(test)]
mod test_support;

pub use server::Server;
