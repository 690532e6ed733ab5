//! Room-based WebSocket chat relay.
//!
//! Clients join named rooms, exchange chat and location messages, and see a
//! live roster of who is currently in their room. Presence is kept in memory
//! only; nothing is persisted.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
