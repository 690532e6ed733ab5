//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// A room with its current roster, as listed by `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub users: Vec<String>,
}
