//! UseCase: ルーム一覧取得処理

use std::sync::Arc;

use crate::domain::{PresenceRepository, RoomSummary};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// 現在誰かがいるルームを、参加者リスト付きで返す
    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.repository.list_rooms().await
    }
}
