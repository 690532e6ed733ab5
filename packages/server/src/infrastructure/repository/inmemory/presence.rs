//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する PresenceRepository trait の具体的な実装。
//! `PresenceRegistry` ドメインモデルをそのままストレージとして使用します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, DisplayName, PresenceRegistry, PresenceRepository, RoomName, RoomSummary,
    UserRecord,
};

/// インメモリ Presence Repository 実装
///
/// PresenceRegistry ドメインモデルを保持し、ドメイン層の PresenceRepository trait を実装します（依存性の逆転）。
pub struct InMemoryPresenceRepository {
    /// PresenceRegistry ドメインモデル
    registry: Arc<Mutex<PresenceRegistry>>,
}

impl InMemoryPresenceRepository {
    /// 新しい InMemoryPresenceRepository を作成
    pub fn new(registry: Arc<Mutex<PresenceRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemoryPresenceRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(PresenceRegistry::new())))
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn add_user(
        &self,
        connection_id: ConnectionId,
        name: DisplayName,
        room: RoomName,
    ) -> UserRecord {
        let mut registry = self.registry.lock().await;
        registry.add_user(connection_id, name, room)
    }

    async fn remove_user(&self, connection_id: &ConnectionId) -> Option<UserRecord> {
        let mut registry = self.registry.lock().await;
        registry.remove_user(connection_id)
    }

    async fn get_user(&self, connection_id: &ConnectionId) -> Option<UserRecord> {
        let registry = self.registry.lock().await;
        registry.get_user(connection_id).cloned()
    }

    async fn get_user_list(&self, room: &RoomName) -> Vec<String> {
        let registry = self.registry.lock().await;
        registry.get_user_list(room)
    }

    async fn list_rooms(&self) -> Vec<RoomSummary> {
        let registry = self.registry.lock().await;
        registry.rooms()
    }
}
