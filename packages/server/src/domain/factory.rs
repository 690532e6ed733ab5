//! Factories for identifiers generated by the server.

use uuid::Uuid;

use super::value_object::ConnectionId;

/// Generates a fresh [`ConnectionId`] for every accepted connection.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::from_generated(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_returns_unique_ids() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given / when (前提条件 / 操作):
        let a = ConnectionIdFactory::generate();
        let b = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }
}
