use std::sync::{Arc, Mutex};

use crate::token::TokenStore;

/// In-memory token slot for tests and native builds.
///
/// Clones share the same slot, mirroring how every handle to `localStorage`
/// sees the same value.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save_token(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|slot| slot.clone())
    }

    fn save_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear_token(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.token().is_none());
        assert!(!store.has_token());

        store.save_token("abc");
        assert_eq!(store.token().as_deref(), Some("abc"));
        assert!(store.has_token());

        store.clear_token();
        assert!(store.token().is_none());

        // Clearing twice is harmless
        store.clear_token();
        assert!(!store.has_token());
    }

    #[test]
    fn test_clones_share_slot() {
        let store = MemoryTokenStore::new();
        let other = store.clone();
        store.save_token("shared");
        assert_eq!(other.token().as_deref(), Some("shared"));

        other.clear_token();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let store = MemoryTokenStore::with_token("");
        assert_eq!(store.token().as_deref(), Some(""));
        assert!(!store.has_token());
    }
}
