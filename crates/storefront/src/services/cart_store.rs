//! Session-backed key-value store.
//!
//! Each browser's session plays the part of its local storage: values are
//! stored as strings under their key, exactly as the cart view-model hands
//! them over.

use tiffin_core::{KeyValueStore, StoreError};
use tower_sessions::Session;

/// Key-value store over the current request's session.
#[derive(Debug, Clone)]
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    /// Wrap a request session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl KeyValueStore for SessionCartStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.session
            .get::<String>(key)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.session
            .insert(key, value)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tiffin_core::{CART_STORE_KEY, CartViewModel, LineItemId, PricingPolicy};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_round_trips_strings() {
        let store = SessionCartStore::new(session());
        assert!(store.get(CART_STORE_KEY).await.unwrap().is_none());

        store.set(CART_STORE_KEY, "[]".to_string()).await.unwrap();
        assert_eq!(store.get(CART_STORE_KEY).await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_non_string_value_loads_as_empty_cart() {
        let session = session();
        session
            .insert(CART_STORE_KEY, serde_json::json!({"unexpected": true}))
            .await
            .unwrap();

        let model =
            CartViewModel::mount(SessionCartStore::new(session), PricingPolicy::default()).await;
        assert!(model.cart().is_empty());
    }

    #[tokio::test]
    async fn test_view_model_writes_through_session() {
        let session = session();
        let stored = r#"[{"_id":"p1","name":"Dal","price":120,"image":"/d.jpg","quantity":1,"category":"lentils"}]"#;
        session.insert(CART_STORE_KEY, stored).await.unwrap();

        let mut model =
            CartViewModel::mount(SessionCartStore::new(session.clone()), PricingPolicy::default())
                .await;
        assert!(model.update_quantity(&LineItemId::new("p1"), 3).await.is_applied());

        let raw: String = session.get(CART_STORE_KEY).await.unwrap().unwrap();
        assert!(raw.contains(r#""quantity":3"#));
    }
}
