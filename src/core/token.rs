//! Bearer token persisted for the booking API client.

use std::sync::Arc;

use log::warn;

use crate::core::storage::{KeyValueStore, StorageError};

/// Key of the bearer token in persistent storage.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

#[derive(Clone)]
pub struct AuthTokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl AuthTokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored token. A read failure counts as "no token".
    pub fn token(&self) -> Option<String> {
        match self.store.get(AUTH_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Could not read auth token: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(AUTH_TOKEN_KEY, token)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(AUTH_TOKEN_KEY)
    }
}
