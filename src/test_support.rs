//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{AdminBooking, Amenity, ApiError, BookingApi, Health, Package, Room, Villa};
use crate::core::config::ResolvedConfig;
use crate::core::guard::Navigator;
use crate::core::state::App;
use crate::core::storage::{KeyValueStore, MemoryStore, StorageError};
use crate::core::token::AuthTokenStore;

/// A no-op API for tests that don't need real HTTP calls.
pub struct NoopApi;

#[async_trait]
impl BookingApi for NoopApi {
    async fn health(&self) -> Result<Health, ApiError> {
        Ok(Health {
            status: Some("ok".to_string()),
        })
    }

    async fn villa(&self) -> Result<Villa, ApiError> {
        Ok(Villa::default())
    }

    async fn rooms(&self) -> Result<Vec<Room>, ApiError> {
        Ok(Vec::new())
    }

    async fn packages(&self) -> Result<Vec<Package>, ApiError> {
        Ok(Vec::new())
    }

    async fn amenities(&self) -> Result<Vec<Amenity>, ApiError> {
        Ok(Vec::new())
    }

    async fn images(&self) -> Result<Vec<String>, ApiError> {
        Ok(Vec::new())
    }

    async fn login(&self, _username: &str, _password: &str) -> Result<String, ApiError> {
        Ok("noop-token".to_string())
    }

    async fn admin_bookings(&self) -> Result<Vec<AdminBooking>, ApiError> {
        Ok(Vec::new())
    }
}

/// Storage the host has switched off: every call fails.
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Records every navigation request.
#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: &str) {
        self.routes.push(route.to_string());
    }
}

/// Draws with `draw` on an in-memory terminal and returns every cell's
/// symbol concatenated, row by row.
pub fn render_to_string(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}

/// Creates a test App with a NoopApi and in-memory storage for both scopes.
pub fn test_app() -> App {
    let tokens = AuthTokenStore::new(Arc::new(MemoryStore::new()));
    App::new(
        Arc::new(NoopApi),
        &ResolvedConfig::default(),
        Arc::new(MemoryStore::new()),
        tokens,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_api_answers_without_network() {
        let api = NoopApi;
        let token = tokio_test::block_on(api.login("a", "b")).unwrap();
        assert_eq!(token, "noop-token");
        let health = tokio_test::block_on(api.health()).unwrap();
        assert_eq!(health.status.as_deref(), Some("ok"));
    }
}
