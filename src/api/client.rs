//! reqwest implementation of [`BookingApi`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::types::{
    AdminBooking, Amenity, Health, ListEnvelope, LoginRequest, LoginResponse, ObjectEnvelope,
    Package, Room, Villa,
};
use crate::core::storage::StorageError;
use crate::core::token::AuthTokenStore;

/// Versioned prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Errors that can occur talking to the booking API.
#[derive(Debug)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS setup). Not retryable.
    Config(String),
    /// Network-level failure (DNS, connection refused). Retryable.
    Network(String),
    /// No response within the configured timeout. Retryable.
    Timeout,
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the API's response. Not retryable.
    Parse(String),
    /// The login worked but the token could not be saved.
    Storage(StorageError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Storage(e) => write!(f, "could not save auth token: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Storage(e)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else if e.is_builder() {
            ApiError::Config(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Everything the front-end reads from or sends to the booking service.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn health(&self) -> Result<Health, ApiError>;
    async fn villa(&self) -> Result<Villa, ApiError>;
    async fn rooms(&self) -> Result<Vec<Room>, ApiError>;
    async fn packages(&self) -> Result<Vec<Package>, ApiError>;
    async fn amenities(&self) -> Result<Vec<Amenity>, ApiError>;
    async fn images(&self) -> Result<Vec<String>, ApiError>;
    /// Exchange credentials for a bearer token. The token is persisted; a
    /// failed save is an `ApiError::Storage`.
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;
    async fn admin_bookings(&self) -> Result<Vec<AdminBooking>, ApiError>;
}

pub struct BookingClient {
    base_url: String,
    client: reqwest::Client,
    tokens: AuthTokenStore,
}

impl BookingClient {
    pub fn new(base_url: &str, timeout: Duration, tokens: AuthTokenStore) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        debug!("Booking API response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Booking API error: {} - {}", status.as_u16(), message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        info!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let items = self.get::<ListEnvelope<T>>(path).await?.into_vec();
        debug!("{} returned {} items", path, items.len());
        Ok(items)
    }
}

#[async_trait]
impl BookingApi for BookingClient {
    async fn health(&self) -> Result<Health, ApiError> {
        self.get("/health").await
    }

    async fn villa(&self) -> Result<Villa, ApiError> {
        Ok(self.get::<ObjectEnvelope<Villa>>("/villa").await?.into_inner())
    }

    async fn rooms(&self) -> Result<Vec<Room>, ApiError> {
        self.get_list("/bookings/rooms").await
    }

    async fn packages(&self) -> Result<Vec<Package>, ApiError> {
        self.get_list("/bookings/packages").await
    }

    async fn amenities(&self) -> Result<Vec<Amenity>, ApiError> {
        self.get_list("/amenities").await
    }

    async fn images(&self) -> Result<Vec<String>, ApiError> {
        self.get_list("/images").await
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = self.url("/auth/login");
        info!("POST {} (user={})", url, username);
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.send(self.client.post(url).json(&body)).await?;
        let token = response
            .into_token()
            .ok_or_else(|| ApiError::Parse("login response carried no token".to_string()))?;

        // Admin calls need the stored token, so a failed save fails the login.
        self.tokens.set_token(&token).map_err(|e| {
            warn!("Could not persist auth token: {}", e);
            ApiError::from(e)
        })?;
        Ok(token)
    }

    async fn admin_bookings(&self) -> Result<Vec<AdminBooking>, ApiError> {
        self.get_list("/admin/bookings").await
    }
}
