//! # Application State
//!
//! Core business state for Villa. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn BookingApi>       // booking service client
//! ├── route: Route                   // current screen
//! ├── status_message: String         // status bar text
//! ├── villa / rooms / packages /
//! │   amenities / admin_bookings     // Loadable<T> per remote list
//! ├── room_filter: RoomFilter        // category tabs over rooms
//! ├── description: DescriptionMemo   // About text, memoized
//! ├── description_expanded: bool     // inline "read more" toggle
//! ├── images: ImageResolver          // bucket URLs
//! ├── session_store                  // session-scoped storage (guard flag)
//! ├── tokens: AuthTokenStore         // persistent bearer token
//! ├── admin_guard: AdminGuard        // gate for the admin screen
//! └── login_pending / login_error    // admin login form status
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::{AdminBooking, Amenity, BookingApi, Package, Room, Villa};
use crate::core::amenities::{AmenityDisplay, display_amenities};
use crate::core::config::ResolvedConfig;
use crate::core::description::{DescriptionMemo, ProcessedDescription};
use crate::core::guard::AdminGuard;
use crate::core::images::ImageResolver;
use crate::core::loadable::Loadable;
use crate::core::rooms::RoomFilter;
use crate::core::route::Route;
use crate::core::storage::KeyValueStore;
use crate::core::token::AuthTokenStore;

pub struct App {
    pub api: Arc<dyn BookingApi>,
    pub route: Route,
    pub status_message: String,
    /// Holds at most one record.
    pub villa: Loadable<Villa>,
    pub rooms: Loadable<Room>,
    pub room_filter: RoomFilter,
    pub packages: Loadable<Package>,
    pub amenities: Loadable<Amenity>,
    pub admin_bookings: Loadable<AdminBooking>,
    pub description: DescriptionMemo,
    pub description_expanded: bool,
    pub images: ImageResolver,
    pub session_store: Arc<dyn KeyValueStore>,
    pub tokens: AuthTokenStore,
    pub admin_guard: AdminGuard,
    pub login_pending: bool,
    pub login_error: Option<String>,
    /// Number of the latest public fetch; older results are dropped.
    pub public_request: u64,
    /// Number of the latest bookings fetch.
    pub admin_request: u64,
}

impl App {
    pub fn new(
        api: Arc<dyn BookingApi>,
        config: &ResolvedConfig,
        session_store: Arc<dyn KeyValueStore>,
        tokens: AuthTokenStore,
    ) -> Self {
        Self {
            api,
            route: Route::Home,
            status_message: String::from("Welcome!"),
            villa: Loadable::default(),
            rooms: Loadable::default(),
            room_filter: RoomFilter::default(),
            packages: Loadable::default(),
            amenities: Loadable::default(),
            admin_bookings: Loadable::default(),
            description: DescriptionMemo::new(config.description_limit),
            description_expanded: false,
            images: ImageResolver::new(&config.image_base_url, &config.image_placeholder),
            session_store,
            tokens,
            admin_guard: AdminGuard::new(),
            login_pending: false,
            login_error: None,
            public_request: 0,
            admin_request: 0,
        }
    }

    pub fn villa_info(&self) -> Option<&Villa> {
        self.villa.data.first()
    }

    pub fn villa_name(&self) -> &str {
        self.villa_info()
            .and_then(|v| v.name.as_deref())
            .unwrap_or("Villa")
    }

    /// The About text, recomputed only when the villa description changes.
    pub fn about_description(&mut self) -> &ProcessedDescription {
        let raw = self.villa.data.first().and_then(|v| v.description.as_deref());
        self.description.get(raw)
    }

    pub fn amenity_items(&self) -> Vec<AmenityDisplay> {
        display_amenities(&self.amenities.data)
    }

    /// True while any public list is still in flight.
    pub fn is_loading(&self) -> bool {
        self.villa.loading || self.rooms.loading || self.packages.loading || self.amenities.loading
    }
}
