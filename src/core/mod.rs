//! # Core Application Logic
//!
//! This module contains Villa's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • derived views        │
//!                    │    (description, rooms, │
//!                    │     amenities, images)  │
//!                    │  • admin guard          │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Storage   │      │ Booking API│
//!     │  Adapter   │      │ (session / │      │  (reqwest) │
//!     │ (ratatui)  │      │ persistent)│      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`description`], [`rooms`], [`amenities`], [`images`]: pure, memoized views
//! - [`guard`], [`token`], [`storage`]: route protection and its storage

pub mod action;
pub mod amenities;
pub mod config;
pub mod description;
pub mod guard;
pub mod images;
pub mod loadable;
pub mod rooms;
pub mod route;
pub mod state;
pub mod storage;
pub mod token;
