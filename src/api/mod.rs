//! # Booking API
//!
//! Client for the remote booking service. The schema belongs to the service;
//! this module only consumes it.

pub mod client;
pub mod types;

pub use client::{ApiError, BookingApi, BookingClient};
pub use types::{AdminBooking, Amenity, Contact, Health, Package, Room, Villa};
