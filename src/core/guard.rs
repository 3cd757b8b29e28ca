//! # Admin Session Guard
//!
//! Decides whether the admin area may render.
//!
//! ```text
//!              mount()
//!   Unknown ──────────┬──► Authenticated     flag == "true"     → render children
//!   (loading)         └──► Unauthenticated   anything else      → navigate(LOGIN_ROUTE),
//!                                            or storage error      render nothing
//! ```
//!
//! The decision itself is pure ([`decide`]). Navigation is issued by
//! [`AdminGuard::mount`] through a host-supplied [`Navigator`], once per
//! decision. Leaving and re-entering the admin area calls [`AdminGuard::remount`],
//! which re-runs the check.
//!
//! The flag is a UX gate only. The API still validates the bearer token on
//! every admin request, and nothing here ties the two together.

use log::{info, warn};

use crate::core::storage::{KeyValueStore, StorageError};

/// Session-scoped key holding `"true"` once an admin has signed in.
pub const ADMIN_SESSION_KEY: &str = "admin_authenticated";

/// Where unauthenticated visitors are sent.
pub const LOGIN_ROUTE: &str = "/admin/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Authenticated,
    Unauthenticated { redirect: &'static str },
}

/// What the host should draw for the current guard state.
#[derive(Debug, PartialEq, Eq)]
pub enum GuardRender<C> {
    Loading,
    Nothing,
    Children(C),
}

/// Navigation capability supplied by the host (the router).
pub trait Navigator {
    fn navigate(&mut self, route: &str);
}

/// Read the session flag and decide. Storage failures fail closed.
pub fn decide(store: &dyn KeyValueStore) -> GuardDecision {
    let flag = match store.get(ADMIN_SESSION_KEY) {
        Ok(flag) => flag,
        Err(e) => {
            warn!("Session storage unavailable, treating admin as signed out: {}", e);
            None
        }
    };

    if flag.as_deref() == Some("true") {
        GuardDecision::Authenticated
    } else {
        GuardDecision::Unauthenticated {
            redirect: LOGIN_ROUTE,
        }
    }
}

#[derive(Debug, Default)]
pub struct AdminGuard {
    state: GuardState,
}

impl AdminGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Run the check if it has not run since the last (re)mount.
    pub fn mount(&mut self, store: &dyn KeyValueStore, navigator: &mut dyn Navigator) -> GuardState {
        if self.state != GuardState::Unknown {
            return self.state;
        }

        match decide(store) {
            GuardDecision::Authenticated => {
                info!("Admin guard: session flag present");
                self.state = GuardState::Authenticated;
            }
            GuardDecision::Unauthenticated { redirect } => {
                info!("Admin guard: no session, redirecting to {}", redirect);
                self.state = GuardState::Unauthenticated;
                navigator.navigate(redirect);
            }
        }
        self.state
    }

    /// Forget the previous decision; the next `mount` checks again.
    pub fn remount(&mut self) {
        self.state = GuardState::Unknown;
    }

    pub fn render<C>(&self, children: impl FnOnce() -> C) -> GuardRender<C> {
        match self.state {
            GuardState::Unknown => GuardRender::Loading,
            GuardState::Unauthenticated => GuardRender::Nothing,
            GuardState::Authenticated => GuardRender::Children(children()),
        }
    }
}

/// Mark this session as signed in.
pub fn sign_in(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.set(ADMIN_SESSION_KEY, "true")
}

pub fn sign_out(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.remove(ADMIN_SESSION_KEY)
}
