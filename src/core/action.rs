//! # Actions
//!
//! Everything that can happen in Villa becomes an `Action`.
//! User presses `r`? That's `Action::Refresh`.
//! The rooms request returns? That's `Action::RoomsLoaded(result)`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the host what I/O to perform next. No side effects here beyond the
//! injected storage; network and navigation happen in the host.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every fetch carries a request number. Results tagged with an older number
//! than the latest fetch of their kind are dropped, so a slow response to an
//! earlier refresh never overwrites a newer one.

use log::{debug, info, warn};

use crate::api::{AdminBooking, Amenity, Package, Room, Villa};
use crate::core::guard::{self, GuardState, Navigator};
use crate::core::route::Route;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Route),
    Refresh,
    VillaLoaded(u64, Result<Villa, String>),
    RoomsLoaded(u64, Result<Vec<Room>, String>),
    PackagesLoaded(u64, Result<Vec<Package>, String>),
    AmenitiesLoaded(u64, Result<Vec<Amenity>, String>),
    AdminBookingsLoaded(u64, Result<Vec<AdminBooking>, String>),
    SelectCategory(String),
    NextCategory,
    PreviousCategory,
    ToggleDescription,
    SubmitLogin { username: String, password: String },
    LoginSucceeded,
    LoginFailed(String),
    Logout,
    Quit,
}

/// I/O the host must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Fetch villa, rooms, packages and amenities, tagged with this request number.
    FetchPublic(u64),
    FetchAdmin(u64),
    Login { username: String, password: String },
    /// Navigate to another screen (the guard's redirect, post-login, logout).
    Redirect(Route),
}

/// Collects the guard's navigation request so it can be handed to the host.
#[derive(Default)]
struct PendingRedirect(Option<Route>);

impl Navigator for PendingRedirect {
    fn navigate(&mut self, route: &str) {
        match Route::from_path(route) {
            Some(r) => self.0 = Some(r),
            None => warn!("Ignoring navigation to unknown route {}", route),
        }
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Navigate(route) => navigate(app, route),
        Action::Refresh => refresh(app),
        Action::VillaLoaded(request, _) if is_stale(app.public_request, request, "villa") => {
            Effect::None
        }
        Action::RoomsLoaded(request, _) if is_stale(app.public_request, request, "rooms") => {
            Effect::None
        }
        Action::PackagesLoaded(request, _) if is_stale(app.public_request, request, "packages") => {
            Effect::None
        }
        Action::AmenitiesLoaded(request, _)
            if is_stale(app.public_request, request, "amenities") =>
        {
            Effect::None
        }
        Action::AdminBookingsLoaded(request, _)
            if is_stale(app.admin_request, request, "bookings") =>
        {
            Effect::None
        }
        Action::VillaLoaded(_, result) => {
            app.villa.finish(result.map(|v| vec![v]));
            app.description_expanded = false;
            settle_status(app);
            Effect::None
        }
        Action::RoomsLoaded(_, result) => {
            app.rooms.finish(result);
            app.room_filter.set_rooms(app.rooms.data.clone());
            settle_status(app);
            Effect::None
        }
        Action::PackagesLoaded(_, result) => {
            app.packages.finish(result);
            settle_status(app);
            Effect::None
        }
        Action::AmenitiesLoaded(_, result) => {
            app.amenities.finish(result);
            settle_status(app);
            Effect::None
        }
        Action::AdminBookingsLoaded(_, result) => {
            app.admin_bookings.finish(result);
            if let Some(err) = &app.admin_bookings.error {
                app.status_message = format!("Bookings failed: {}", err);
            }
            Effect::None
        }
        Action::SelectCategory(category) => {
            app.room_filter.set_active_category(category);
            Effect::None
        }
        Action::NextCategory => {
            app.room_filter.next_category();
            Effect::None
        }
        Action::PreviousCategory => {
            app.room_filter.previous_category();
            Effect::None
        }
        Action::ToggleDescription => {
            if app.about_description().is_truncated {
                app.description_expanded = !app.description_expanded;
            }
            Effect::None
        }
        Action::SubmitLogin { username, password } => {
            if app.login_pending {
                return Effect::None;
            }
            if username.trim().is_empty() || password.is_empty() {
                app.login_error = Some("Username and password are required".to_string());
                return Effect::None;
            }
            app.login_pending = true;
            app.login_error = None;
            app.status_message = "Signing in...".to_string();
            Effect::Login {
                username: username.trim().to_string(),
                password,
            }
        }
        Action::LoginSucceeded => {
            app.login_pending = false;
            app.login_error = None;
            if let Err(e) = guard::sign_in(app.session_store.as_ref()) {
                warn!("Could not record admin session: {}", e);
                app.login_error = Some(format!("Could not start session: {}", e));
                return Effect::None;
            }
            info!("Admin signed in");
            app.status_message = "Signed in".to_string();
            Effect::Redirect(Route::Admin)
        }
        Action::LoginFailed(message) => {
            app.login_pending = false;
            app.status_message = "Sign-in failed".to_string();
            app.login_error = Some(message);
            Effect::None
        }
        Action::Logout => {
            if let Err(e) = guard::sign_out(app.session_store.as_ref()) {
                warn!("Could not clear admin session: {}", e);
            }
            if let Err(e) = app.tokens.clear() {
                warn!("Could not clear auth token: {}", e);
            }
            app.admin_bookings = Default::default();
            // Bookings still in flight belong to the old session.
            app.admin_request += 1;
            info!("Admin signed out");
            app.status_message = "Signed out".to_string();
            Effect::Redirect(Route::Home)
        }
        Action::Quit => Effect::Quit,
    }
}

fn navigate(app: &mut App, route: Route) -> Effect {
    info!("Navigate {} -> {}", app.route.path(), route.path());
    let entering_admin = route == Route::Admin;
    app.route = route;

    if !entering_admin {
        return Effect::None;
    }

    // Re-entry always re-runs the check.
    app.admin_guard.remount();
    let mut pending = PendingRedirect::default();
    match app.admin_guard.mount(app.session_store.as_ref(), &mut pending) {
        GuardState::Authenticated => {
            app.admin_bookings.start();
            app.admin_request += 1;
            Effect::FetchAdmin(app.admin_request)
        }
        _ => pending.0.map(Effect::Redirect).unwrap_or(Effect::None),
    }
}

fn refresh(app: &mut App) -> Effect {
    if app.route == Route::Admin && app.admin_guard.state() == GuardState::Authenticated {
        app.admin_bookings.start();
        app.admin_request += 1;
        app.status_message = "Refreshing bookings...".to_string();
        return Effect::FetchAdmin(app.admin_request);
    }
    app.villa.start();
    app.rooms.start();
    app.packages.start();
    app.amenities.start();
    app.public_request += 1;
    app.status_message = "Loading...".to_string();
    Effect::FetchPublic(app.public_request)
}

fn is_stale(latest: u64, request: u64, what: &str) -> bool {
    if request == latest {
        return false;
    }
    debug!("Dropping stale {} response #{} (latest #{})", what, request, latest);
    true
}

/// Once every public list has landed, summarize the outcome in the status bar.
fn settle_status(app: &mut App) {
    if app.is_loading() {
        return;
    }
    let failures = [
        &app.villa.error,
        &app.rooms.error,
        &app.packages.error,
        &app.amenities.error,
    ]
    .iter()
    .filter(|e| e.is_some())
    .count();

    app.status_message = if failures == 0 {
        "Ready".to_string()
    } else {
        format!("{} request(s) failed, press r to retry", failures)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::{ADMIN_SESSION_KEY, GuardState};
    use crate::test_support::test_app;

    fn room(kind: &str) -> Room {
        Room {
            kind: Some(kind.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_refresh_starts_public_fetch() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Refresh), Effect::FetchPublic(1));
        assert!(app.is_loading());
        assert!(app.rooms.loading);
    }

    #[test]
    fn test_failed_fetch_exposes_error_with_empty_data() {
        let mut app = test_app();
        update(&mut app, Action::Refresh);
        update(&mut app, Action::PackagesLoaded(1, Err("request timed out".to_string())));
        assert!(!app.packages.loading);
        assert!(app.packages.data.is_empty());
        assert_eq!(app.packages.error.as_deref(), Some("request timed out"));
    }

    #[test]
    fn test_status_settles_after_all_lists_land() {
        let mut app = test_app();
        update(&mut app, Action::Refresh);
        update(&mut app, Action::VillaLoaded(1, Ok(Villa::default())));
        update(&mut app, Action::RoomsLoaded(1, Ok(vec![])));
        update(&mut app, Action::PackagesLoaded(1, Err("boom".to_string())));
        assert_eq!(app.status_message, "Loading...");
        update(&mut app, Action::AmenitiesLoaded(1, Ok(vec![])));
        assert_eq!(app.status_message, "1 request(s) failed, press r to retry");
    }

    #[test]
    fn test_rooms_loaded_feeds_filter() {
        let mut app = test_app();
        update(&mut app, Action::RoomsLoaded(0, Ok(vec![room("Suite"), room("villa")])));
        assert_eq!(app.room_filter.categories(), &["all", "suite", "villa"]);
        update(&mut app, Action::SelectCategory("villa".to_string()));
        assert_eq!(app.room_filter.filtered_rooms().len(), 1);
        update(&mut app, Action::NextCategory);
        assert_eq!(app.room_filter.active_category(), "all");
    }

    #[test]
    fn test_admin_without_session_redirects_to_login() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Navigate(Route::Admin));
        assert_eq!(effect, Effect::Redirect(Route::AdminLogin));
        assert_eq!(app.admin_guard.state(), GuardState::Unauthenticated);
        assert!(!app.admin_bookings.loading);
    }

    #[test]
    fn test_admin_with_session_fetches_bookings() {
        let mut app = test_app();
        app.session_store.set(ADMIN_SESSION_KEY, "true").unwrap();
        let effect = update(&mut app, Action::Navigate(Route::Admin));
        assert_eq!(effect, Effect::FetchAdmin(1));
        assert_eq!(app.admin_guard.state(), GuardState::Authenticated);
        assert!(app.admin_bookings.loading);
    }

    #[test]
    fn test_login_flow_sets_session_and_redirects_to_admin() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::SubmitLogin {
                username: " admin ".to_string(),
                password: "pw".to_string(),
            },
        );
        assert_eq!(
            effect,
            Effect::Login {
                username: "admin".to_string(),
                password: "pw".to_string()
            }
        );
        assert!(app.login_pending);

        assert_eq!(update(&mut app, Action::LoginSucceeded), Effect::Redirect(Route::Admin));
        assert_eq!(
            app.session_store.get(ADMIN_SESSION_KEY).unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(update(&mut app, Action::Navigate(Route::Admin)), Effect::FetchAdmin(1));
    }

    #[test]
    fn test_login_requires_credentials() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::SubmitLogin {
                username: "".to_string(),
                password: "".to_string(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.login_error.is_some());
        assert!(!app.login_pending);
    }

    #[test]
    fn test_login_failure_keeps_user_signed_out() {
        let mut app = test_app();
        update(
            &mut app,
            Action::SubmitLogin {
                username: "admin".to_string(),
                password: "bad".to_string(),
            },
        );
        update(&mut app, Action::LoginFailed("API error (HTTP 401): nope".to_string()));
        assert!(!app.login_pending);
        assert_eq!(app.login_error.as_deref(), Some("API error (HTTP 401): nope"));
        assert_eq!(app.session_store.get(ADMIN_SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_logout_clears_session_and_token() {
        let mut app = test_app();
        app.session_store.set(ADMIN_SESSION_KEY, "true").unwrap();
        app.tokens.set_token("tok").unwrap();
        assert_eq!(update(&mut app, Action::Logout), Effect::Redirect(Route::Home));
        assert_eq!(app.session_store.get(ADMIN_SESSION_KEY).unwrap(), None);
        assert_eq!(app.tokens.token(), None);
    }

    #[test]
    fn test_toggle_description_only_when_truncated() {
        let mut app = test_app();
        update(
            &mut app,
            Action::VillaLoaded(0, Ok(Villa {
                description: Some("short".to_string()),
                ..Default::default()
            })),
        );
        update(&mut app, Action::ToggleDescription);
        assert!(!app.description_expanded);

        update(
            &mut app,
            Action::VillaLoaded(0, Ok(Villa {
                description: Some("x".repeat(500)),
                ..Default::default()
            })),
        );
        update(&mut app, Action::ToggleDescription);
        assert!(app.description_expanded);
    }

    #[test]
    fn test_refresh_on_authenticated_admin_refetches_bookings() {
        let mut app = test_app();
        app.session_store.set(ADMIN_SESSION_KEY, "true").unwrap();
        update(&mut app, Action::Navigate(Route::Admin));
        update(&mut app, Action::AdminBookingsLoaded(1, Ok(vec![])));
        assert_eq!(update(&mut app, Action::Refresh), Effect::FetchAdmin(2));
    }

    #[test]
    fn test_older_refresh_results_are_dropped() {
        let mut app = test_app();
        update(&mut app, Action::Refresh);
        update(&mut app, Action::Refresh);

        update(&mut app, Action::RoomsLoaded(2, Ok(vec![room("Suite")])));
        update(&mut app, Action::RoomsLoaded(1, Ok(vec![room("Villa"), room("Cabin")])));
        assert_eq!(app.rooms.data, vec![room("Suite")]);

        update(&mut app, Action::PackagesLoaded(1, Err("late".to_string())));
        assert!(app.packages.loading);
        assert_eq!(app.packages.error, None);
    }

    #[test]
    fn test_bookings_from_before_logout_are_dropped() {
        let mut app = test_app();
        app.session_store.set(ADMIN_SESSION_KEY, "true").unwrap();
        assert_eq!(update(&mut app, Action::Navigate(Route::Admin)), Effect::FetchAdmin(1));
        update(&mut app, Action::Logout);

        let late = vec![AdminBooking {
            guest_name: Some("Ana Lima".to_string()),
            ..Default::default()
        }];
        update(&mut app, Action::AdminBookingsLoaded(1, Ok(late)));
        assert!(app.admin_bookings.data.is_empty());
    }
}
