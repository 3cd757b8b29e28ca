//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! `update()` returns an `Effect`; this module performs it:
//!
//! - `FetchPublic` / `FetchAdmin` / `Login`: spawn a tokio task that calls the
//!   API and sends the result back as an `Action` over an mpsc channel. Fetch
//!   results carry the request number they were started with
//! - `Redirect(route)`: dispatch `Action::Navigate(route)` (the admin guard's
//!   redirect to the login screen arrives this way)
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms waiting for input and
//! only redraws after an event, a resize or a finished request.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{BookingApi, BookingClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::route::Route;
use crate::core::state::App;
use crate::core::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::core::token::AuthTokenStore;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    LoginEvent, LoginFormState, PackageListState, PackageNavigator, RoomListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub home_scroll: u16,
    pub room_list: RoomListState,
    pub package_list: PackageListState,
    pub login_form: LoginFormState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            home_scroll: 0,
            room_list: RoomListState::new(),
            package_list: PackageListState::new(),
            login_form: LoginFormState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Persistent storage for the auth token. Falls back to memory (token lost
/// on exit) when the storage directory is unusable.
fn build_token_store(config: &ResolvedConfig) -> AuthTokenStore {
    let store: Arc<dyn KeyValueStore> = match config.storage_dir.as_deref().map(FileStore::in_dir) {
        Some(Ok(file_store)) => {
            info!("Persisting auth token in {}", file_store.path().display());
            Arc::new(file_store)
        }
        Some(Err(e)) => {
            warn!("Storage directory unusable ({}), keeping the token in memory", e);
            Arc::new(MemoryStore::new())
        }
        None => {
            warn!("No storage directory, keeping the token in memory");
            Arc::new(MemoryStore::new())
        }
    };
    AuthTokenStore::new(store)
}

pub fn run(config: ResolvedConfig, start: Route) -> std::io::Result<()> {
    let tokens = build_token_store(&config);
    let client = BookingClient::new(
        &config.api_base_url,
        Duration::from_secs(config.api_timeout_secs),
        tokens.clone(),
    )
    .map_err(|e| {
        warn!("Could not build API client: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    // The admin flag lives for this process only.
    let session_store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut app = App::new(Arc::new(client), &config, session_store, tokens);
    let mut tui = TuiState::new();

    let health_api = app.api.clone();
    tokio::spawn(async move {
        check_health(health_api.as_ref()).await;
    });

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    dispatch(&mut app, &mut tui, Action::Refresh, &tx);
    dispatch(&mut app, &mut tui, Action::Navigate(start), &tx);

    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &mut app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = action_for_event(&app, &mut tui, event) {
                should_quit |= dispatch(&mut app, &mut tui, action, &tx);
            }
        }

        // Results from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            should_quit |= dispatch(&mut app, &mut tui, action, &tx);
        }
    }

    ratatui::restore();
    info!("Villa shutting down");
    Ok(())
}

/// Apply an action and every follow-up it causes. Returns true on quit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    let mut next = Some(action);
    while let Some(action) = next.take() {
        let leaving_rooms = app.route == Route::Rooms;
        let category_change = matches!(
            action,
            Action::NextCategory | Action::PreviousCategory | Action::SelectCategory(_)
        );
        let login_result = matches!(action, Action::LoginSucceeded | Action::LoginFailed(_));

        match update(app, action) {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::FetchPublic(request) => {
                spawn_fetch_public(app.api.clone(), request, tx.clone());
            }
            Effect::FetchAdmin(request) => spawn_fetch_admin(app.api.clone(), request, tx.clone()),
            Effect::Login { username, password } => {
                spawn_login(app.api.clone(), username, password, tx.clone());
            }
            Effect::Redirect(route) => next = Some(Action::Navigate(route)),
        }

        if category_change || (leaving_rooms && app.route != Route::Rooms) {
            tui.room_list.reset_scroll();
        }
        if login_result {
            tui.login_form.reset_password();
        }
    }
    false
}

/// Translate a key into an action for the current screen. Events that only
/// move presentation state are handled here and yield `None`.
fn action_for_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if matches!(event, TuiEvent::Resize) {
        return None;
    }

    // The login form owns the keyboard while it is open.
    if app.route == Route::AdminLogin {
        return match tui.login_form.handle_event(&event)? {
            LoginEvent::Submit { username, password } => {
                Some(Action::SubmitLogin { username, password })
            }
            LoginEvent::Cancel => Some(Action::Navigate(Route::Home)),
        };
    }

    match event {
        TuiEvent::InputChar('q') | TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::InputChar('r') => Some(Action::Refresh),
        TuiEvent::InputChar(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Route::tabs().get(index).copied().map(Action::Navigate)
        }
        TuiEvent::Tab => Some(Action::Navigate(cycle_tab(app.route, 1))),
        TuiEvent::BackTab => Some(Action::Navigate(cycle_tab(app.route, -1))),
        TuiEvent::InputChar('l') if app.route == Route::Admin => Some(Action::Logout),
        event => screen_event(app, tui, event),
    }
}

fn screen_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match app.route {
        Route::Home => match event {
            TuiEvent::Submit => {
                tui.home_scroll = 0;
                Some(Action::ToggleDescription)
            }
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                tui.home_scroll = tui.home_scroll.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                tui.home_scroll = tui.home_scroll.saturating_add(1);
                None
            }
            _ => None,
        },
        Route::Rooms => match event {
            TuiEvent::CursorLeft => Some(Action::PreviousCategory),
            TuiEvent::CursorRight => Some(Action::NextCategory),
            event => {
                tui.room_list.handle_event(&event);
                None
            }
        },
        Route::Packages => {
            PackageNavigator {
                state: &mut tui.package_list,
                len: app.packages.data.len(),
            }
            .handle_event(&event);
            None
        }
        Route::Admin | Route::AdminLogin => None,
    }
}

/// Next title-bar tab in `step` direction. The login screen counts as Admin.
fn cycle_tab(current: Route, step: isize) -> Route {
    let tabs = Route::tabs();
    let current = if current == Route::AdminLogin {
        Route::Admin
    } else {
        current
    };
    let index = tabs.iter().position(|r| *r == current).unwrap_or(0) as isize;
    let len = tabs.len() as isize;
    tabs[(index + step).rem_euclid(len) as usize]
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to deliver request result: receiver dropped");
    }
}

/// Villa, rooms, packages and amenities in parallel. Each result lands on
/// its own, so one failing list never blanks the others.
fn spawn_fetch_public(api: Arc<dyn BookingApi>, request: u64, tx: mpsc::Sender<Action>) {
    info!("Fetching public data (request #{})", request);
    tokio::spawn(async move {
        let (villa, rooms, packages, amenities) =
            futures::join!(api.villa(), api.rooms(), api.packages(), api.amenities());
        debug!("Public fetch #{} finished", request);
        send(&tx, Action::VillaLoaded(request, villa.map_err(|e| e.to_string())));
        send(&tx, Action::RoomsLoaded(request, rooms.map_err(|e| e.to_string())));
        send(&tx, Action::PackagesLoaded(request, packages.map_err(|e| e.to_string())));
        send(&tx, Action::AmenitiesLoaded(request, amenities.map_err(|e| e.to_string())));
    });
}

fn spawn_fetch_admin(api: Arc<dyn BookingApi>, request: u64, tx: mpsc::Sender<Action>) {
    info!("Fetching admin bookings (request #{})", request);
    tokio::spawn(async move {
        let result = api.admin_bookings().await.map_err(|e| e.to_string());
        send(&tx, Action::AdminBookingsLoaded(request, result));
    });
}

/// Log whether the booking API answers. Startup does not wait on it.
async fn check_health(api: &dyn BookingApi) -> bool {
    match api.health().await {
        Ok(health) => {
            info!(
                "Booking API healthy (status: {})",
                health.status.as_deref().unwrap_or("unknown")
            );
            true
        }
        Err(e) => {
            warn!("Booking API health check failed: {}", e);
            false
        }
    }
}

fn spawn_login(
    api: Arc<dyn BookingApi>,
    username: String,
    password: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Signing in as {}", username);
    tokio::spawn(async move {
        match api.login(&username, &password).await {
            Ok(_) => send(&tx, Action::LoginSucceeded),
            Err(e) => {
                warn!("Login failed: {}", e);
                send(&tx, Action::LoginFailed(e.to_string()));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::sign_in;
    use crate::test_support::{NoopApi, test_app};

    #[test]
    fn test_number_keys_switch_tabs() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            action_for_event(&app, &mut tui, TuiEvent::InputChar('2')),
            Some(Action::Navigate(Route::Rooms))
        );
        assert_eq!(
            action_for_event(&app, &mut tui, TuiEvent::InputChar('4')),
            Some(Action::Navigate(Route::Admin))
        );
        assert_eq!(action_for_event(&app, &mut tui, TuiEvent::InputChar('5')), None);
    }

    #[test]
    fn test_cycle_tab_wraps() {
        assert_eq!(cycle_tab(Route::Home, -1), Route::Admin);
        assert_eq!(cycle_tab(Route::Admin, 1), Route::Home);
        assert_eq!(cycle_tab(Route::AdminLogin, 1), Route::Home);
    }

    #[test]
    fn test_login_screen_captures_typing() {
        let mut app = test_app();
        app.route = Route::AdminLogin;
        let mut tui = TuiState::new();
        assert_eq!(action_for_event(&app, &mut tui, TuiEvent::InputChar('q')), None);
        assert_eq!(tui.login_form.username, "q");
        assert_eq!(
            action_for_event(&app, &mut tui, TuiEvent::Escape),
            Some(Action::Navigate(Route::Home))
        );
    }

    #[test]
    fn test_rooms_arrows_change_category() {
        let mut app = test_app();
        app.route = Route::Rooms;
        let mut tui = TuiState::new();
        assert_eq!(
            action_for_event(&app, &mut tui, TuiEvent::CursorRight),
            Some(Action::NextCategory)
        );
    }

    #[tokio::test]
    async fn test_dispatch_follows_guard_redirect() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::channel();
        assert!(!dispatch(&mut app, &mut tui, Action::Navigate(Route::Admin), &tx));
        assert_eq!(app.route, Route::AdminLogin);
    }

    #[tokio::test]
    async fn test_dispatch_fetches_bookings_when_signed_in() {
        let mut app = test_app();
        sign_in(app.session_store.as_ref()).unwrap();
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();
        dispatch(&mut app, &mut tui, Action::Navigate(Route::Admin), &tx);
        assert_eq!(app.route, Route::Admin);
        assert!(app.admin_bookings.loading);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(2)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(action, Action::AdminBookingsLoaded(1, Ok(Vec::new())));
    }

    #[tokio::test]
    async fn test_refresh_results_carry_request_number() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();
        dispatch(&mut app, &mut tui, Action::Refresh, &tx);
        dispatch(&mut app, &mut tui, Action::Refresh, &tx);

        let mut received = tokio::task::spawn_blocking(move || {
            (0..8)
                .map(|_| rx.recv_timeout(Duration::from_secs(2)).unwrap())
                .collect::<Vec<_>>()
        })
        .await
        .unwrap();
        received.retain(|a| matches!(a, Action::RoomsLoaded(..)));
        received.sort_by_key(|a| match a {
            Action::RoomsLoaded(request, _) => *request,
            _ => 0,
        });
        assert_eq!(
            received,
            vec![
                Action::RoomsLoaded(1, Ok(Vec::new())),
                Action::RoomsLoaded(2, Ok(Vec::new()))
            ]
        );
    }

    #[tokio::test]
    async fn test_health_check_reports_status() {
        assert!(check_health(&NoopApi).await);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(action_for_event(&app, &mut tui, TuiEvent::InputChar('q')), Some(Action::Quit));
        assert_eq!(action_for_event(&app, &mut tui, TuiEvent::ForceQuit), Some(Action::Quit));

        let (tx, _rx) = mpsc::channel();
        assert!(dispatch(&mut app, &mut tui, Action::Quit, &tx));
    }
}
