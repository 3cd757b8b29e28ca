//! Screens of the app, addressed by the same paths the website uses.

use crate::core::guard::LOGIN_ROUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Rooms,
    Packages,
    Admin,
    AdminLogin,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Rooms => "/rooms",
            Route::Packages => "/packages",
            Route::Admin => "/admin",
            Route::AdminLogin => LOGIN_ROUTE,
        }
    }

    /// Unknown paths resolve to `None`; trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        [
            Route::Home,
            Route::Rooms,
            Route::Packages,
            Route::Admin,
            Route::AdminLogin,
        ]
        .into_iter()
        .find(|r| r.path() == path)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Rooms => "Rooms",
            Route::Packages => "Packages",
            Route::Admin => "Admin",
            Route::AdminLogin => "Admin Login",
        }
    }

    /// Tabs reachable from the title bar, in display order.
    pub fn tabs() -> [Route; 4] {
        [Route::Home, Route::Rooms, Route::Packages, Route::Admin]
    }
}
