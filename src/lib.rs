//! Villa library exports for testing

use clap::ValueEnum;

use crate::core::route::Route;

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Screen shown after startup.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum StartScreen {
    #[default]
    Home,
    Rooms,
    Packages,
    Admin,
}

impl From<StartScreen> for Route {
    fn from(screen: StartScreen) -> Self {
        match screen {
            StartScreen::Home => Route::Home,
            StartScreen::Rooms => Route::Rooms,
            StartScreen::Packages => Route::Packages,
            StartScreen::Admin => Route::Admin,
        }
    }
}
