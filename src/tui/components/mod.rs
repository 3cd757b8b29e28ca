//! # TUI Components
//!
//! Everything drawn on screen.
//!
//! ## Component Architecture
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields each frame:
//! - `TitleBar`: villa name, screen tabs, status
//! - `AboutSection`: villa details and the processed description
//! - `AmenitiesList`: icon + label grid
//! - `AdminGate`: the guard's loading / nothing / bookings states
//! - `Footer`: contact line and copyright
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep a persistent `*State` in `TuiState` and wrap it each frame:
//! - `RoomList`: category tabs and scrollable room cards
//! - `PackageList`: selectable packages with details
//! - `LoginForm`: username / password entry
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`
//! themselves. This keeps their dependencies explicit and lets each one be
//! rendered in isolation on a `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── about.rs
//! ├── amenities.rs
//! ├── room_list.rs
//! ├── package_list.rs
//! ├── admin_gate.rs
//! ├── login_form.rs
//! ├── notice.rs        (loading / error / empty lines)
//! └── footer.rs
//! ```

mod about;
mod admin_gate;
mod amenities;
mod footer;
mod login_form;
mod notice;
mod package_list;
mod room_list;
mod title_bar;

pub use about::AboutSection;
pub use admin_gate::AdminGate;
pub use amenities::AmenitiesList;
pub use footer::{FOOTER_HEIGHT, Footer};
pub use login_form::{LoginEvent, LoginForm, LoginFormState};
pub use notice::loadable_notice;
pub use package_list::{PackageList, PackageListState, PackageNavigator};
pub use room_list::{RoomList, RoomListState};
pub use title_bar::TitleBar;
