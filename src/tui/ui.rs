//! Screen layout: title bar, the current route's screen, footer.
//!
//! ```text
//! ┌ title bar (1) ───────────────────────────────┐
//! │ main area: Home | Rooms | Packages | Admin    │
//! │            | Admin Login                      │
//! └ footer (2, hidden on the login screen) ──────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    AboutSection, AdminGate, AmenitiesList, FOOTER_HEIGHT, Footer, LoginForm, PackageList,
    RoomList, TitleBar, loadable_notice,
};

pub fn draw_ui(frame: &mut Frame, app: &mut App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let footer_height = if app.route == Route::AdminLogin {
        0
    } else {
        FOOTER_HEIGHT
    };
    let [title_area, main_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(footer_height)]).areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.villa_name().to_string(),
        app.route,
        app.status_message.clone(),
    );
    title_bar.render(frame, title_area);

    match app.route {
        Route::Home => draw_home(frame, main_area, app, tui),
        Route::Rooms => draw_rooms(frame, main_area, app, tui),
        Route::Packages => {
            PackageList {
                state: &mut tui.package_list,
                packages: &app.packages.data,
                notice: loadable_notice("packages", &app.packages),
            }
            .render(frame, main_area);
        }
        Route::Admin => {
            AdminGate {
                guard: &app.admin_guard,
                bookings: &app.admin_bookings.data,
                notice: loadable_notice("bookings", &app.admin_bookings),
            }
            .render(frame, main_area);
        }
        Route::AdminLogin => {
            LoginForm {
                state: &mut tui.login_form,
                pending: app.login_pending,
                error: app.login_error.as_deref(),
            }
            .render(frame, main_area);
        }
    }

    if footer_height > 0 {
        let contact = app.villa_info().map(|v| &v.contact);
        Footer::new(app.villa_name(), contact, footer_hints(app.route)).render(frame, footer_area);
    }
}

fn footer_hints(route: Route) -> &'static str {
    match route {
        Route::Home => "1-4 screens · Enter read more · ↑/↓ scroll · r refresh · q quit",
        Route::Rooms => "1-4 screens · ←/→ category · ↑/↓ scroll · r refresh · q quit",
        Route::Packages => "1-4 screens · ↑/↓ select · r refresh · q quit",
        Route::Admin => "1-4 screens · r refresh · l sign out · q quit",
        Route::AdminLogin => "",
    }
}

fn draw_home(frame: &mut Frame, area: Rect, app: &mut App, tui: &mut TuiState) {
    let description = app.about_description().clone();
    let amenity_items = app.amenity_items();
    let mut amenities = AmenitiesList {
        items: &amenity_items,
        notice: loadable_notice("amenities", &app.amenities),
    };

    // Amenities keep at most half the screen; About takes the rest.
    let amenities_height = amenities.height(area.width).min(area.height / 2);
    let [about_area, amenities_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(amenities_height),
    ])
    .areas(area);

    match (app.villa_info(), loadable_notice("villa details", &app.villa)) {
        (Some(villa), _) => {
            let mut about = AboutSection {
                title: app.villa_name(),
                tagline: villa.tagline.as_deref(),
                location: villa.location.as_deref(),
                hero_image: app.images.first(&villa.images),
                description: &description,
                expanded: app.description_expanded,
                scroll: tui.home_scroll,
            };
            about.render(frame, about_area);
        }
        (None, notice) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" About ");
            frame.render_widget(Paragraph::new(notice.unwrap_or_default()).block(block), about_area);
        }
    }

    amenities.render(frame, amenities_area);
}

fn draw_rooms(frame: &mut Frame, area: Rect, app: &mut App, tui: &mut TuiState) {
    let notice = if app.rooms.data.is_empty() {
        loadable_notice("rooms", &app.rooms)
    } else {
        None
    };
    let categories = app.room_filter.categories().to_vec();
    let active_category = app.room_filter.active_category().to_string();
    let rooms = app.room_filter.filtered_rooms();

    RoomList {
        state: &mut tui.room_list,
        categories: &categories,
        active_category: &active_category,
        rooms: &rooms,
        images: &app.images,
        notice,
    }
    .render(frame, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AdminBooking, Amenity, Room, Villa};
    use crate::core::action::{Action, Effect, update};
    use crate::test_support::{render_to_string, test_app};

    fn draw(app: &mut App) -> String {
        let mut tui = TuiState::new();
        render_to_string(100, 30, |f| draw_ui(f, app, &mut tui))
    }

    fn villa() -> Villa {
        Villa {
            name: Some("Villa Azul".to_string()),
            tagline: Some("Quiet luxury by the sea".to_string()),
            description: Some("A whitewashed villa above the cove.".to_string()),
            images: vec!["images/hero.jpg".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_home_shows_villa_and_amenities() {
        let mut app = test_app();
        update(&mut app, Action::VillaLoaded(0, Ok(villa())));
        update(
            &mut app,
            Action::AmenitiesLoaded(0, Ok(vec![Amenity {
                name: Some("Swimming Pool".to_string()),
                ..Default::default()
            }])),
        );
        let text = draw(&mut app);
        assert!(text.contains("About Villa Azul"));
        assert!(text.contains("A whitewashed villa above the cove."));
        assert!(text.contains("Swimming Pool"));
        assert!(text.contains("/hero.jpg"));
    }

    #[test]
    fn test_home_while_loading_shows_notices() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Refresh), Effect::FetchPublic(1));
        let text = draw(&mut app);
        assert!(text.contains("Loading villa details..."));
        assert!(text.contains("Loading amenities..."));
    }

    #[test]
    fn test_rooms_screen_filters_by_category() {
        let mut app = test_app();
        let rooms = vec![
            Room {
                name: Some("Ocean Suite".to_string()),
                kind: Some("Suite".to_string()),
                ..Default::default()
            },
            Room {
                name: Some("Garden Villa".to_string()),
                kind: Some("Villa".to_string()),
                ..Default::default()
            },
        ];
        update(&mut app, Action::RoomsLoaded(0, Ok(rooms)));
        update(&mut app, Action::Navigate(Route::Rooms));
        update(&mut app, Action::SelectCategory("villa".to_string()));
        let text = draw(&mut app);
        assert!(text.contains("Garden Villa"));
        assert!(!text.contains("Ocean Suite"));
    }

    #[test]
    fn test_admin_without_session_never_shows_bookings() {
        let mut app = test_app();
        app.admin_bookings.data = vec![AdminBooking {
            guest_name: Some("Ana Lima".to_string()),
            ..Default::default()
        }];
        let effect = update(&mut app, Action::Navigate(Route::Admin));
        assert_eq!(effect, Effect::Redirect(Route::AdminLogin));

        let text = draw(&mut app);
        assert!(!text.contains("Ana Lima"));
    }

    #[test]
    fn test_login_screen_hides_footer() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Route::AdminLogin));
        let text = draw(&mut app);
        assert!(text.contains("Admin sign in"));
        assert!(!text.contains("q quit"));
    }
}
