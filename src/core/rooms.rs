//! # Room Filter
//!
//! Category tabs over the room list.
//!
//! ```text
//! rooms ──┬── categories()      ["all", "suite", "villa", ...]  first-seen order
//!         └── filtered_rooms()  rooms whose lowercased type == active category
//!                               (every room when active == "all")
//! ```
//!
//! Both derived lists are cached. The room list carries a revision number
//! that changes on every `set_rooms`, so the caches know when the list is new
//! without comparing contents.

use log::debug;

use crate::api::Room;

/// Synthetic category that disables filtering.
pub const ALL_CATEGORY: &str = "all";

/// The lowercased, non-empty type of a room, if it has one.
fn room_category(room: &Room) -> Option<String> {
    room.kind
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// `"all"` followed by every distinct room category, in first-seen order.
pub fn categories(rooms: &[Room]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORY.to_string()];
    for category in rooms.iter().filter_map(room_category) {
        if !out.contains(&category) {
            out.push(category);
        }
    }
    out
}

/// Rooms matching `category` (case-insensitive), in their original order.
/// An unknown category yields an empty list.
pub fn filter_rooms<'a>(rooms: &'a [Room], category: &str) -> Vec<&'a Room> {
    matching_indices(rooms, category)
        .into_iter()
        .map(|i| &rooms[i])
        .collect()
}

fn matching_indices(rooms: &[Room], category: &str) -> Vec<usize> {
    let category = category.to_lowercase();
    if category == ALL_CATEGORY {
        return (0..rooms.len()).collect();
    }
    rooms
        .iter()
        .enumerate()
        .filter(|(_, room)| room_category(room).as_deref() == Some(category.as_str()))
        .map(|(i, _)| i)
        .collect()
}

/// Stateful filter: the room list, the selected category and memoized views.
pub struct RoomFilter {
    rooms: Vec<Room>,
    revision: u64,
    active_category: String,
    categories_cache: Option<(u64, Vec<String>)>,
    filtered_cache: Option<(u64, String, Vec<usize>)>,
    recomputes: usize,
}

impl Default for RoomFilter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RoomFilter {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            revision: 0,
            active_category: ALL_CATEGORY.to_string(),
            categories_cache: None,
            filtered_cache: None,
            recomputes: 0,
        }
    }

    /// Replace the room list. The active category is kept.
    pub fn set_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
        self.revision += 1;
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    /// Accepts any string; no check against the known categories.
    pub fn set_active_category(&mut self, category: impl Into<String>) {
        self.active_category = category.into();
    }

    pub fn categories(&mut self) -> &[String] {
        let revision = self.revision;
        if !matches!(&self.categories_cache, Some((rev, _)) if *rev == revision) {
            self.categories_cache = None;
        }

        let rooms = &self.rooms;
        let recomputes = &mut self.recomputes;
        let (_, cached) = self.categories_cache.get_or_insert_with(|| {
            *recomputes += 1;
            let found = categories(rooms);
            debug!("Recomputed room categories: {:?}", found);
            (revision, found)
        });
        cached
    }

    pub fn filtered_rooms(&mut self) -> Vec<&Room> {
        let revision = self.revision;
        let stale = !matches!(
            &self.filtered_cache,
            Some((rev, category, _)) if *rev == revision && *category == self.active_category
        );
        if stale {
            self.recomputes += 1;
            let indices = matching_indices(&self.rooms, &self.active_category);
            debug!(
                "Recomputed filtered rooms: {} of {} for '{}'",
                indices.len(),
                self.rooms.len(),
                self.active_category
            );
            self.filtered_cache = Some((revision, self.active_category.clone(), indices));
        }

        match &self.filtered_cache {
            Some((_, _, indices)) => indices.iter().map(|&i| &self.rooms[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Select the next discovered category, wrapping around.
    pub fn next_category(&mut self) {
        self.step_category(1);
    }

    pub fn previous_category(&mut self) {
        self.step_category(-1);
    }

    fn step_category(&mut self, delta: isize) {
        let active = self.active_category.to_lowercase();
        let categories = self.categories();
        let len = categories.len() as isize;
        // Unknown selections restart from "all" at index 0.
        let current = categories.iter().position(|c| *c == active).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        let next = categories[next].clone();
        self.active_category = next;
    }

    /// Number of times either derived list was rebuilt.
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str, kind: Option<&str>) -> Room {
        Room {
            name: Some(name.to_string()),
            kind: kind.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Room> {
        vec![
            room("Ocean", Some("Suite")),
            room("Garden", Some("villa")),
            room("Loft", Some("SUITE")),
            room("Shed", None),
            room("Blank", Some("")),
            room("Cabin", Some("Cabin")),
        ]
    }

    fn names(rooms: &[&Room]) -> Vec<String> {
        rooms.iter().map(|r| r.name.clone().unwrap_or_default()).collect()
    }

    #[test]
    fn test_categories_start_with_all_and_dedupe_case_insensitively() {
        assert_eq!(categories(&sample()), vec!["all", "suite", "villa", "cabin"]);
    }

    #[test]
    fn test_surrounding_whitespace_is_part_of_the_type() {
        let rooms = vec![
            room("Padded", Some(" Suite ")),
            room("Plain", Some("suite")),
            room("Spaces", Some("  ")),
        ];
        assert_eq!(categories(&rooms), vec!["all", " suite ", "suite", "  "]);
        assert_eq!(names(&filter_rooms(&rooms, "suite")), vec!["Plain"]);
        assert_eq!(names(&filter_rooms(&rooms, " SUITE ")), vec!["Padded"]);
    }

    #[test]
    fn test_categories_of_empty_list() {
        assert_eq!(categories(&[]), vec!["all"]);
    }

    #[test]
    fn test_filter_all_returns_every_room_including_untyped() {
        let rooms = sample();
        assert_eq!(filter_rooms(&rooms, "all").len(), rooms.len());
        assert!(filter_rooms(&[], "all").is_empty());
    }

    #[test]
    fn test_filter_by_category_preserves_order() {
        let rooms = sample();
        assert_eq!(names(&filter_rooms(&rooms, "suite")), vec!["Ocean", "Loft"]);
        assert_eq!(names(&filter_rooms(&rooms, "Suite")), vec!["Ocean", "Loft"]);
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        assert!(filter_rooms(&sample(), "penthouse").is_empty());
    }

    #[test]
    fn test_room_filter_starts_at_all() {
        let mut filter = RoomFilter::new(sample());
        assert_eq!(filter.active_category(), "all");
        assert_eq!(filter.filtered_rooms().len(), 6);
    }

    #[test]
    fn test_room_filter_setter_accepts_unknown() {
        let mut filter = RoomFilter::new(sample());
        filter.set_active_category("penthouse");
        assert!(filter.filtered_rooms().is_empty());
        assert_eq!(filter.active_category(), "penthouse");
    }

    #[test]
    fn test_room_filter_memoizes_until_dependency_changes() {
        let mut filter = RoomFilter::new(sample());
        filter.categories();
        filter.filtered_rooms();
        assert_eq!(filter.recomputes(), 2);

        filter.categories();
        filter.filtered_rooms();
        assert_eq!(filter.recomputes(), 2);

        // Category change rebuilds only the filtered view.
        filter.set_active_category("villa");
        assert_eq!(names(&filter.filtered_rooms()), vec!["Garden"]);
        filter.categories();
        assert_eq!(filter.recomputes(), 3);

        // New room list rebuilds both.
        filter.set_rooms(vec![room("Barn", Some("Villa"))]);
        assert_eq!(filter.categories(), &["all".to_string(), "villa".to_string()]);
        assert_eq!(names(&filter.filtered_rooms()), vec!["Barn"]);
        assert_eq!(filter.recomputes(), 5);
    }

    #[test]
    fn test_category_cycling_wraps() {
        let mut filter = RoomFilter::new(sample());
        filter.next_category();
        assert_eq!(filter.active_category(), "suite");
        filter.previous_category();
        filter.previous_category();
        assert_eq!(filter.active_category(), "cabin");
    }

    #[test]
    fn test_category_cycling_from_unknown_restarts_at_all() {
        let mut filter = RoomFilter::new(sample());
        filter.set_active_category("nope");
        filter.next_category();
        assert_eq!(filter.active_category(), "suite");
    }
}
