// Process-wide in-memory store for events, places, users and their relationships

use crate::auth::password::{Password, PasswordHasher};
use crate::core::errors::EventsError;
use crate::core::models::{Event, EventFilter, Favorite, NearbyPlace, Schedule, User};
use crate::state::relationships::LinkTable;
use crate::state::{IdSequence, UserStore};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Default)]
struct UserTable {
    users: Vec<User>,
    /// email -> password hash
    credentials: HashMap<String, String>,
}

/// In-memory store
///
/// Constructed once at startup and shared behind an `Arc`. Events and places
/// are fixed at construction. Users, favorites and schedules grow at runtime,
/// each collection with its own monotonic id sequence.
#[derive(Debug)]
pub struct InMemoryStore {
    events: Vec<Event>,
    places: Vec<NearbyPlace>,
    users: RwLock<UserTable>,
    user_ids: IdSequence,
    favorites: LinkTable<Favorite>,
    schedules: LinkTable<Schedule>,
    hasher: PasswordHasher,
}

impl InMemoryStore {
    /// Create a store over a fixed catalogue of events and places
    pub fn new(events: Vec<Event>, places: Vec<NearbyPlace>, hasher: PasswordHasher) -> Self {
        Self {
            events,
            places,
            users: RwLock::new(UserTable::default()),
            user_ids: IdSequence::new(),
            favorites: LinkTable::new(),
            schedules: LinkTable::new(),
            hasher,
        }
    }

    /// Store with no events, places or users
    pub fn empty(hasher: PasswordHasher) -> Self {
        Self::new(Vec::new(), Vec::new(), hasher)
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    // ---- events ----

    /// All events in insertion order
    pub fn all_events(&self) -> Vec<Event> {
        self.events.clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn get_event_by_id(&self, event_id: u64) -> Result<Event, EventsError> {
        self.events
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
            .ok_or_else(|| EventsError::NotFound("Event".to_string()))
    }

    /// Events satisfying every filter that is set, in insertion order
    pub fn filter_events(&self, filter: &EventFilter) -> Vec<Event> {
        self.events.iter().filter(|e| filter.matches(e)).cloned().collect()
    }

    /// Case-insensitive substring search over name, description, category,
    /// area and station. An empty query returns every event.
    pub fn search_events(&self, query: &str) -> Vec<Event> {
        if query.is_empty() {
            return self.all_events();
        }

        let needle = query.to_lowercase();
        let hit = |field: &str| field.to_lowercase().contains(&needle);
        self.events
            .iter()
            .filter(|e| {
                hit(&e.name)
                    || hit(&e.description)
                    || hit(&e.category)
                    || hit(&e.location.area)
                    || e.location.station.as_deref().map_or(false, hit)
            })
            .cloned()
            .collect()
    }

    // ---- places ----

    /// Places matching both filters when set (exact match)
    pub fn get_nearby_places(&self, area: Option<&str>, place_type: Option<&str>) -> Vec<NearbyPlace> {
        let area = area.filter(|s| !s.is_empty());
        let place_type = place_type.filter(|s| !s.is_empty());
        self.places
            .iter()
            .filter(|p| area.map_or(true, |a| p.location.area == a))
            .filter(|p| place_type.map_or(true, |t| p.place_type.as_str() == t))
            .cloned()
            .collect()
    }

    pub fn get_nearby_place_by_id(&self, place_id: u64) -> Result<NearbyPlace, EventsError> {
        self.places
            .iter()
            .find(|p| p.id == place_id)
            .cloned()
            .ok_or_else(|| EventsError::NotFound("Place".to_string()))
    }

    // ---- users ----

    pub fn user_count(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).users.len()
    }

    // ---- favorites ----

    /// Favorite the event for the user. Repeats return the existing record.
    pub fn add_favorite(&self, user_id: u64, event_id: u64) -> Favorite {
        let (favorite, created) = self
            .favorites
            .get_or_insert_with(user_id, event_id, |id| Favorite { id, user_id, event_id });
        if created {
            debug!(user_id, event_id, favorite_id = favorite.id, "Favorite added");
        }
        favorite
    }

    pub fn remove_favorite(&self, user_id: u64, event_id: u64) -> bool {
        let removed = self.favorites.remove(user_id, event_id);
        debug!(user_id, event_id, removed, "Favorite removal");
        removed
    }

    /// Favorited events, in catalogue order
    pub fn get_user_favorites(&self, user_id: u64) -> Vec<Event> {
        let ids = self.favorites.event_ids_for(user_id);
        self.events.iter().filter(|e| ids.contains(&e.id)).cloned().collect()
    }

    pub fn get_user_favorite_records(&self, user_id: u64) -> Vec<Favorite> {
        self.favorites.records_for(user_id)
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    // ---- schedule ----

    /// Schedule the event for the user. `reminder` is only applied when the
    /// entry is created; a repeat returns the existing entry untouched.
    pub fn add_to_schedule(&self, user_id: u64, event_id: u64, reminder: bool) -> Schedule {
        let (schedule, created) = self.schedules.get_or_insert_with(user_id, event_id, |id| Schedule {
            id,
            user_id,
            event_id,
            reminder,
        });
        if created {
            debug!(user_id, event_id, schedule_id = schedule.id, reminder, "Schedule entry added");
        }
        schedule
    }

    pub fn remove_from_schedule(&self, user_id: u64, event_id: u64) -> bool {
        let removed = self.schedules.remove(user_id, event_id);
        debug!(user_id, event_id, removed, "Schedule removal");
        removed
    }

    /// Scheduled events, in catalogue order
    pub fn get_user_schedule(&self, user_id: u64) -> Vec<Event> {
        let ids = self.schedules.event_ids_for(user_id);
        self.events.iter().filter(|e| ids.contains(&e.id)).cloned().collect()
    }

    pub fn get_user_schedule_records(&self, user_id: u64) -> Vec<Schedule> {
        self.schedules.records_for(user_id)
    }

    pub fn schedule_count(&self) -> usize {
        self.schedules.len()
    }
}

impl UserStore for InMemoryStore {
    fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    fn credential_hash(&self, email: &str) -> Option<String> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .credentials
            .get(email)
            .cloned()
    }

    fn create_user(&self, email: &str, username: &str, password: &Password) -> Result<User, EventsError> {
        // Cheap pre-check so duplicates skip the hash
        if self.get_user_by_email(email).is_some() {
            return Err(EventsError::Duplicate("Email".to_string()));
        }

        // Hash outside the lock
        let password_hash = self.hasher.hash(password)?;

        let mut table = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if table.users.iter().any(|u| u.email == email) {
            return Err(EventsError::Duplicate("Email".to_string()));
        }

        let user = User {
            id: self.user_ids.next_id(),
            username: username.to_string(),
            email: email.to_string(),
            is_active: true,
        };
        table.users.push(user.clone());
        table.credentials.insert(email.to_string(), password_hash);

        debug!(user_id = user.id, "User created");
        Ok(user)
    }
}
