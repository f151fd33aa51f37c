// In-memory state: the event/user store and its relationship tables

use crate::auth::password::Password;
use crate::core::errors::EventsError;
use crate::core::models::User;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod memory_store;
pub mod relationships;

/// Lookup and registration operations the auth flow needs from a store
///
/// Implementations must make `create_user` atomic with respect to concurrent
/// callers: no two users may share an id or an email.
pub trait UserStore: Send + Sync {
    fn get_user_by_email(&self, email: &str) -> Option<User>;

    /// Stored password hash for `email`, if a credential record exists
    fn credential_hash(&self, email: &str) -> Option<String>;

    fn create_user(&self, email: &str, username: &str, password: &Password) -> Result<User, EventsError>;
}

/// Monotonic id source for one collection
#[derive(Debug)]
pub struct IdSequence(AtomicU64);

impl IdSequence {
    /// Sequence whose first id is 1
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    /// Sequence whose first id is `max_existing + 1`
    pub fn starting_after(max_existing: u64) -> Self {
        Self(AtomicU64::new(max_existing + 1))
    }

    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
