// User → event relationship tables (favorites, schedule)

use crate::core::models::{Favorite, Schedule};
use crate::state::IdSequence;
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// A record linking one user to one event
pub trait EventLink: Clone {
    fn user_id(&self) -> u64;
    fn event_id(&self) -> u64;

    fn links(&self, user_id: u64, event_id: u64) -> bool {
        self.user_id() == user_id && self.event_id() == event_id
    }
}

impl EventLink for Favorite {
    fn user_id(&self) -> u64 {
        self.user_id
    }

    fn event_id(&self) -> u64 {
        self.event_id
    }
}

impl EventLink for Schedule {
    fn user_id(&self) -> u64 {
        self.user_id
    }

    fn event_id(&self) -> u64 {
        self.event_id
    }
}

/// Ordered table holding at most one record per (user_id, event_id) pair
///
/// Lookup-or-insert runs under a single write lock, so two concurrent adds
/// for the same pair still yield one record.
#[derive(Debug)]
pub struct LinkTable<T> {
    records: RwLock<Vec<T>>,
    ids: IdSequence,
}

impl<T: EventLink> LinkTable<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            ids: IdSequence::new(),
        }
    }

    /// Return the existing record for the pair, or create one with a fresh id.
    ///
    /// `make` only runs on creation; an existing record comes back unchanged.
    /// Returns the record and whether it was created.
    pub fn get_or_insert_with(&self, user_id: u64, event_id: u64, make: impl FnOnce(u64) -> T) -> (T, bool) {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = records.iter().find(|r| r.links(user_id, event_id)) {
            return (existing.clone(), false);
        }

        let record = make(self.ids.next_id());
        records.push(record.clone());
        (record, true)
    }

    /// Remove the first record for the pair. Returns whether one was removed.
    pub fn remove(&self, user_id: u64, event_id: u64) -> bool {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        match records.iter().position(|r| r.links(user_id, event_id)) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn event_ids_for(&self, user_id: u64) -> HashSet<u64> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.user_id() == user_id)
            .map(EventLink::event_id)
            .collect()
    }

    pub fn records_for(&self, user_id: u64) -> Vec<T> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: EventLink> Default for LinkTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
