//! Keyed write locks serializing validate-then-write sequences.
//!
//! A mutating operation names the rows it reads to make its decision (the
//! target block, the course weekday, the candidate teacher or subject) and
//! holds their locks until its single repository write has been applied.
//! Keys are always acquired in sorted order, so two operations can never wait
//! on each other in a cycle.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::models::{BlockId, CourseId, SubjectId, TeacherId};

type SlotMap = Arc<Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>>;

/// A lockable row or row group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LockKey {
    /// All blocks of one course weekday. Taken by layout writes (save, copy,
    /// erase). Assignments lock only their block and rely on the repository
    /// refusing writes to rows a layout write has deactivated.
    CourseDay(CourseId, u8),
    Block(BlockId),
    /// A teacher's timetable across every course of the year.
    Teacher(TeacherId),
    /// The minutes a course spends on one subject.
    CourseSubject(CourseId, SubjectId),
    /// The subject row itself (guards against concurrent deactivation).
    Subject(SubjectId),
}

/// Guards held for the duration of one operation. Dropping releases them and
/// prunes slots nobody else is holding or waiting on.
#[derive(Debug)]
pub struct LockSet {
    keys: Vec<LockKey>,
    guards: Vec<OwnedMutexGuard<()>>,
    slots: SlotMap,
}

impl LockSet {
    pub fn keys(&self) -> &[LockKey] {
        &self.keys
    }
}

impl Drop for LockSet {
    fn drop(&mut self) {
        self.guards.clear();

        // Waiters clone their slot under this map lock, so a count of one
        // means only the map still refers to it.
        let mut slots = self.slots.lock();
        for key in &self.keys {
            if slots.get(key).is_some_and(|slot| Arc::strong_count(slot) == 1) {
                slots.remove(key);
            }
        }
    }
}

/// Registry of per-key async mutexes. A slot lives only while some
/// operation holds or awaits it.
#[derive(Debug, Clone, Default)]
pub struct LockManager {
    slots: SlotMap,
}

impl LockManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: LockKey) -> Arc<AsyncMutex<()>> {
        let mut slots = self.slots.lock();
        Arc::clone(slots.entry(key).or_default())
    }

    /// Acquire every key, in sorted order, waiting as needed.
    pub async fn acquire(&self, keys: impl IntoIterator<Item = LockKey>) -> LockSet {
        let mut keys: Vec<LockKey> = keys.into_iter().collect();
        keys.sort();
        keys.dedup();

        let mut set = LockSet {
            keys: Vec::with_capacity(keys.len()),
            guards: Vec::with_capacity(keys.len()),
            slots: Arc::clone(&self.slots),
        };
        for key in keys {
            let slot = self.slot(key);
            // Registered before awaiting so a cancelled acquire still prunes.
            set.keys.push(key);
            set.guards.push(slot.lock_owned().await);
        }
        debug!("Acquired locks {:?}", set.keys);
        set
    }

    /// Number of keys currently held or awaited.
    pub fn slot_count(&self) -> usize {
        self.slots.lock().len()
    }
}
