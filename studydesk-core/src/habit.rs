//! Daily habits and their store.
//!
//! Habits live beside assignments in the same desk: a durable list at
//! home, mirrored to the `habits` collection remotely. A habit is just a
//! name plus the set of days it was checked off; streaks are derived.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::durable::DurableStore;
use crate::error::{DeskError, DeskResult};
use crate::remote::{RemoteCollection, RemoteDoc, Snapshot};

/// A daily habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    /// Days this habit was checked off, ascending and deduplicated.
    #[serde(default)]
    pub checked_dates: Vec<NaiveDate>,
}

impl Habit {
    pub fn new(name: &str) -> DeskResult<Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeskError::Validation(
                "Habit name must not be blank".to_string(),
            ));
        }
        Ok(Habit {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            checked_dates: Vec::new(),
        })
    }

    pub fn validate(&self) -> DeskResult<()> {
        if self.id.trim().is_empty() {
            return Err(DeskError::Validation(
                "Habit id must not be blank".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(DeskError::Validation(
                "Habit name must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the habit was checked on the given day.
    pub fn checked_on(&self, date: NaiveDate) -> bool {
        self.checked_dates.binary_search(&date).is_ok()
    }

    /// Record a check-in, keeping the dates sorted and unique.
    /// Returns false when the day was already checked.
    pub fn check_in(&mut self, date: NaiveDate) -> bool {
        match self.checked_dates.binary_search(&date) {
            Ok(_) => false,
            Err(position) => {
                self.checked_dates.insert(position, date);
                true
            }
        }
    }

    /// Consecutive checked days ending today, or yesterday if today is
    /// still unchecked. A streak survives until the day it skips is over.
    pub fn streak(&self, today: NaiveDate) -> u32 {
        let mut day = if self.checked_on(today) {
            today
        } else {
            today - Duration::days(1)
        };

        let mut streak = 0;
        while self.checked_on(day) {
            streak += 1;
            day -= Duration::days(1);
        }
        streak
    }
}

/// Durable layout: one JSON object holding the whole list.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoredHabits {
    #[serde(default)]
    pub habits: Vec<Habit>,
}

/// The habit store. Same fan-out rules as the assignment store: durable
/// write-through on every mutation, background mirror to the remote
/// collection, snapshots replace the list wholesale.
pub struct HabitStore {
    habits: Vec<Habit>,
    revision: u64,
    durable: Box<dyn DurableStore>,
    remote: Option<Arc<dyn RemoteCollection>>,
    mirror_chain: Option<JoinHandle<()>>,
}

impl HabitStore {
    pub fn open(durable: Box<dyn DurableStore>) -> DeskResult<HabitStore> {
        let blob = durable.load()?;

        let mut store = HabitStore {
            habits: Vec::new(),
            revision: 0,
            durable,
            remote: None,
            mirror_chain: None,
        };

        if let Some(blob) = blob {
            let state: StoredHabits = serde_json::from_str(&blob)
                .map_err(|e| DeskError::Serialization(e.to_string()))?;
            store.replace_all(state.habits);
        }

        Ok(store)
    }

    /// Attach the remote collection mutations get mirrored to.
    /// Requires a Tokio runtime, like [`crate::store::AssignmentStore::with_remote`].
    pub fn with_remote(mut self, remote: Arc<dyn RemoteCollection>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn list(&self) -> Vec<Habit> {
        self.habits.clone()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn add(&mut self, name: &str) -> DeskResult<Habit> {
        let habit = Habit::new(name)?;
        self.habits.push(habit.clone());
        self.commit(habit.clone());
        Ok(habit)
    }

    /// Check a habit off for the given day. Returns false when that day
    /// was already checked; only a new check-in writes anything.
    pub fn check_in(&mut self, id: &str, date: NaiveDate) -> DeskResult<bool> {
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| DeskError::NotFound(format!("No habit with id '{}'", id)))?;

        if !habit.check_in(date) {
            return Ok(false);
        }

        let changed = habit.clone();
        self.commit(changed);
        Ok(true)
    }

    /// Replace the whole list, dropping invalid entries with a warning.
    /// No durable write and no mirroring, same as the assignment store.
    pub fn replace_all(&mut self, incoming: Vec<Habit>) {
        let mut accepted: Vec<Habit> = Vec::with_capacity(incoming.len());
        for mut habit in incoming {
            if let Err(e) = habit.validate() {
                warn!(id = %habit.id, error = %e, "Dropping invalid habit");
                continue;
            }
            if accepted.iter().any(|h| h.id == habit.id) {
                warn!(id = %habit.id, "Dropping habit with duplicate id");
                continue;
            }
            // Other frontends may deliver check-ins unsorted.
            habit.checked_dates.sort();
            habit.checked_dates.dedup();
            accepted.push(habit);
        }
        self.habits = accepted;
    }

    /// Apply a remote snapshot unless it is a stale echo of our own writes.
    /// Returns whether the snapshot was applied.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        let stamp = snapshot.revision();
        if stamp < self.revision {
            debug!(
                snapshot_revision = stamp,
                store_revision = self.revision,
                "Discarding stale remote snapshot"
            );
            return false;
        }

        self.revision = stamp;
        self.replace_all(snapshot.decode());
        true
    }

    /// Wait for outstanding mirror writes to land.
    pub async fn settle(&mut self) {
        if let Some(task) = self.mirror_chain.take() {
            let _ = task.await;
        }
    }

    fn commit(&mut self, changed: Habit) {
        self.revision += 1;
        self.persist();
        self.mirror(changed);
    }

    /// Serialize the list and write it durably, surfacing failures.
    pub fn save(&self) -> DeskResult<()> {
        let state = StoredHabits {
            habits: self.habits.clone(),
        };
        let blob = serde_json::to_string_pretty(&state)
            .map_err(|e| DeskError::Serialization(e.to_string()))?;
        self.durable.save(&blob)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to write habits to durable storage");
        }
    }

    fn mirror(&mut self, changed: Habit) {
        let Some(remote) = self.remote.clone() else {
            return;
        };
        let revision = self.revision;
        let previous = self.mirror_chain.take();

        let task = tokio::spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }

            let id = changed.id.clone();
            let outcome = match serde_json::to_value(RemoteDoc {
                entity: changed,
                revision: Some(revision),
            }) {
                Ok(doc) => remote.upsert(&id, doc).await,
                Err(e) => Err(DeskError::Serialization(e.to_string())),
            };

            if let Err(e) = outcome {
                warn!(error = %e, "Failed to mirror habit to the remote collection");
            }
        });

        self.mirror_chain = Some(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::durable::MemoryStore;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_with_memory() -> (HabitStore, MemoryStore) {
        let cell = MemoryStore::new();
        let store = HabitStore::open(Box::new(cell.clone())).unwrap();
        (store, cell)
    }

    // --- streaks ---

    #[test]
    fn streak_counts_consecutive_days_ending_today() {
        let mut habit = Habit::new("Revise flashcards").unwrap();
        habit.check_in(day(2026, 8, 20));
        habit.check_in(day(2026, 8, 21));
        habit.check_in(day(2026, 8, 22));

        assert_eq!(habit.streak(day(2026, 8, 22)), 3);
    }

    #[test]
    fn streak_survives_an_unchecked_today() {
        let mut habit = Habit::new("Revise flashcards").unwrap();
        habit.check_in(day(2026, 8, 20));
        habit.check_in(day(2026, 8, 21));

        assert_eq!(habit.streak(day(2026, 8, 22)), 2);
    }

    #[test]
    fn streak_breaks_on_a_gap() {
        let mut habit = Habit::new("Revise flashcards").unwrap();
        habit.check_in(day(2026, 8, 18));
        habit.check_in(day(2026, 8, 19));
        habit.check_in(day(2026, 8, 22));

        assert_eq!(habit.streak(day(2026, 8, 22)), 1);
        assert_eq!(habit.streak(day(2026, 8, 25)), 0);
    }

    #[test]
    fn check_in_is_idempotent_per_day() {
        let mut habit = Habit::new("Revise flashcards").unwrap();

        assert!(habit.check_in(day(2026, 8, 22)));
        assert!(!habit.check_in(day(2026, 8, 22)));
        assert_eq!(habit.checked_dates.len(), 1);
    }

    #[test]
    fn check_ins_stay_sorted_whatever_the_order() {
        let mut habit = Habit::new("Revise flashcards").unwrap();
        habit.check_in(day(2026, 8, 22));
        habit.check_in(day(2026, 8, 20));
        habit.check_in(day(2026, 8, 21));

        assert_eq!(
            habit.checked_dates,
            vec![day(2026, 8, 20), day(2026, 8, 21), day(2026, 8, 22)]
        );
        assert_eq!(habit.streak(day(2026, 8, 22)), 3);
    }

    // --- store ---

    #[test]
    fn add_and_check_in_write_through() {
        let (mut store, cell) = open_with_memory();

        let habit = store.add("Read 20 pages").unwrap();
        assert!(store.check_in(&habit.id, day(2026, 8, 22)).unwrap());

        let blob = cell.load().unwrap().unwrap();
        let state: StoredHabits = serde_json::from_str(&blob).unwrap();
        assert_eq!(state.habits[0].checked_dates, vec![day(2026, 8, 22)]);
    }

    #[test]
    fn repeat_check_in_reports_already_checked() {
        let (mut store, _) = open_with_memory();
        let habit = store.add("Read 20 pages").unwrap();

        assert!(store.check_in(&habit.id, day(2026, 8, 22)).unwrap());
        assert!(!store.check_in(&habit.id, day(2026, 8, 22)).unwrap());
    }

    #[test]
    fn check_in_on_a_missing_habit_is_not_found() {
        let (mut store, _) = open_with_memory();
        assert!(matches!(
            store.check_in("ghost", day(2026, 8, 22)),
            Err(DeskError::NotFound(_))
        ));
    }

    #[test]
    fn snapshot_replaces_habits_and_sorts_foreign_check_ins() {
        let (mut store, _) = open_with_memory();

        store.apply_snapshot(&Snapshot::new(vec![json!({
            "id": "h-1",
            "name": "Morning run",
            "checkedDates": ["2026-08-22", "2026-08-20", "2026-08-21"],
        })]));

        assert_eq!(store.len(), 1);
        let habit = &store.list()[0];
        assert_eq!(habit.streak(day(2026, 8, 22)), 3);
    }

    #[test]
    fn stale_habit_snapshot_is_discarded() {
        let (mut store, _) = open_with_memory();
        store.add("Read 20 pages").unwrap();

        store.apply_snapshot(&Snapshot::default());

        assert_eq!(store.len(), 1);
    }
}
