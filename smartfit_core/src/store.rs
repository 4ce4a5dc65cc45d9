//! The workout history store.
//!
//! `HistoryStore` owns the exercise -> sets mapping and is its only writer.
//! Every mutation rewrites the whole document through the injected
//! [`HistoryStorage`] before returning. Reads never touch storage.
//!
//! A failed write is returned as `Error::Persistence` but the in-memory
//! change is kept, so the next successful write brings storage back in line.

use crate::stats::{self, ExerciseStats, MostPerformed, Progress};
use crate::storage::HistoryStorage;
use crate::{codec, export, Error, HistoryMap, Result, SetEntry, WorkoutSet};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Default number of sets returned by `get_recent_history`
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// What happened when the store read its storage at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing stored yet
    Fresh,
    /// Document decoded successfully
    Loaded,
    /// Storage could not be read or decoded; started empty
    Recovered(String),
}

pub struct HistoryStore<S: HistoryStorage> {
    history: HistoryMap,
    storage: S,
    load_status: LoadStatus,
}

impl<S: HistoryStorage> HistoryStore<S> {
    /// Open the store on a backend, loading whatever it holds.
    ///
    /// A missing document gives an empty store. Unreadable or corrupt
    /// documents are logged and also give an empty store; the stored bytes
    /// are left alone until the next mutation overwrites them.
    pub fn open(storage: S) -> Self {
        let (history, load_status) = match storage.load() {
            Ok(None) => (HistoryMap::new(), LoadStatus::Fresh),
            Ok(Some(bytes)) => match codec::decode(&bytes) {
                Ok(history) => {
                    tracing::info!(
                        exercises = history.len(),
                        sets = stats::total_sets(&history),
                        "Loaded workout history"
                    );
                    (history, LoadStatus::Loaded)
                }
                Err(e) => {
                    tracing::warn!("Failed to decode workout history: {}. Starting empty.", e);
                    (HistoryMap::new(), LoadStatus::Recovered(e.to_string()))
                }
            },
            Err(e) => {
                tracing::warn!("Unable to read workout history: {}. Starting empty.", e);
                (HistoryMap::new(), LoadStatus::Recovered(e.to_string()))
            }
        };

        Self {
            history,
            storage,
            load_status,
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Record a new set stamped with the current time
    pub fn add_set(&mut self, exercise: &str, entry: SetEntry) -> Result<WorkoutSet> {
        self.add_set_at(exercise, entry, Utc::now())
    }

    /// Record a new set with an explicit timestamp.
    ///
    /// No validation happens here; zero or negative values are stored as given.
    pub fn add_set_at(
        &mut self,
        exercise: &str,
        entry: SetEntry,
        date: DateTime<Utc>,
    ) -> Result<WorkoutSet> {
        let set = WorkoutSet::new(entry, date);
        self.history
            .entry(exercise.to_string())
            .or_default()
            .push(set.clone());

        tracing::info!(
            exercise,
            set_id = %set.id(),
            reps = set.reps(),
            weight = set.weight(),
            "Added set"
        );

        self.persist()?;
        Ok(set)
    }

    /// Replace reps, weight and notes of an existing set.
    ///
    /// `id`, `date` and the set's tags are kept. Returns `Error::NotFound`
    /// without touching storage when the exercise or id is unknown.
    pub fn update_set(
        &mut self,
        exercise: &str,
        set_id: Uuid,
        reps: i32,
        weight: f64,
        notes: Option<String>,
    ) -> Result<WorkoutSet> {
        let set = self
            .history
            .get_mut(exercise)
            .and_then(|sets| sets.iter_mut().find(|s| s.id() == set_id))
            .ok_or_else(|| {
                tracing::warn!(exercise, %set_id, "Set to update not found");
                Error::NotFound {
                    exercise: exercise.to_string(),
                    set_id,
                }
            })?;

        set.apply_update(reps, weight, notes);
        let updated = set.clone();

        tracing::info!(exercise, %set_id, reps, weight, "Updated set");

        self.persist()?;
        Ok(updated)
    }

    /// Remove the set with this id.
    ///
    /// Returns `Ok(false)` (and writes nothing) when no set matched. The
    /// exercise key stays even if its list becomes empty.
    pub fn delete_set(&mut self, exercise: &str, set_id: Uuid) -> Result<bool> {
        let Some(sets) = self.history.get_mut(exercise) else {
            tracing::debug!(exercise, %set_id, "Delete on unknown exercise ignored");
            return Ok(false);
        };

        let before = sets.len();
        sets.retain(|s| s.id() != set_id);
        let removed = before - sets.len();

        if removed == 0 {
            tracing::debug!(exercise, %set_id, "Delete on unknown set ignored");
            return Ok(false);
        }

        tracing::info!(exercise, %set_id, "Deleted set");
        self.persist()?;
        Ok(true)
    }

    /// Drop every exercise and set, then persist the empty state
    pub fn reset_all_data(&mut self) -> Result<()> {
        let sets = stats::total_sets(&self.history);
        self.history.clear();
        tracing::info!(sets, "Reset all workout history");
        self.persist()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All sets of an exercise, most recent first
    pub fn get_history(&self, exercise: &str) -> Vec<WorkoutSet> {
        let mut sets = self.history.get(exercise).cloned().unwrap_or_default();
        sets.sort_by(|a, b| b.date().cmp(&a.date()));
        sets
    }

    pub fn get_recent_history(&self, exercise: &str, limit: usize) -> Vec<WorkoutSet> {
        let mut sets = self.get_history(exercise);
        sets.truncate(limit);
        sets
    }

    /// Sets with `start <= date <= end`, most recent first
    pub fn get_history_in_date_range(
        &self,
        exercise: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<WorkoutSet> {
        self.get_history(exercise)
            .into_iter()
            .filter(|s| s.date() >= start && s.date() <= end)
            .collect()
    }

    /// Read-only view of the full mapping
    pub fn get_all_history(&self) -> &HistoryMap {
        &self.history
    }

    pub fn get_stats(&self, exercise: &str) -> ExerciseStats {
        stats::exercise_stats(&self.get_history(exercise))
    }

    /// Last `period` vs. the `period` before it, measured from now
    pub fn calculate_progress(&self, exercise: &str, period: Duration) -> Progress {
        self.calculate_progress_at(exercise, period, Utc::now())
    }

    pub fn calculate_progress_at(
        &self,
        exercise: &str,
        period: Duration,
        now: DateTime<Utc>,
    ) -> Progress {
        stats::progress(&self.get_history(exercise), period, now)
    }

    pub fn get_total_workout_sets(&self) -> usize {
        stats::total_sets(&self.history)
    }

    pub fn get_tracked_exercises_count(&self) -> usize {
        self.history.len()
    }

    /// Exercise with the most sets; ties go to the alphabetically first name,
    /// `("none", 0)` when the store is empty
    pub fn get_most_performed_exercise(&self) -> MostPerformed {
        stats::most_performed(&self.history)
    }

    /// Human-readable report of the whole history
    pub fn export_all_data(&self) -> String {
        export::render_report(&self.history)
    }

    fn persist(&mut self) -> Result<()> {
        let result = codec::encode(&self.history).and_then(|bytes| {
            let len = bytes.len();
            self.storage.save(&bytes).map(|()| len)
        });

        match result {
            Ok(len) => {
                tracing::debug!("Saved workout history ({} bytes)", len);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to save workout history: {}. Keeping in-memory changes.", e);
                Err(Error::Persistence(e.to_string()))
            }
        }
    }
}
