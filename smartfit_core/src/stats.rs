//! Derived statistics over recorded sets.
//!
//! Everything here is a pure function of its inputs; the store calls these
//! with its current history and a clock reading.

use crate::{HistoryMap, WorkoutSet};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Label reported when there is no most-performed exercise
pub const NO_EXERCISE: &str = "none";

/// Per-exercise totals
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExerciseStats {
    pub total_sets: usize,
    /// Heaviest weight recorded, 0.0 for an empty history
    pub best_weight: f64,
}

/// Recent window vs. the window before it, as percentages (may be negative)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Progress {
    pub weight_progress: f64,
    pub volume_progress: f64,
}

/// Exercise with the most recorded sets
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MostPerformed {
    pub name: String,
    pub count: usize,
}

impl MostPerformed {
    /// Sentinel for an empty store
    pub fn none() -> Self {
        Self {
            name: NO_EXERCISE.to_string(),
            count: 0,
        }
    }

    pub fn is_none(&self) -> bool {
        self.count == 0 && self.name == NO_EXERCISE
    }
}

pub fn exercise_stats(sets: &[WorkoutSet]) -> ExerciseStats {
    ExerciseStats {
        total_sets: sets.len(),
        best_weight: max_weight(sets.iter()),
    }
}

/// Compare `(now - period, now]` against `(now - 2*period, now - period]`.
///
/// A zero baseline yields 0% rather than an error. Window starts that would
/// fall before the earliest representable date are clamped to it.
pub fn progress(sets: &[WorkoutSet], period: Duration, now: DateTime<Utc>) -> Progress {
    let recent_start = now
        .checked_sub_signed(period)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let older_start = recent_start
        .checked_sub_signed(period)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let in_window = |start: DateTime<Utc>, end: DateTime<Utc>| {
        sets.iter()
            .filter(move |s| s.date() > start && s.date() <= end)
    };

    let recent_max = max_weight(in_window(recent_start, now));
    let older_max = max_weight(in_window(older_start, recent_start));
    let recent_volume: f64 = in_window(recent_start, now).map(WorkoutSet::volume).sum();
    let older_volume: f64 = in_window(older_start, recent_start).map(WorkoutSet::volume).sum();

    tracing::debug!(
        recent_max,
        older_max,
        recent_volume,
        older_volume,
        "Computed progress windows"
    );

    Progress {
        weight_progress: percent_change(recent_max, older_max),
        volume_progress: percent_change(recent_volume, older_volume),
    }
}

/// `(recent - older) / older * 100`, or 0 when the baseline is not positive
pub fn percent_change(recent: f64, older: f64) -> f64 {
    if older > 0.0 {
        (recent - older) / older * 100.0
    } else {
        0.0
    }
}

/// Key with the largest set list.
///
/// Ties go to the lexicographically smallest name: the map iterates in key
/// order and only a strictly larger count replaces the current leader.
pub fn most_performed(history: &HistoryMap) -> MostPerformed {
    let mut best: Option<(&String, usize)> = None;
    for (name, sets) in history {
        match best {
            Some((_, count)) if sets.len() <= count => {}
            _ => best = Some((name, sets.len())),
        }
    }

    match best {
        Some((name, count)) => MostPerformed {
            name: name.clone(),
            count,
        },
        None => MostPerformed::none(),
    }
}

pub fn total_sets(history: &HistoryMap) -> usize {
    history.values().map(Vec::len).sum()
}

fn max_weight<'a>(sets: impl Iterator<Item = &'a WorkoutSet>) -> f64 {
    sets.map(WorkoutSet::weight).fold(0.0, f64::max)
}
