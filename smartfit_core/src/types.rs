//! Core domain types for the workout history.
//!
//! This module defines:
//! - Recorded sets and their optional tags
//! - The caller-side payload for a new set
//! - The exercise-name keyed history mapping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// Set Tags
// ============================================================================

/// Working set or warm-up set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    Series,
    Heating,
}

/// Perceived effort of a set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Light,
    Moderate,
    Intense,
}

impl SetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetType::Series => "series",
            SetType::Heating => "heating",
        }
    }
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Moderate => "moderate",
            Intensity::Intense => "intense",
        }
    }
}

// ============================================================================
// Recorded Sets
// ============================================================================

/// One recorded set of an exercise.
///
/// `id` and `date` are fixed at construction; only the store changes
/// reps, weight and notes after that.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    id: Uuid,
    date: DateTime<Utc>,
    reps: i32,
    weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    set_type: Option<SetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intensity: Option<Intensity>,
}

impl WorkoutSet {
    /// Build a set from an entry, stamping it with a fresh id and `date`
    pub fn new(entry: SetEntry, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            reps: entry.reps,
            weight: entry.weight,
            notes: entry.notes,
            set_type: entry.set_type,
            intensity: entry.intensity,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn reps(&self) -> i32 {
        self.reps
    }

    /// Weight in kilograms
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_type(&self) -> Option<SetType> {
        self.set_type
    }

    pub fn intensity(&self) -> Option<Intensity> {
        self.intensity
    }

    /// Training load of this set (reps x weight)
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }

    pub(crate) fn apply_update(&mut self, reps: i32, weight: f64, notes: Option<String>) {
        self.reps = reps;
        self.weight = weight;
        self.notes = notes;
    }
}

/// Values supplied by the caller when recording a new set.
///
/// The store does not validate these; front ends check `reps > 0` and
/// `weight >= 0` before calling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetEntry {
    pub reps: i32,
    pub weight: f64,
    pub notes: Option<String>,
    pub set_type: Option<SetType>,
    pub intensity: Option<Intensity>,
}

impl SetEntry {
    pub fn new(reps: i32, weight: f64) -> Self {
        Self {
            reps,
            weight,
            ..Self::default()
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn set_type(mut self, set_type: SetType) -> Self {
        self.set_type = Some(set_type);
        self
    }

    pub fn intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = Some(intensity);
        self
    }
}

/// Exercise name -> recorded sets. Keys are case-sensitive and used verbatim.
pub type HistoryMap = BTreeMap<String, Vec<WorkoutSet>>;
