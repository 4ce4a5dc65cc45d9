#![forbid(unsafe_code)]

//! Core domain model and business logic for SmartFit workout tracking.
//!
//! This crate provides:
//! - Domain types (recorded sets, set tags, training plans)
//! - The history store with CRUD, queries and statistics
//! - Persistence (JSON codec, file and in-memory backends)
//! - Export formatters (text report, CSV, backup snapshot)

pub mod types;
pub mod error;
pub mod plan;
pub mod config;
pub mod logging;
pub mod codec;
pub mod storage;
pub mod stats;
pub mod store;
pub mod export;
pub mod snapshot;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use plan::{Exercise, WorkoutDay, WorkoutPlan};
pub use config::Config;
pub use storage::{HistoryStorage, JsonFileStorage, MemoryStorage};
pub use stats::{ExerciseStats, MostPerformed, Progress};
pub use store::{HistoryStore, LoadStatus, DEFAULT_RECENT_LIMIT};
pub use snapshot::HistorySnapshot;
