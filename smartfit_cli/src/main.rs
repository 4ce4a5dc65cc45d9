use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use smartfit_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "smartfit")]
#[command(about = "Per-exercise workout history tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new set
    Add {
        /// Exercise name (case-sensitive)
        exercise: String,

        #[arg(long)]
        reps: i32,

        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        #[arg(long)]
        notes: Option<String>,

        /// Mark the set as a warm-up set
        #[arg(long)]
        warmup: bool,

        #[arg(long, value_enum)]
        intensity: Option<IntensityArg>,
    },

    /// Change reps, weight and notes of a recorded set
    Edit {
        exercise: String,
        set_id: Uuid,

        #[arg(long)]
        reps: i32,

        #[arg(long)]
        weight: f64,

        /// New notes (omit to clear)
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a recorded set
    Delete { exercise: String, set_id: Uuid },

    /// Show sets of an exercise, most recent first
    History {
        exercise: String,

        /// Maximum number of sets to show
        #[arg(long, conflicts_with = "all")]
        limit: Option<usize>,

        /// Show every set
        #[arg(long)]
        all: bool,

        /// First day to include (YYYY-MM-DD, UTC)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD, UTC)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Total sets and best weight for an exercise
    Stats { exercise: String },

    /// Compare the last N days with the N days before
    Progress {
        exercise: String,

        #[arg(long)]
        days: Option<i64>,
    },

    /// Totals across all exercises
    Summary,

    /// Export the full history (text report on stdout by default)
    Export {
        /// Write a CSV file instead
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write a backup snapshot JSON file instead
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Delete all recorded history
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum IntensityArg {
    Light,
    Moderate,
    Intense,
}

impl From<IntensityArg> for Intensity {
    fn from(arg: IntensityArg) -> Self {
        match arg {
            IntensityArg::Light => Intensity::Light,
            IntensityArg::Moderate => Intensity::Moderate,
            IntensityArg::Intense => Intensity::Intense,
        }
    }
}

fn main() -> Result<()> {
    smartfit_core::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }

    let history_path = config.history_path();
    tracing::debug!("Using history file {:?}", history_path);
    let mut store = HistoryStore::open(JsonFileStorage::new(history_path));
    if let LoadStatus::Recovered(reason) = store.load_status() {
        eprintln!("Warning: stored history could not be read ({}). Starting empty.", reason);
    }

    match cli.command {
        Commands::Add {
            exercise,
            reps,
            weight,
            notes,
            warmup,
            intensity,
        } => {
            validate_set(reps, weight)?;
            let mut entry = SetEntry::new(reps, weight).set_type(if warmup {
                SetType::Heating
            } else {
                SetType::Series
            });
            if let Some(notes) = non_blank(notes) {
                entry = entry.notes(notes);
            }
            if let Some(intensity) = intensity {
                entry = entry.intensity(intensity.into());
            }
            cmd_add(&mut store, &exercise, entry)
        }
        Commands::Edit {
            exercise,
            set_id,
            reps,
            weight,
            notes,
        } => {
            validate_set(reps, weight)?;
            let set = store.update_set(&exercise, set_id, reps, weight, non_blank(notes))?;
            println!("✓ Set updated for {}", exercise);
            print_set(&set);
            Ok(())
        }
        Commands::Delete { exercise, set_id } => {
            if store.delete_set(&exercise, set_id)? {
                println!("✓ Set {} deleted from {}", set_id, exercise);
            } else {
                println!("No set {} found for {}; nothing deleted.", set_id, exercise);
            }
            Ok(())
        }
        Commands::History {
            exercise,
            limit,
            all,
            from,
            to,
        } => cmd_history(&store, &config, &exercise, limit, all, from, to),
        Commands::Stats { exercise } => {
            let stats = store.get_stats(&exercise);
            println!("{}", exercise);
            println!("  Total sets:  {}", stats.total_sets);
            println!("  Best weight: {:.1} kg", stats.best_weight);
            Ok(())
        }
        Commands::Progress { exercise, days } => {
            let days = days.unwrap_or(config.history.progress_days);
            if days <= 0 {
                return Err(Error::InvalidInput(format!(
                    "--days must be positive, got {}",
                    days
                )));
            }
            let period = Duration::try_days(days)
                .ok_or_else(|| Error::InvalidInput(format!("--days {} is out of range", days)))?;
            let progress = store.calculate_progress(&exercise, period);
            println!("{} (last {} days vs previous {})", exercise, days, days);
            println!("  Weight progress: {:+.1}%", progress.weight_progress);
            println!("  Volume progress: {:+.1}%", progress.volume_progress);
            Ok(())
        }
        Commands::Summary => {
            let most = store.get_most_performed_exercise();
            println!("Total sets:        {}", store.get_total_workout_sets());
            println!("Tracked exercises: {}", store.get_tracked_exercises_count());
            println!("Most performed:    {} ({} sets)", most.name, most.count);
            Ok(())
        }
        Commands::Export { csv, snapshot } => cmd_export(&store, csv, snapshot),
        Commands::Reset { yes } => {
            if !yes {
                return Err(Error::InvalidInput(
                    "reset deletes all history; pass --yes to confirm".into(),
                ));
            }
            let sets = store.get_total_workout_sets();
            store.reset_all_data()?;
            println!("✓ History reset ({} sets removed)", sets);
            Ok(())
        }
    }
}

/// Input rules the store itself does not enforce
fn validate_set(reps: i32, weight: f64) -> Result<()> {
    if reps <= 0 {
        return Err(Error::InvalidInput(format!(
            "reps must be positive, got {}",
            reps
        )));
    }
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::InvalidInput(format!(
            "weight must be zero or more kilograms, got {}",
            weight
        )));
    }
    Ok(())
}

fn non_blank(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

fn cmd_add(
    store: &mut HistoryStore<JsonFileStorage>,
    exercise: &str,
    entry: SetEntry,
) -> Result<()> {
    let set = store.add_set(exercise, entry)?;
    println!(
        "✓ Set recorded for {}: {} reps x {:.1} kg",
        exercise,
        set.reps(),
        set.weight()
    );
    println!("  id: {}", set.id());
    Ok(())
}

fn cmd_history(
    store: &HistoryStore<JsonFileStorage>,
    config: &Config,
    exercise: &str,
    limit: Option<usize>,
    all: bool,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let mut sets = if from.is_some() || to.is_some() {
        let start = match from {
            Some(day) => start_of_day(day)?,
            None => DateTime::<Utc>::MIN_UTC,
        };
        let end = match to {
            Some(day) => end_of_day(day)?,
            None => DateTime::<Utc>::MAX_UTC,
        };
        store.get_history_in_date_range(exercise, start, end)
    } else if all {
        store.get_history(exercise)
    } else {
        store.get_recent_history(exercise, limit.unwrap_or(config.history.recent_limit))
    };

    if let Some(limit) = limit {
        sets.truncate(limit);
    }

    if sets.is_empty() {
        println!("No sets recorded for {}", exercise);
        return Ok(());
    }

    println!("{} ({} sets)", exercise, sets.len());
    for set in &sets {
        print_set(set);
    }
    Ok(())
}

fn cmd_export(
    store: &HistoryStore<JsonFileStorage>,
    csv: Option<PathBuf>,
    snapshot: Option<PathBuf>,
) -> Result<()> {
    if csv.is_none() && snapshot.is_none() {
        print!("{}", store.export_all_data());
        return Ok(());
    }

    if let Some(path) = csv {
        let rows = export::export_csv(store.get_all_history(), &path)?;
        println!("✓ Exported {} sets to {}", rows, path.display());
    }

    if let Some(path) = snapshot {
        let snapshot = HistorySnapshot::timestamped(store.get_all_history(), Utc::now());
        snapshot.write_to(&path)?;
        println!("✓ Snapshot {} written to {}", snapshot.filename, path.display());
    }

    Ok(())
}

fn print_set(set: &WorkoutSet) {
    let mut line = format!(
        "  {}  {}  {} reps x {:.1} kg",
        set.id(),
        set.date().format("%Y-%m-%d %H:%M"),
        set.reps(),
        set.weight()
    );
    if set.set_type() == Some(SetType::Heating) {
        line.push_str("  [warm-up]");
    }
    if let Some(intensity) = set.intensity() {
        line.push_str(&format!("  [{}]", intensity.as_str()));
    }
    if let Some(notes) = set.notes() {
        line.push_str(&format!("  {}", notes));
    }
    println!("{}", line);
}

fn start_of_day(day: NaiveDate) -> Result<DateTime<Utc>> {
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| Error::InvalidInput(format!("invalid date {}", day)))
}

fn end_of_day(day: NaiveDate) -> Result<DateTime<Utc>> {
    day.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| Error::InvalidInput(format!("invalid date {}", day)))
}
