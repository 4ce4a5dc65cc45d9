//! Export formatters for the full history.
//!
//! - `render_report`: plain-text report meant for copy/share
//! - `write_csv` / `export_csv`: one row per set for spreadsheets
//!
//! Both list exercises alphabetically and sets most recent first.

use crate::stats;
use crate::{HistoryMap, Result, WorkoutSet};
use std::fmt::Write as _;
use std::path::Path;

const REPORT_TITLE: &str = "=== SmartFit - Storico Allenamenti ===";
const SUMMARY_TITLE: &str = "=== Riepilogo ===";
const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Sets of one exercise, most recent first
fn sorted_sets(sets: &[WorkoutSet]) -> Vec<&WorkoutSet> {
    let mut sorted: Vec<&WorkoutSet> = sets.iter().collect();
    sorted.sort_by(|a, b| b.date().cmp(&a.date()));
    sorted
}

fn report_line(set: &WorkoutSet) -> String {
    let mut line = format!(
        "{} - {} reps x {:.1} kg",
        set.date().format(DATE_FORMAT),
        set.reps(),
        set.weight()
    );
    if let Some(notes) = set.notes().filter(|n| !n.trim().is_empty()) {
        let _ = write!(line, " - Note: {}", notes);
    }
    line
}

/// Render the whole history as a human-readable report.
///
/// Deterministic for a given mapping; dates are shown in UTC.
pub fn render_report(history: &HistoryMap) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_TITLE);
    let _ = writeln!(out);

    if history.is_empty() {
        let _ = writeln!(out, "Nessun allenamento registrato.");
        let _ = writeln!(out);
    }

    // BTreeMap iteration is already ascending by name
    for (exercise, sets) in history {
        let _ = writeln!(out, "--- {} ---", exercise);
        if sets.is_empty() {
            let _ = writeln!(out, "Nessuna serie registrata");
        }
        for set in sorted_sets(sets) {
            let _ = writeln!(out, "{}", report_line(set));
        }
        let _ = writeln!(out);
    }

    let most = stats::most_performed(history);
    let _ = writeln!(out, "{}", SUMMARY_TITLE);
    let _ = writeln!(out, "Serie totali: {}", stats::total_sets(history));
    let _ = writeln!(out, "Esercizi monitorati: {}", history.len());
    let _ = writeln!(out, "Esercizio più eseguito: {} ({} serie)", most.name, most.count);

    out
}

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    exercise: &'a str,
    id: String,
    date: String,
    reps: i32,
    weight: f64,
    notes: Option<&'a str>,
    #[serde(rename = "type")]
    set_type: Option<&'static str>,
    intensity: Option<&'static str>,
}

impl<'a> CsvRow<'a> {
    fn new(exercise: &'a str, set: &'a WorkoutSet) -> Self {
        CsvRow {
            exercise,
            id: set.id().to_string(),
            date: set.date().to_rfc3339(),
            reps: set.reps(),
            weight: set.weight(),
            notes: set.notes(),
            set_type: set.set_type().map(|t| t.as_str()),
            intensity: set.intensity().map(|i| i.as_str()),
        }
    }
}

/// Write every set as CSV (with header) to `writer`; returns the row count
pub fn write_csv<W: std::io::Write>(history: &HistoryMap, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for (exercise, sets) in history {
        for set in sorted_sets(sets) {
            csv_writer.serialize(CsvRow::new(exercise, set))?;
            rows += 1;
        }
    }

    // An empty history still gets a header line
    if rows == 0 {
        csv_writer.write_record([
            "exercise", "id", "date", "reps", "weight", "notes", "type", "intensity",
        ])?;
    }

    csv_writer.flush()?;
    Ok(rows)
}

/// Write the CSV export to a file, replacing it if present
pub fn export_csv(history: &HistoryMap, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let rows = write_csv(history, std::io::BufWriter::new(&file))?;
    file.sync_all()?;

    tracing::info!("Exported {} sets to {:?}", rows, path);
    Ok(rows)
}
