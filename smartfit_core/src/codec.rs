//! JSON codec for the persisted history document.
//!
//! The whole mapping is written as one document:
//!
//! ```json
//! {"version":1,"workoutHistory":{"Bench Press":[{"id":"...","date":"2026-10-17T09:30:00.123456789Z","reps":8,"weight":50.0}]}}
//! ```
//!
//! Dates are RFC 3339 in UTC with full sub-second precision, so a decoded
//! document compares equal to the mapping it was encoded from.

use crate::{Error, HistoryMap, Result};
use serde::{Deserialize, Serialize};

/// Fixed key the history lives under (also the default file stem)
pub const STORAGE_KEY: &str = "workoutHistory";

/// Current document layout
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    #[serde(rename = "workoutHistory")]
    workout_history: &'a HistoryMap,
}

#[derive(Deserialize)]
struct Document {
    version: u32,
    #[serde(rename = "workoutHistory")]
    workout_history: HistoryMap,
}

/// Serialize the full mapping
///
/// JSON has no NaN or infinity, so a non-finite weight is refused here
/// instead of being written as `null` and failing the next decode.
pub fn encode(history: &HistoryMap) -> Result<Vec<u8>> {
    for (exercise, sets) in history {
        if let Some(bad) = sets.iter().find(|s| !s.weight().is_finite()) {
            return Err(Error::Persistence(format!(
                "set {} of '{}' has non-finite weight {}",
                bad.id(),
                exercise,
                bad.weight()
            )));
        }
    }

    let doc = DocumentRef {
        version: FORMAT_VERSION,
        workout_history: history,
    };
    Ok(serde_json::to_vec(&doc)?)
}

/// Parse a stored document back into a mapping
///
/// Malformed JSON and unknown versions both surface as `Error::Decode`.
pub fn decode(bytes: &[u8]) -> Result<HistoryMap> {
    let doc: Document =
        serde_json::from_slice(bytes).map_err(|e| Error::Decode(e.to_string()))?;

    if doc.version != FORMAT_VERSION {
        return Err(Error::Decode(format!(
            "unsupported history format version {} (expected {})",
            doc.version, FORMAT_VERSION
        )));
    }

    Ok(doc.workout_history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Intensity, SetEntry, SetType, WorkoutSet};
    use chrono::{Duration, TimeZone, Utc};

    fn sample_history() -> HistoryMap {
        let base = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
            + Duration::nanoseconds(123_456_789);

        let mut history = HistoryMap::new();
        history.insert(
            "Bench Press".into(),
            vec![
                WorkoutSet::new(SetEntry::new(8, 50.0), base),
                WorkoutSet::new(
                    SetEntry::new(10, 42.5)
                        .notes("ultima serie lenta")
                        .set_type(SetType::Series)
                        .intensity(Intensity::Intense),
                    base - Duration::days(2),
                ),
            ],
        );
        history.insert(
            "Squat".into(),
            vec![WorkoutSet::new(
                SetEntry::new(12, 20.0).set_type(SetType::Heating),
                base - Duration::hours(1),
            )],
        );
        history.insert("Plank".into(), vec![]);
        history
    }

    #[test]
    fn test_roundtrip_preserves_everything() {
        let history = sample_history();
        let bytes = encode(&history).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, history);
    }

    #[test]
    fn test_document_layout() {
        let history = sample_history();
        let value: serde_json::Value = serde_json::from_slice(&encode(&history).unwrap()).unwrap();

        assert_eq!(value["version"], 1);
        let bench = &value[STORAGE_KEY]["Bench Press"][0];
        assert_eq!(bench["date"], "2026-10-17T09:30:00.123456789Z");
        assert_eq!(bench["reps"], 8);
        assert_eq!(bench["weight"], 50.0);
        assert!(bench.get("notes").is_none());
        assert!(bench.get("type").is_none());
        assert!(value[STORAGE_KEY]["Plank"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_decode_accepts_missing_optionals() {
        let json = r#"{"version":1,"workoutHistory":{"Curl":[
            {"id":"6f1c2f2e-4d1b-4c8e-9a57-0c1e5d4b8a11","date":"2026-10-01T18:00:00Z","reps":12,"weight":14.0}
        ]}}"#;

        let history = decode(json.as_bytes()).unwrap();
        let set = &history["Curl"][0];
        assert_eq!(set.reps(), 12);
        assert_eq!(set.notes(), None);
        assert_eq!(set.set_type(), None);
        assert_eq!(set.intensity(), None);
    }

    #[test]
    fn test_encode_rejects_non_finite_weight() {
        let mut history = sample_history();
        history
            .get_mut("Squat")
            .unwrap()
            .push(WorkoutSet::new(SetEntry::new(5, f64::INFINITY), Utc::now()));

        let err = encode(&history).unwrap_err();
        assert!(matches!(err, Error::Persistence(msg) if msg.contains("Squat")));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(b"{ invalid json }").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let err = decode(br#"{"version":99,"workoutHistory":{}}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(msg) if msg.contains("99")));
    }
}
