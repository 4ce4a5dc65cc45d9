//! Training plan reference data.
//!
//! Plans are produced by an external loader (bundled file or remote
//! endpoint) and are only read here. `Exercise::name` is the key under which
//! sets are recorded in the history store.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A named movement with its descriptive metadata
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image_name: String,
    pub muscle_group: String,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// One training day: an ordered list of exercises
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDay {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<Exercise>,
}

/// A complete training program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub name: String,
    pub days: Vec<WorkoutDay>,
}

impl WorkoutPlan {
    /// Exercise names in plan order, each listed once
    pub fn exercise_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.days
            .iter()
            .flat_map(|day| day.exercises.iter())
            .map(|exercise| exercise.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// First exercise in the plan with exactly this name
    pub fn find_exercise(&self, name: &str) -> Option<&Exercise> {
        self.days
            .iter()
            .flat_map(|day| day.exercises.iter())
            .find(|exercise| exercise.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_JSON: &str = r#"{
        "name": "Scheda Forza",
        "days": [
            {
                "name": "Giorno A",
                "exercises": [
                    {
                        "name": "Bench Press",
                        "description": "Distensioni su panca piana",
                        "imageName": "bench",
                        "muscleGroup": "Petto",
                        "instructions": ["Scendi controllato", "Spingi"]
                    },
                    {
                        "name": "Squat",
                        "description": "Accosciata con bilanciere",
                        "muscleGroup": "Gambe"
                    }
                ]
            },
            {
                "name": "Giorno B",
                "exercises": [
                    {
                        "name": "Bench Press",
                        "description": "Distensioni su panca piana",
                        "muscleGroup": "Petto"
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_plan_parses_camel_case_fields() {
        let plan: WorkoutPlan = serde_json::from_str(PLAN_JSON).unwrap();
        assert_eq!(plan.days.len(), 2);

        let bench = &plan.days[0].exercises[0];
        assert_eq!(bench.image_name, "bench");
        assert_eq!(bench.muscle_group, "Petto");
        assert_eq!(bench.instructions.len(), 2);

        // Missing ids are generated, so exercises stay distinguishable
        assert_ne!(plan.days[0].exercises[0].id, plan.days[1].exercises[0].id);
    }

    #[test]
    fn test_exercise_names_deduplicated_in_order() {
        let plan: WorkoutPlan = serde_json::from_str(PLAN_JSON).unwrap();
        assert_eq!(plan.exercise_names(), vec!["Bench Press", "Squat"]);
    }

    #[test]
    fn test_find_exercise_is_case_sensitive() {
        let plan: WorkoutPlan = serde_json::from_str(PLAN_JSON).unwrap();
        assert_eq!(plan.find_exercise("Squat").unwrap().muscle_group, "Gambe");
        assert!(plan.find_exercise("squat").is_none());
    }
}
