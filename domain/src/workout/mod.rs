//! Workout plan feature domain
//!
//! Typed result of workout generation, its shape descriptor, and the
//! fallback plan. Workout generation is a single-sample flow — no
//! consensus merge plan here.

use crate::shape::{FieldSpec, Shape};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One exercise within a workout day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub sets: f64,
    pub reps: String,
    pub rest_seconds: f64,
    pub instructions: String,
}

/// One training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorkoutDay {
    pub day: String,
    pub focus: String,
    pub exercises: Vec<Exercise>,
}

/// A complete generated workout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub plan_name: String,
    pub description: String,
    pub days_per_week: f64,
    pub days: Vec<WorkoutDay>,
}

impl WorkoutPlan {
    /// Shape descriptor consumed by the validator/coercer.
    pub fn shape() -> Shape {
        let exercise = Shape::new()
            .field("name", FieldSpec::text())
            .field("sets", FieldSpec::number().with_default(json!(3)))
            .field("reps", FieldSpec::text().with_default(json!("8-12")))
            .field("restSeconds", FieldSpec::number().with_default(json!(60)))
            .field("instructions", FieldSpec::text());

        let day = Shape::new()
            .field("day", FieldSpec::text())
            .field("focus", FieldSpec::text())
            .field("exercises", FieldSpec::list(FieldSpec::object(exercise)));

        Shape::new()
            .field("planName", FieldSpec::text())
            .field("description", FieldSpec::text())
            .field("daysPerWeek", FieldSpec::number().with_default(json!(3)))
            .field("days", FieldSpec::list(FieldSpec::object(day)))
    }

    /// Fallback returned when generation fails entirely.
    pub fn fallback() -> Self {
        Self {
            plan_name: "Basic Full-Body Plan".to_string(),
            description: "A simple three-day full-body routine".to_string(),
            days_per_week: 3.0,
            days: vec![WorkoutDay {
                day: "Day 1".to_string(),
                focus: "Full body".to_string(),
                exercises: vec![Exercise {
                    name: "Bodyweight squat".to_string(),
                    sets: 3.0,
                    reps: "10-15".to_string(),
                    rest_seconds: 60.0,
                    instructions: "Keep your heels down and chest up".to_string(),
                }],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::coerce_typed;
    use serde_json::json;

    #[test]
    fn test_shape_defaults_deserialize() {
        let defaults = WorkoutPlan::shape().default_value();
        let plan: WorkoutPlan = serde_json::from_value(defaults).unwrap();
        assert_eq!(plan.days_per_week, 3.0);
        assert!(plan.days.is_empty());
    }

    #[test]
    fn test_malformed_exercise_fields_get_defaults() {
        let tree = json!({
            "planName": "Push Pull Legs",
            "days": [{"day": "Monday", "focus": "Push", "exercises": [
                {"name": "Bench press", "sets": "4", "restSeconds": null}
            ]}]
        });
        let plan: WorkoutPlan = coerce_typed(&tree, &WorkoutPlan::shape()).unwrap();
        let exercise = &plan.days[0].exercises[0];
        assert_eq!(exercise.sets, 4.0);
        assert_eq!(exercise.rest_seconds, 60.0);
        assert_eq!(exercise.reps, "8-12");
    }
}
