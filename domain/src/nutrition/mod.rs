//! Meal analysis feature domain
//!
//! The typed result of analyzing a meal (from a text description or a
//! photo), its shape descriptor, its consensus merge plan, and the
//! hardcoded fallback callers use when generation fails outright.
//! Text and image flows share everything here; only the prompt payload
//! differs.

use crate::consensus::MergePlan;
use crate::shape::{FieldSpec, Shape};
use serde::{Deserialize, Serialize};

/// Aggregate nutrition totals for a whole meal or a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
}

/// One itemized component of a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FoodItem {
    pub name: String,
    pub quantity: String,
    pub nutrition: NutritionInfo,
}

/// The per-item breakdown of a meal, when the model provided one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemBreakdown {
    pub total_items: f64,
    pub items: Vec<FoodItem>,
}

/// Full analysis of one meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MealAnalysis {
    pub food_name: String,
    pub description: String,
    pub quantity: String,
    pub is_vegetarian: bool,
    pub nutrition_info: NutritionInfo,
    pub item_breakdown: ItemBreakdown,
}

impl MealAnalysis {
    /// Shape descriptor consumed by the validator/coercer.
    pub fn shape() -> Shape {
        let nutrition = || {
            Shape::new()
                .field("calories", FieldSpec::number())
                .field("protein", FieldSpec::number())
                .field("carbs", FieldSpec::number())
                .field("fat", FieldSpec::number())
                .field("fiber", FieldSpec::number())
                .field("sugar", FieldSpec::number())
        };

        let item = Shape::new()
            .field("name", FieldSpec::text())
            .field("quantity", FieldSpec::text())
            .field("nutrition", FieldSpec::object(nutrition()));

        Shape::new()
            .field("foodName", FieldSpec::text())
            .field("description", FieldSpec::text())
            .field("quantity", FieldSpec::text())
            .field("isVegetarian", FieldSpec::flag())
            .field("nutritionInfo", FieldSpec::object(nutrition()))
            .field(
                "itemBreakdown",
                FieldSpec::object(
                    Shape::new()
                        .field("totalItems", FieldSpec::number())
                        .field("items", FieldSpec::list(FieldSpec::object(item))),
                ),
            )
    }

    /// Where the breakdown and totals live, for consensus merging.
    pub fn merge_plan() -> MergePlan {
        MergePlan::new("/itemBreakdown/items", "/nutrition", "/nutritionInfo")
    }

    /// Fallback returned to the UI when generation fails entirely.
    pub fn fallback(described_as: &str) -> Self {
        Self {
            food_name: described_as.to_string(),
            description: "Nutrition estimate unavailable".to_string(),
            quantity: "1 serving".to_string(),
            is_vegetarian: false,
            nutrition_info: NutritionInfo::default(),
            item_breakdown: ItemBreakdown::default(),
        }
    }
}
