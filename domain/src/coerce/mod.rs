//! Shape-driven coercion of validated trees
//!
//! [`coerce_tree`] maps a parsed tree onto a [`Shape`], filling every
//! absent or malformed field with its safe default. Coercion never
//! fails and is idempotent: the output always conforms to the shape,
//! and coercing it again yields an identical value.

use crate::shape::{FieldKind, FieldSpec, Shape};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

/// Coerce a tree against a shape, producing a complete, default-filled
/// object.
pub fn coerce_tree(tree: &Value, shape: &Shape) -> Value {
    let mut out = Map::new();
    for (name, spec) in shape.fields() {
        let found = tree.get(name);
        out.insert(name.to_string(), coerce_field(found, spec));
    }
    Value::Object(out)
}

/// Coerce a tree against a shape and deserialize into the target type.
///
/// Because the coerced value conforms to the shape, this only fails if
/// the shape and the target type disagree — a programming error, not a
/// model error.
pub fn coerce_typed<T: DeserializeOwned>(
    tree: &Value,
    shape: &Shape,
) -> Result<T, serde_json::Error> {
    serde_json::from_value(coerce_tree(tree, shape))
}

fn coerce_field(value: Option<&Value>, spec: &FieldSpec) -> Value {
    let Some(value) = value else {
        return spec.default.clone();
    };

    match &spec.kind {
        FieldKind::Text => coerce_text(value).unwrap_or_else(|| spec.default.clone()),
        FieldKind::Number => coerce_number(value)
            .map(Value::Number)
            .unwrap_or_else(|| spec.default.clone()),
        FieldKind::Flag => coerce_flag(value)
            .map(Value::Bool)
            .unwrap_or_else(|| spec.default.clone()),
        FieldKind::List(item) => match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|v| coerce_field(Some(v), item))
                    .collect(),
            ),
            _ => spec.default.clone(),
        },
        FieldKind::Object(shape) => match value {
            Value::Object(_) => coerce_tree(value, shape),
            _ => spec.default.clone(),
        },
    }
}

fn coerce_text(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Number(n) => Some(Value::String(n.to_string())),
        _ => None,
    }
}

/// Parse a number from numeric or string form, preserving integer
/// representation so coercion is idempotent under value equality.
fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => {
            if n.as_f64().is_some_and(f64::is_finite) {
                Some(n.clone())
            } else {
                None
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Some(Number::from(i));
            }
            let f = s.parse::<f64>().ok().filter(|f| f.is_finite())?;
            if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
                Some(Number::from(f as i64))
            } else {
                Number::from_f64(f)
            }
        }
        Value::Bool(b) => Some(Number::from(*b as i64)),
        _ => None,
    }
}

/// Booleans arrive as booleans, 0/1, or string forms including the
/// sentinel variants `'true'` / `'$true'` / `'false'` / `'$false'`.
fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim().trim_matches('\'').trim_start_matches('$');
            match s.to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{FieldSpec, Shape};
    use serde_json::json;

    fn nutrition_shape() -> Shape {
        Shape::new()
            .field("calories", FieldSpec::number())
            .field("protein", FieldSpec::number())
            .field("carbs", FieldSpec::number())
    }

    fn meal_shape() -> Shape {
        Shape::new()
            .field("foodName", FieldSpec::text())
            .field("isVeg", FieldSpec::flag())
            .field("nutritionInfo", FieldSpec::object(nutrition_shape()))
            .field(
                "items",
                FieldSpec::list(FieldSpec::object(
                    Shape::new()
                        .field("name", FieldSpec::text())
                        .field("grams", FieldSpec::number()),
                )),
            )
    }

    #[test]
    fn test_numeric_strings_become_numbers() {
        let tree = json!({"nutritionInfo": {"calories": "450", "protein": 15}});
        let out = coerce_tree(&tree, &meal_shape());
        assert_eq!(out["nutritionInfo"]["calories"], json!(450));
        assert_eq!(out["nutritionInfo"]["protein"], json!(15));
        assert_eq!(out["nutritionInfo"]["carbs"], json!(0));
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let out = coerce_tree(&json!({}), &meal_shape());
        assert_eq!(
            out,
            json!({
                "foodName": "",
                "isVeg": false,
                "nutritionInfo": {"calories": 0, "protein": 0, "carbs": 0},
                "items": []
            })
        );
    }

    #[test]
    fn test_sentinel_booleans() {
        let shape = Shape::new().field("isVeg", FieldSpec::flag());
        for (raw, expected) in [
            (json!(true), true),
            (json!(1), true),
            (json!(0), false),
            (json!("true"), true),
            (json!("$true"), true),
            (json!("'false'"), false),
            (json!("$false"), false),
            (json!("False"), false),
        ] {
            let out = coerce_tree(&json!({ "isVeg": raw }), &shape);
            assert_eq!(out["isVeg"], json!(expected), "raw {raw:?}");
        }
        // Unrecognized strings fall back to the default
        let out = coerce_tree(&json!({"isVeg": "maybe"}), &shape);
        assert_eq!(out["isVeg"], json!(false));
    }

    #[test]
    fn test_list_items_are_recursively_coerced() {
        let tree = json!({"items": [{"name": "chapati", "grams": "60"}, {"grams": null}]});
        let out = coerce_tree(&tree, &meal_shape());
        assert_eq!(
            out["items"],
            json!([
                {"name": "chapati", "grams": 60},
                {"name": "", "grams": 0}
            ])
        );
    }

    #[test]
    fn test_coercion_is_idempotent() {
        let tree = json!({
            "foodName": 12,
            "isVeg": "$true",
            "nutritionInfo": {"calories": "450.5", "protein": "n/a"},
            "items": [{"name": "dal", "grams": 180}]
        });
        let shape = meal_shape();
        let once = coerce_tree(&tree, &shape);
        let twice = coerce_tree(&once, &shape);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_wrong_shaped_values_use_defaults() {
        let tree = json!({"nutritionInfo": [1, 2], "items": "not a list"});
        let out = coerce_tree(&tree, &meal_shape());
        assert_eq!(out["nutritionInfo"], json!({"calories": 0, "protein": 0, "carbs": 0}));
        assert_eq!(out["items"], json!([]));
    }

    #[test]
    fn test_coerce_typed_roundtrip() {
        #[derive(serde::Deserialize)]
        struct Mini {
            calories: f64,
        }
        let shape = Shape::new().field("calories", FieldSpec::number());
        let mini: Mini = coerce_typed(&json!({"calories": "450"}), &shape).unwrap();
        assert_eq!(mini.calories, 450.0);
    }
}
