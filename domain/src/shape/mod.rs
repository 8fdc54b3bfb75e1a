//! Declarative shape descriptors
//!
//! A [`Shape`] describes the target type of a structured generation:
//! each field's kind, its safe default, and any nested structure. The
//! coercer consumes shapes uniformly, so feature modules contribute only
//! a prompt and a shape — never their own parsing logic.

use serde_json::{Map, Value, json};

/// The kind of one field in a shape.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A string field
    Text,
    /// A finite numeric field
    Number,
    /// A boolean field
    Flag,
    /// An array field; each element is coerced against the item spec
    List(Box<FieldSpec>),
    /// A nested object coerced against its own shape
    Object(Shape),
}

/// One field of a shape: its kind and the default used when the model
/// omitted or mangled the value.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub default: Value,
}

impl FieldSpec {
    pub fn text() -> Self {
        Self {
            kind: FieldKind::Text,
            default: json!(""),
        }
    }

    pub fn number() -> Self {
        Self {
            kind: FieldKind::Number,
            default: json!(0),
        }
    }

    pub fn flag() -> Self {
        Self {
            kind: FieldKind::Flag,
            default: json!(false),
        }
    }

    pub fn list(item: FieldSpec) -> Self {
        Self {
            kind: FieldKind::List(Box::new(item)),
            default: json!([]),
        }
    }

    pub fn object(shape: Shape) -> Self {
        let default = shape.default_value();
        Self {
            kind: FieldKind::Object(shape),
            default,
        }
    }

    /// Override the default used for absent or malformed values.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }
}

/// An ordered set of named fields describing a target object.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: Vec<(String, FieldSpec)>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style).
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// The object obtained when every field takes its default.
    pub fn default_value(&self) -> Value {
        let mut map = Map::new();
        for (name, spec) in &self.fields {
            map.insert(name.clone(), spec.default.clone());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_value_covers_every_field() {
        let shape = Shape::new()
            .field("name", FieldSpec::text())
            .field("calories", FieldSpec::number())
            .field("isVeg", FieldSpec::flag())
            .field("items", FieldSpec::list(FieldSpec::text()))
            .field(
                "nutrition",
                FieldSpec::object(Shape::new().field("protein", FieldSpec::number())),
            );

        assert_eq!(
            shape.default_value(),
            json!({
                "name": "",
                "calories": 0,
                "isVeg": false,
                "items": [],
                "nutrition": {"protein": 0}
            })
        );
    }

    #[test]
    fn test_custom_default() {
        let spec = FieldSpec::number().with_default(json!(1));
        assert_eq!(spec.default, json!(1));
    }
}
