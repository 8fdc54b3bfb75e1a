//! Structural validation of parsed model output
//!
//! Walks a parsed tree depth-first and collects [`Finding`]s. Fatal
//! findings mean the text cannot be locally repaired into a correct
//! result — the orchestrator responds by asking the model again, not by
//! patching the tree. Warnings are informational only.
//!
//! Fatal: placeholder sentinel leaves (the literal strings `undefined`
//! and `NaN`) and non-finite numbers. Warning: `null` leaves and
//! property names that are not plain identifiers.

use serde_json::Value;

/// Severity of a structural finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The tree is unusable; a fresh model invocation is required.
    Fatal,
    /// Suspicious but workable; logged and ignored.
    Warning,
}

/// A single issue found while walking the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// Dotted path to the offending node (e.g. `$.items[2].name`)
    pub path: String,
    pub message: String,
}

impl Finding {
    fn fatal(path: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            path: path.to_string(),
            message: message.into(),
        }
    }

    fn warning(path: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

/// Validate a parsed tree, returning all findings.
///
/// An empty result, or one containing only warnings, means the tree is
/// safe to hand to the coercer.
pub fn validate_tree(tree: &Value) -> Vec<Finding> {
    let mut findings = Vec::new();
    walk(tree, "$", &mut findings);
    findings
}

/// Summarize the fatal findings, if any.
pub fn fatal_summary(findings: &[Finding]) -> Option<String> {
    let fatals: Vec<String> = findings
        .iter()
        .filter(|f| f.is_fatal())
        .map(|f| format!("{}: {}", f.path, f.message))
        .collect();

    if fatals.is_empty() {
        None
    } else {
        Some(fatals.join("; "))
    }
}

fn walk(value: &Value, path: &str, findings: &mut Vec<Finding>) {
    match value {
        Value::Null => {
            findings.push(Finding::warning(path, "null leaf"));
        }
        Value::Number(n) => {
            let finite = n.as_f64().is_some_and(f64::is_finite);
            if !finite {
                findings.push(Finding::fatal(path, "non-finite number"));
            }
        }
        Value::String(s) => {
            if s == "undefined" || s == "NaN" {
                findings.push(Finding::fatal(path, format!("placeholder leaf '{s}'")));
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(item, &format!("{path}[{i}]"), findings);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                if !is_identifier(key) {
                    findings.push(Finding::warning(
                        &format!("{path}.{key}"),
                        "property name is not a plain identifier",
                    ));
                }
                walk(item, &format!("{path}.{key}"), findings);
            }
        }
        Value::Bool(_) => {}
    }
}

/// `^[a-zA-Z_][a-zA-Z0-9_]*$`
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fatals(tree: &Value) -> usize {
        validate_tree(tree).iter().filter(|f| f.is_fatal()).count()
    }

    #[test]
    fn test_clean_tree_has_no_findings() {
        let tree = json!({"foodName": "Dal", "calories": 450, "isVeg": true});
        assert!(validate_tree(&tree).is_empty());
    }

    #[test]
    fn test_undefined_leaf_is_fatal() {
        let tree = json!({"calories": "undefined"});
        assert_eq!(fatals(&tree), 1);

        let nested = json!({"items": [{"nutrition": {"protein": "undefined"}}]});
        let findings = validate_tree(&nested);
        assert!(findings[0].is_fatal());
        assert_eq!(findings[0].path, "$.items[0].nutrition.protein");
    }

    #[test]
    fn test_nan_sentinel_is_fatal() {
        assert_eq!(fatals(&json!({"fat": "NaN"})), 1);
    }

    #[test]
    fn test_null_leaves_warn_only() {
        let tree = json!({"description": null, "items": [null]});
        let findings = validate_tree(&tree);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| !f.is_fatal()));
        assert!(fatal_summary(&findings).is_none());
    }

    #[test]
    fn test_non_identifier_key_warns_only() {
        let tree = json!({"total-calories": 100, "2nd": 1});
        let findings = validate_tree(&tree);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn test_fatal_summary_joins_paths() {
        let tree = json!({"a": "undefined", "b": "NaN"});
        let summary = fatal_summary(&validate_tree(&tree)).unwrap();
        assert!(summary.contains("$.a"));
        assert!(summary.contains("$.b"));
    }

    #[test]
    fn test_identifier_rule() {
        assert!(is_identifier("foodName"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("food-name"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier(""));
    }
}
