//! Evaluation of the rule objects attached to schema nodes
//!
//! Rules run against the already resolved (defaulted) value of their node,
//! so sibling state is visible without closures over the document.

use serde_json::Value;

use super::types::{ConfigPath, ValidationError};
use crate::domain::schema::{ConfigNode, Rule};

/// Run every rule of `node` against its resolved value
pub fn check_rules(node: &ConfigNode, value: &Value, path: &ConfigPath, errors: &mut Vec<ValidationError>) {
    for rule in &node.rules {
        match rule {
            Rule::MutuallyExclusive => check_exclusive(node, value, path, errors),
            Rule::RequiredWhenEnabled { toggle, dependent } => {
                check_required_when_enabled(value, path, toggle, dependent, errors)
            }
            Rule::Minimum(minimum) => check_minimum(value, path, *minimum, errors),
        }
    }
}

/// Whether a resolved toggle section is switched on
pub fn is_enabled(value: Option<&Value>) -> bool {
    value
        .and_then(|v| v.get("enabled"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn check_exclusive(node: &ConfigNode, value: &Value, path: &ConfigPath, errors: &mut Vec<ValidationError>) {
    let members = node.toggle_members();
    let enabled = members
        .iter()
        .filter(|member| is_enabled(value.get(**member)))
        .count();

    if enabled > 1 {
        errors.push(ValidationError::only_one_of(path.clone(), &members));
    }
}

fn check_required_when_enabled(
    value: &Value,
    path: &ConfigPath,
    toggle: &str,
    dependent: &str,
    errors: &mut Vec<ValidationError>,
) {
    if !is_enabled(value.get(toggle)) {
        return;
    }

    let dependent_path = path.child(dependent);
    match value.get(dependent) {
        Some(Value::Object(entries)) => {
            for (key, entry) in entries {
                if is_blank(entry) {
                    errors.push(ValidationError::dependent_required(dependent_path.child(key), toggle));
                }
            }
        }
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                if is_blank(entry) {
                    errors.push(ValidationError::dependent_required(
                        dependent_path.child(index.to_string()),
                        toggle,
                    ));
                }
            }
        }
        _ => {}
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn check_minimum(value: &Value, path: &ConfigPath, minimum: i64, errors: &mut Vec<ValidationError>) {
    // u64 values beyond i64 are above any minimum
    if let Some(number) = value.as_i64() {
        if number < minimum {
            errors.push(ValidationError::below_minimum(path.clone(), minimum));
        }
    }
}
