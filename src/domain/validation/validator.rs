use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::rules::check_rules;
use super::types::{ConfigPath, ValidationError, ValidationErrors};
use crate::domain::resolved::ResolvedConfig;
use crate::domain::schema::{bundle_schema, ConfigNode, DefaultValue, NodeKind, Rule, Toggle};

/// Applies a static schema to configuration documents
///
/// The schema is only borrowed, so one schema can back any number of
/// validators, including ones running on other threads.
#[derive(Debug, Clone, Copy)]
pub struct ConfigValidator<'s> {
    schema: &'s ConfigNode,
}

impl ConfigValidator<'static> {
    /// Validator for the bundle schema
    pub fn new() -> Self {
        Self { schema: bundle_schema() }
    }
}

impl Default for ConfigValidator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> ConfigValidator<'s> {
    /// Validator for an arbitrary schema tree
    pub fn with_schema(schema: &'s ConfigNode) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s ConfigNode {
        self.schema
    }

    /// Resolve a document into a fully defaulted tree
    ///
    /// Every violation in the document is collected; on failure no tree is
    /// returned.
    pub fn resolve(&self, document: &Value) -> Result<Value, ValidationErrors> {
        debug!(schema = %self.schema.name, "resolving configuration document");

        let mut walk = Walk::default();
        let tree = walk.node(self.schema, Some(document), &ConfigPath::root(), true, false);

        match ValidationErrors::from_vec(walk.errors) {
            Some(errors) => {
                warn!(schema = %self.schema.name, errors = errors.len(), "configuration rejected");
                for error in &errors {
                    debug!(path = %error.path, kind = ?error.kind, "{}", error.message);
                }
                Err(errors)
            }
            None => Ok(tree),
        }
    }

    /// Resolve a document and build the typed view of the bundle settings
    pub fn validate(&self, document: &Value) -> Result<ResolvedConfig, ValidationErrors> {
        let tree = self.resolve(document)?;

        let resolved = ResolvedConfig::from_tree(tree).map_err(|e| {
            ValidationErrors::single(ValidationError::wrong_type(
                ConfigPath::root(),
                format!("bundle configuration ({e})"),
            ))
        })?;

        if resolved.message().outbox.enabled && resolved.message().outbox.repository.selected().is_none() {
            warn!("message.outbox is enabled without a repository");
        }
        if resolved.snapshot().enabled && resolved.snapshot().repository().is_none() {
            warn!("snapshot is enabled without a repository");
        }

        info!(
            aggregates = resolved.aggregates().len(),
            outbox = resolved.message().outbox.enabled,
            snapshot = resolved.snapshot().enabled,
            upcast = resolved.upcast().enabled,
            "configuration resolved"
        );
        Ok(resolved)
    }
}

/// State of one validation run
#[derive(Default)]
struct Walk {
    errors: Vec<ValidationError>,
}

impl Walk {
    /// Resolve `node` from its document value
    ///
    /// `active` is false inside disabled toggle sections, where required
    /// keys are not enforced. `yielded` marks a default alternative whose
    /// sibling was explicitly chosen.
    fn node(&mut self, node: &ConfigNode, input: Option<&Value>, path: &ConfigPath, active: bool, yielded: bool) -> Value {
        if let Some(toggle) = node.toggle {
            return self.toggle(node, toggle, input, path, active, yielded);
        }

        let value = match input.filter(|v| !v.is_null()) {
            None => self.absent(node, path, active),
            Some(value) => self.present(node, value, path, active),
        };
        check_rules(node, &value, path, &mut self.errors);
        if path.segments().len() == 1 {
            debug!(section = %path, given = input.is_some(), "section resolved");
        }
        value
    }

    fn absent(&mut self, node: &ConfigNode, path: &ConfigPath, active: bool) -> Value {
        if node.required && node.default == DefaultValue::Absent {
            if active {
                self.errors.push(ValidationError::missing(path.clone()));
            }
            return Value::Null;
        }

        match (&node.kind, &node.default) {
            (NodeKind::Map, _) if !node.is_keyed() => self.fixed_map(node, &Map::new(), path, active),
            (NodeKind::Map, DefaultValue::Absent) => Value::Object(Map::new()),
            (NodeKind::Array, DefaultValue::Absent) => Value::Array(Vec::new()),
            (_, default) => default.resolve(),
        }
    }

    fn present(&mut self, node: &ConfigNode, value: &Value, path: &ConfigPath, active: bool) -> Value {
        match (&node.kind, value) {
            (NodeKind::Scalar, Value::String(s)) => {
                if node.cannot_be_empty && s.is_empty() {
                    self.errors.push(ValidationError::empty(path.clone()));
                }
                value.clone()
            }
            (NodeKind::Variable, Value::String(_) | Value::Number(_) | Value::Bool(_)) => value.clone(),
            (NodeKind::Boolean, Value::Bool(_)) => value.clone(),
            // integers are read back as i64
            (NodeKind::Integer, Value::Number(n)) if n.is_i64() => value.clone(),
            (NodeKind::Enum(allowed), Value::String(s)) => {
                if !allowed.contains(s) {
                    self.errors.push(ValidationError::not_in_set(path.clone(), allowed));
                }
                value.clone()
            }
            (NodeKind::Array, Value::Array(items)) => {
                let Some(prototype) = node.prototype.as_deref() else {
                    return Value::Array(Vec::new());
                };
                let items = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.node(prototype, Some(item), &path.child(i.to_string()), active, false))
                    .collect();
                Value::Array(items)
            }
            (NodeKind::Map, Value::Object(entries)) => match node.prototype.as_deref() {
                Some(prototype) => {
                    let entries = entries
                        .iter()
                        .map(|(key, item)| {
                            let resolved = self.node(prototype, Some(item), &path.child(key.as_str()), active, false);
                            (key.clone(), resolved)
                        })
                        .collect();
                    Value::Object(entries)
                }
                None => self.fixed_map(node, entries, path, active),
            },
            (kind, _) => {
                self.errors.push(ValidationError::wrong_type(path.clone(), kind));
                Value::Null
            }
        }
    }

    fn fixed_map(&mut self, node: &ConfigNode, entries: &Map<String, Value>, path: &ConfigPath, active: bool) -> Value {
        let mut resolved = Map::new();
        self.fixed_children(node, entries, path, active, &mut resolved);
        Value::Object(resolved)
    }

    fn fixed_children(
        &mut self,
        node: &ConfigNode,
        entries: &Map<String, Value>,
        path: &ConfigPath,
        active: bool,
        resolved: &mut Map<String, Value>,
    ) {
        for key in entries.keys() {
            let implicit = node.is_toggle() && key == "enabled";
            if !implicit && node.child(key).is_none() {
                self.errors.push(ValidationError::unrecognized(path, key));
            }
        }

        // an explicitly chosen alternative overrides enabled-by-default siblings
        let chosen = node.rules.contains(&Rule::MutuallyExclusive)
            && node
                .children
                .iter()
                .filter(|child| child.is_toggle())
                .any(|child| entries.get(&child.name).and_then(toggle_state) == Some(true));

        for child in &node.children {
            let input = entries.get(&child.name);
            let yielded = chosen && input.is_none();
            let value = self.node(child, input, &path.child(child.name.as_str()), active, yielded);
            resolved.insert(child.name.clone(), value);
        }
    }

    fn toggle(
        &mut self,
        node: &ConfigNode,
        toggle: Toggle,
        input: Option<&Value>,
        path: &ConfigPath,
        active: bool,
        yielded: bool,
    ) -> Value {
        let empty = Map::new();
        let (enabled, body) = match input {
            None => (!yielded && toggle.enabled_by_default(), &empty),
            Some(Value::Null) | Some(Value::Bool(true)) => (true, &empty),
            Some(Value::Bool(false)) => (false, &empty),
            Some(Value::Object(entries)) => {
                let enabled = match entries.get("enabled") {
                    None => true,
                    Some(Value::Bool(flag)) => *flag,
                    Some(_) => {
                        self.errors
                            .push(ValidationError::wrong_type(path.child("enabled"), NodeKind::Boolean));
                        false
                    }
                };
                (enabled, entries)
            }
            Some(_) => {
                self.errors.push(ValidationError::wrong_type(path.clone(), "map or boolean"));
                return Value::Null;
            }
        };

        let mut resolved = Map::new();
        resolved.insert("enabled".to_string(), Value::Bool(enabled));
        self.fixed_children(node, body, path, active && enabled, &mut resolved);

        let value = Value::Object(resolved);
        check_rules(node, &value, path, &mut self.errors);
        if path.segments().len() == 1 {
            debug!(section = %path, enabled, "toggle section resolved");
        }
        value
    }
}

/// Enabled state a toggle shorthand expresses, `None` when malformed
fn toggle_state(value: &Value) -> Option<bool> {
    match value {
        Value::Null => Some(true),
        Value::Bool(flag) => Some(*flag),
        Value::Object(entries) => match entries.get("enabled") {
            None => Some(true),
            Some(enabled) => enabled.as_bool(),
        },
        _ => None,
    }
}
