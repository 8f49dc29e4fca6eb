use std::sync::OnceLock;

use super::sections::{
    aggregates_section, message_section, service_identifiers, snapshot_section, time_section,
    upcast_section,
};
use super::types::{ConfigNode, DefaultValue, NodeKind, Rule};

/// Name of the schema root node
pub const ROOT_NAME: &str = "event_sourcing";

static BUNDLE_SCHEMA: OnceLock<ConfigNode> = OnceLock::new();

/// Process-wide bundle schema, built on first use and shared read-only
pub fn bundle_schema() -> &'static ConfigNode {
    BUNDLE_SCHEMA.get_or_init(build_bundle_schema)
}

/// Build a fresh copy of the bundle schema
pub fn build_bundle_schema() -> ConfigNode {
    let mut children = vec![
        time_section(),
        message_section(),
        snapshot_section(),
        upcast_section(),
        aggregates_section(),
    ];
    children.extend(service_identifiers());

    ConfigNode::section(ROOT_NAME, children)
}

/// Structural problems of a schema tree, empty when well-formed
pub fn schema_defects(node: &ConfigNode) -> Vec<String> {
    let mut defects = Vec::new();
    collect_defects(node, node.name.clone(), &mut defects);
    defects
}

fn collect_defects(node: &ConfigNode, path: String, defects: &mut Vec<String>) {
    if node.required && node.default != DefaultValue::Absent {
        defects.push(format!("{path}: required node carries a default"));
    }
    match node.kind {
        NodeKind::Array if node.prototype.is_none() => {
            defects.push(format!("{path}: array without prototype"));
        }
        NodeKind::Map if node.prototype.is_some() && !node.children.is_empty() => {
            defects.push(format!("{path}: keyed map with fixed children"));
        }
        _ => {}
    }
    if node.toggle.is_some() && node.child("enabled").is_some() {
        defects.push(format!("{path}: toggle section declares its own enabled key"));
    }
    for rule in &node.rules {
        match rule {
            Rule::MutuallyExclusive if node.toggle_members().len() < 2 => {
                defects.push(format!("{path}: exclusive group with fewer than two toggles"));
            }
            Rule::RequiredWhenEnabled { toggle, dependent } => {
                if !node.child(toggle).is_some_and(ConfigNode::is_toggle) {
                    defects.push(format!("{path}: unknown toggle {toggle}"));
                }
                if node.child(dependent).is_none() {
                    defects.push(format!("{path}: unknown dependent {dependent}"));
                }
            }
            Rule::Minimum(_) if node.kind != NodeKind::Integer => {
                defects.push(format!("{path}: minimum on a non-integer node"));
            }
            _ => {}
        }
    }
    for child in &node.children {
        collect_defects(child, format!("{path}.{}", child.name), defects);
    }
    if let Some(prototype) = &node.prototype {
        collect_defects(prototype, format!("{path}.*"), defects);
    }
}
