use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Shape of the value a node accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Scalar,
    /// Any string, number or boolean
    Variable,
    Boolean,
    Integer,
    Enum(Vec<String>),
    /// Ordered list, every entry checked against the node's prototype
    Array,
    /// Fixed children, or user keys checked against the prototype
    Map,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Scalar => write!(f, "string"),
            NodeKind::Variable => write!(f, "scalar"),
            NodeKind::Boolean => write!(f, "boolean"),
            NodeKind::Integer => write!(f, "integer"),
            NodeKind::Enum(_) => write!(f, "enum"),
            NodeKind::Array => write!(f, "array"),
            NodeKind::Map => write!(f, "map"),
        }
    }
}

/// Default applied when the document omits a key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// No default; the key resolves to null
    Absent,
    /// The external library picks its built-in collaborator
    LibraryDefault,
    Value(Value),
}

impl DefaultValue {
    /// Value written into the resolved tree
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Absent | DefaultValue::LibraryDefault => Value::Null,
            DefaultValue::Value(value) => value.clone(),
        }
    }
}

/// Toggle behaviour of a section that owns an implicit `enabled` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toggle {
    /// Disabled unless the document mentions it
    CanBeEnabled,
    /// Enabled unless the document turns it off
    CanBeDisabled,
}

impl Toggle {
    pub fn enabled_by_default(self) -> bool {
        matches!(self, Toggle::CanBeDisabled)
    }
}

/// Validation rule attached to a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// At most one toggle child of this map may be enabled
    MutuallyExclusive,
    /// When the `toggle` child is enabled, every entry of the `dependent`
    /// child must be a non-empty identifier
    RequiredWhenEnabled { toggle: String, dependent: String },
    /// Integer lower bound (inclusive)
    Minimum(i64),
}

/// Node of the static configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigNode {
    pub name: String,
    pub kind: NodeKind,
    pub required: bool,
    pub default: DefaultValue,
    /// Fixed children of a map node, in declaration order
    pub children: Vec<ConfigNode>,
    /// Entry shape for arrays and user-keyed maps
    pub prototype: Option<Box<ConfigNode>>,
    pub toggle: Option<Toggle>,
    pub cannot_be_empty: bool,
    pub rules: Vec<Rule>,
    pub info: Option<String>,
}

impl ConfigNode {
    fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
            default: DefaultValue::Absent,
            children: Vec::new(),
            prototype: None,
            toggle: None,
            cannot_be_empty: false,
            rules: Vec::new(),
            info: None,
        }
    }

    /// String value without a default
    pub fn scalar(name: &str) -> Self {
        Self::new(name, NodeKind::Scalar)
    }

    /// Scalar of any type, kept as written
    pub fn variable(name: &str) -> Self {
        Self::new(name, NodeKind::Variable)
    }

    /// Service identifier; null means the library's own implementation
    pub fn identifier(name: &str) -> Self {
        Self::new(name, NodeKind::Scalar).with_default(DefaultValue::LibraryDefault)
    }

    pub fn boolean(name: &str, default: bool) -> Self {
        Self::new(name, NodeKind::Boolean).with_default(DefaultValue::Value(Value::Bool(default)))
    }

    pub fn integer(name: &str) -> Self {
        Self::new(name, NodeKind::Integer)
    }

    pub fn enumeration(name: &str, values: &[&str]) -> Self {
        Self::new(
            name,
            NodeKind::Enum(values.iter().map(|v| v.to_string()).collect()),
        )
    }

    /// Map with fixed children; absent sections resolve to their defaults
    pub fn section(name: &str, children: Vec<ConfigNode>) -> Self {
        let mut node = Self::new(name, NodeKind::Map);
        node.children = children;
        node
    }

    /// Section with an implicit `enabled` flag
    pub fn toggle_section(name: &str, toggle: Toggle, children: Vec<ConfigNode>) -> Self {
        let mut node = Self::section(name, children);
        node.toggle = Some(toggle);
        node
    }

    /// Map whose keys are chosen by the document author
    pub fn keyed(name: &str, prototype: ConfigNode) -> Self {
        let mut node = Self::new(name, NodeKind::Map);
        node.prototype = Some(Box::new(prototype));
        node
    }

    pub fn list(name: &str, prototype: ConfigNode) -> Self {
        let mut node = Self::new(name, NodeKind::Array);
        node.prototype = Some(Box::new(prototype));
        node
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    pub fn default_str(self, value: &str) -> Self {
        self.with_default(DefaultValue::Value(Value::String(value.to_string())))
    }

    pub fn not_empty(mut self) -> Self {
        self.cannot_be_empty = true;
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_info(mut self, info: &str) -> Self {
        self.info = Some(info.to_string());
        self
    }

    /// Fixed child by name
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Whether this map takes user-chosen keys
    pub fn is_keyed(&self) -> bool {
        self.kind == NodeKind::Map && self.prototype.is_some()
    }

    pub fn is_toggle(&self) -> bool {
        self.toggle.is_some()
    }

    /// Names of the toggle children, the members of an exclusive group
    pub fn toggle_members(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter(|c| c.is_toggle())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Walk the schema by dotted path, following fixed children and prototypes
    pub fn lookup(&self, path: &str) -> Option<&ConfigNode> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| match node.child(segment) {
                Some(child) => Some(child),
                None => node.prototype.as_deref(),
            })
    }
}
