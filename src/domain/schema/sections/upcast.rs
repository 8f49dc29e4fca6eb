use crate::domain::resolved::UpcastContext;
use crate::domain::schema::types::{ConfigNode, Toggle};

pub fn upcast_section() -> ConfigNode {
    let contexts: Vec<&str> = UpcastContext::ALL.iter().map(|c| c.as_str()).collect();

    ConfigNode::toggle_section(
        "upcast",
        Toggle::CanBeEnabled,
        vec![ConfigNode::enumeration("context", &contexts).default_str(UpcastContext::Payload.as_str())],
    )
}
