use crate::domain::schema::types::ConfigNode;

pub fn time_section() -> ConfigNode {
    ConfigNode::section(
        "time",
        vec![
            ConfigNode::scalar("recording_timezone")
                .not_empty()
                .default_str("UTC"),
            ConfigNode::identifier("clock")
                .with_info("Custom clock service. Defaults to the system clock."),
        ],
    )
}
