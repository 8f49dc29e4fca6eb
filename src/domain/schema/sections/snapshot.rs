use crate::domain::schema::types::{ConfigNode, Rule, Toggle};

/// Smallest accepted snapshot cadence
pub const MIN_SNAPSHOT_EVERY_N_EVENT: i64 = 10;

pub fn snapshot_section() -> ConfigNode {
    ConfigNode::toggle_section(
        "snapshot",
        Toggle::CanBeEnabled,
        vec![
            repository_section(),
            ConfigNode::boolean("versioned", false),
            store_strategy_section(),
            ConfigNode::identifier("serializer")
                .with_info("Custom snapshot state serializer. Defaults to the constructing serializer."),
        ],
    )
}

fn repository_section() -> ConfigNode {
    ConfigNode::section(
        "repository",
        vec![
            ConfigNode::toggle_section("memory", Toggle::CanBeDisabled, vec![]),
            ConfigNode::toggle_section(
                "doctrine",
                Toggle::CanBeEnabled,
                vec![ConfigNode::scalar("table_name")
                    .not_empty()
                    .default_str("snapshot")
                    .with_info("Table name postfix.")],
            ),
        ],
    )
    .with_info("Only one type of repository can be selected.")
    .with_rule(Rule::MutuallyExclusive)
}

fn store_strategy_section() -> ConfigNode {
    ConfigNode::section(
        "store_strategy",
        vec![
            ConfigNode::toggle_section(
                "every_n_event",
                Toggle::CanBeEnabled,
                vec![ConfigNode::integer("number")
                    .required()
                    .with_rule(Rule::Minimum(MIN_SNAPSHOT_EVERY_N_EVENT))],
            ),
            ConfigNode::toggle_section(
                "custom",
                Toggle::CanBeEnabled,
                vec![ConfigNode::scalar("id").required().not_empty()],
            ),
        ],
    )
    .with_rule(Rule::MutuallyExclusive)
}
