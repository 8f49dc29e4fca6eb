use crate::domain::schema::types::ConfigNode;

pub fn aggregates_section() -> ConfigNode {
    ConfigNode::keyed(
        "aggregates",
        ConfigNode::section(
            "aggregate",
            vec![
                ConfigNode::scalar("class")
                    .required()
                    .not_empty()
                    .with_info("Aggregate root class"),
                ConfigNode::scalar("repository_alias")
                    .not_empty()
                    .with_info("Defaults to \"<aggregate name>Repository\""),
                ConfigNode::section(
                    "message",
                    vec![
                        ConfigNode::boolean("outbox", false),
                        ConfigNode::boolean("decorator", true),
                        ConfigNode::list("dispatchers", ConfigNode::scalar("dispatcher").required()),
                    ],
                ),
                ConfigNode::boolean("upcast", true),
                ConfigNode::boolean("snapshot", false),
            ],
        ),
    )
}
