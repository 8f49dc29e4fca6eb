use crate::domain::resolved::{JsonEncodeOption, MessengerMode};
use crate::domain::schema::types::{ConfigNode, Rule, Toggle};

pub fn message_section() -> ConfigNode {
    ConfigNode::section(
        "message",
        vec![
            repository_section(),
            ConfigNode::identifier("serializer")
                .with_info("Custom message serializer. Defaults to the constructing serializer."),
            dispatcher_section(),
            ConfigNode::boolean("decorator", true),
            outbox_section(),
        ],
    )
}

fn repository_section() -> ConfigNode {
    let flags: Vec<&str> = JsonEncodeOption::ALL.iter().map(|o| o.as_str()).collect();

    ConfigNode::section(
        "repository",
        vec![
            ConfigNode::list("json_encode_options", ConfigNode::enumeration("option", &flags).required()),
            ConfigNode::toggle_section("memory", Toggle::CanBeEnabled, vec![]),
            ConfigNode::toggle_section(
                "doctrine",
                Toggle::CanBeDisabled,
                vec![
                    ConfigNode::scalar("connection")
                        .not_empty()
                        .default_str("doctrine.dbal.default_connection"),
                    ConfigNode::identifier("table_schema")
                        .with_info("Custom message table schema. Defaults to the library table schema."),
                    ConfigNode::scalar("table_name")
                        .not_empty()
                        .default_str("event_message")
                        .with_info("Table name postfix."),
                ],
            ),
        ],
    )
    .with_info("Only one type of repository can be selected.")
    .with_rule(Rule::MutuallyExclusive)
}

fn dispatcher_section() -> ConfigNode {
    let modes: Vec<&str> = MessengerMode::ALL.iter().map(|m| m.as_str()).collect();

    ConfigNode::section(
        "dispatcher",
        vec![
            ConfigNode::toggle_section(
                "messenger",
                Toggle::CanBeEnabled,
                vec![ConfigNode::enumeration("mode", &modes)
                    .default_str(MessengerMode::Event.as_str())
                    .with_info("What is sent from an aggregate.")],
            ),
            // dispatcher id => message bus id
            ConfigNode::keyed("chain", ConfigNode::variable("bus")),
        ],
    )
    .with_rule(Rule::RequiredWhenEnabled {
        toggle: "messenger".to_string(),
        dependent: "chain".to_string(),
    })
}

fn outbox_section() -> ConfigNode {
    ConfigNode::toggle_section(
        "outbox",
        Toggle::CanBeEnabled,
        vec![back_off_section(), relay_commit_section(), outbox_repository_section()],
    )
}

fn retry_options(with_delay: bool) -> Vec<ConfigNode> {
    let mut options = Vec::new();
    if with_delay {
        options.push(ConfigNode::integer("initial_delay_ms"));
    }
    options.push(ConfigNode::integer("max_tries"));
    options
}

fn back_off_section() -> ConfigNode {
    ConfigNode::section(
        "back_off",
        vec![
            ConfigNode::toggle_section("exponential", Toggle::CanBeEnabled, retry_options(true)),
            ConfigNode::toggle_section("fibonacci", Toggle::CanBeEnabled, retry_options(true)),
            ConfigNode::toggle_section("linear_back", Toggle::CanBeEnabled, retry_options(true)),
            ConfigNode::toggle_section("no_waiting", Toggle::CanBeEnabled, retry_options(false)),
            ConfigNode::toggle_section("immediately", Toggle::CanBeEnabled, vec![]),
            ConfigNode::toggle_section(
                "custom",
                Toggle::CanBeEnabled,
                vec![ConfigNode::scalar("id").required().not_empty()],
            ),
        ],
    )
    .with_rule(Rule::MutuallyExclusive)
}

fn relay_commit_section() -> ConfigNode {
    ConfigNode::section(
        "relay_commit",
        vec![
            ConfigNode::toggle_section("mark_consumed", Toggle::CanBeEnabled, vec![]),
            ConfigNode::toggle_section("delete", Toggle::CanBeEnabled, vec![]),
        ],
    )
    .with_rule(Rule::MutuallyExclusive)
}

fn outbox_repository_section() -> ConfigNode {
    ConfigNode::section(
        "repository",
        vec![
            ConfigNode::toggle_section("memory", Toggle::CanBeEnabled, vec![]),
            ConfigNode::toggle_section(
                "doctrine",
                Toggle::CanBeDisabled,
                vec![ConfigNode::scalar("table_name")
                    .not_empty()
                    .default_str("outbox_message")
                    .with_info("Table name postfix.")],
            ),
        ],
    )
    .with_info("Only one type of repository can be selected.")
    .with_rule(Rule::MutuallyExclusive)
}
