//! Node, topic and QoS plumbing shared by the teleop binaries.

use ros2_client::{Context, MessageTypeName, Name, Node, NodeName, NodeOptions};
use rustdds::{policy, QosPolicies};

use crate::TeleopError;

pub fn new_node(context: &Context, name: &str) -> Result<Node, TeleopError> {
    let node_name = NodeName::new("/dobot", name)
        .map_err(|err| TeleopError::Ros2(format!("bad node name '{name}': {err:?}")))?;
    context
        .new_node(node_name, NodeOptions::new().enable_rosout(true))
        .map_err(|err| TeleopError::Ros2(format!("create node '{name}': {err:?}")))
}

pub fn create_topic(
    node: &mut Node,
    path: &str,
    type_name: MessageTypeName,
    qos: &QosPolicies,
) -> Result<rustdds::Topic, TeleopError> {
    let (namespace, base) = split_topic_path(path);
    let name = Name::new(&namespace, &base)
        .map_err(|err| TeleopError::Ros2(format!("bad topic '{path}': {err:?}")))?;
    node.create_topic(&name, type_name, qos)
        .map_err(|err| TeleopError::Ros2(format!("create topic '{path}': {err:?}")))
}

/// Runs the node's background event loop (graph discovery, rosout).
pub fn spawn_spinner(node: &mut Node) -> Result<(), TeleopError> {
    let spinner = node
        .spinner()
        .map_err(|err| TeleopError::Ros2(format!("spinner: {err:?}")))?;
    tokio::spawn(async move {
        if let Err(err) = spinner.spin().await {
            log::error!("ros2 spinner stopped: {err:?}");
        }
    });
    Ok(())
}

/// Best-effort, latest-only; for high-rate sensor streams.
pub fn sensor_qos() -> QosPolicies {
    QosPolicies::builder()
        .reliability(policy::Reliability::BestEffort)
        .history(policy::History::KeepLast { depth: 1 })
        .build()
}

/// Reliable with a short queue; for commands and low-rate topics.
pub fn command_qos() -> QosPolicies {
    QosPolicies::builder()
        .reliability(policy::Reliability::Reliable {
            max_blocking_time: rustdds::Duration::from_millis(100),
        })
        .history(policy::History::KeepLast { depth: 10 })
        .build()
}

pub fn service_qos() -> QosPolicies {
    QosPolicies::builder()
        .reliability(policy::Reliability::Reliable {
            max_blocking_time: rustdds::Duration::from_millis(100),
        })
        .history(policy::History::KeepLast { depth: 1 })
        .build()
}

/// Splits a full topic path into the (namespace, base name) pair the
/// graph naming API wants; a missing leading slash is tolerated.
fn split_topic_path(path: &str) -> (String, String) {
    let path = path.trim();
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    match path.rfind('/') {
        Some(0) => ("/".to_string(), path[1..].to_string()),
        Some(idx) => (path[..idx].to_string(), path[idx + 1..].to_string()),
        None => ("/".to_string(), path),
    }
}
