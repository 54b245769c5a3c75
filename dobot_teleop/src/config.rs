//! Teleop configuration, loaded from a toml file.

use serde::{Deserialize, Serialize};

use crate::joy_mapper::JoyConfig;
use crate::limits::{GateConfig, WorkspaceLimits};

// for reading/writing tomls
#[derive(Debug, thiserror::Error)]
pub enum ReadTomlFileError {
    #[error("couldn't read file")]
    Read(#[from] std::io::Error),
    #[error("couldn't parse toml")]
    Toml(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Topics {
    pub joy: String,
    pub command: String,
    pub ar_pose: String,
    pub volume: String,
    pub target_pose: String,
    pub joint_states: String,
    pub tool_vector: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            joy: "/joy".to_string(),
            command: "/jog_command".to_string(),
            ar_pose: "/bros2/ar_pose".to_string(),
            volume: "/bros/volume".to_string(),
            target_pose: "/teleop/target_pose".to_string(),
            joint_states: "/joint_states_robot".to_string(),
            tool_vector: "/dobot_msgs_v4/msg/ToolVectorActual".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleopConfig {
    pub robot_ip: String,
    /// AR device metres to robot mm.
    pub position_scale: f64,
    pub joy: JoyConfig,
    pub limits: WorkspaceLimits,
    pub gate: GateConfig,
    pub topics: Topics,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            robot_ip: "192.168.1.6".to_string(),
            position_scale: 900.0,
            joy: JoyConfig::default(),
            limits: WorkspaceLimits::default(),
            gate: GateConfig::default(),
            topics: Topics::default(),
        }
    }
}

pub fn get_config_from_toml(config_file: &str) -> Result<TeleopConfig, ReadTomlFileError> {
    let contents = std::fs::read_to_string(config_file)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_toml_gives_the_defaults() {
        let config: TeleopConfig = toml::from_str("").unwrap();
        assert_eq!(config, TeleopConfig::default());
        assert_eq!(config.robot_ip, "192.168.1.6");
        assert_eq!(config.gate.max_jump_mm, 40.0);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: TeleopConfig = toml::from_str(
            r#"
            robot_ip = "10.0.0.5"

            [joy]
            mode_button = 5
            deadzone = 0.3

            [limits]
            z = [100.0, 600.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.robot_ip, "10.0.0.5");
        assert_eq!(config.joy.mode_button, 5);
        assert_eq!(config.joy.deadzone, 0.3);
        // untouched joy fields keep their defaults
        assert_eq!(config.joy.x_axis, 0);
        assert_eq!(config.limits.z, (100.0, 600.0));
        assert_eq!(config.limits.x, WorkspaceLimits::default().x);
        assert_eq!(config.topics.joy, "/joy");
    }

    #[test]
    fn bad_toml_reports_a_parse_error() {
        let err = toml::from_str::<TeleopConfig>("robot_ip = [1, 2]").unwrap_err();
        let _ = err.to_string();
    }

    #[test]
    fn missing_file_reports_a_read_error() {
        let err = get_config_from_toml("/nonexistent/teleop.toml").unwrap_err();
        assert!(matches!(err, ReadTomlFileError::Read(_)));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = TeleopConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: TeleopConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
