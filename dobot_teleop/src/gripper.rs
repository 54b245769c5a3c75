//! Gripper control over the controller's HTTP tool-data endpoint.
//!
//! The CR5 controller exposes end-of-arm tooling registers at
//! `http://<robot-ip>:22000/interface/toolDataExchange`; writing the
//! register block opens or closes the gripper.

use std::time::Duration;

use serde::Serialize;

use crate::TeleopError;

pub const TOOL_DATA_PORT: u16 = 22000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GripperAction {
    Open,
    Close,
}

impl GripperAction {
    /// Register block written to the tool-data endpoint.
    pub fn payload(self) -> [u8; 8] {
        match self {
            GripperAction::Close => [1, 6, 1, 3, 0, 0, 120, 54],
            GripperAction::Open => [1, 6, 1, 3, 3, 232, 120, 136],
        }
    }

    /// Gripper channel value recorded alongside poses: 1.0 open, 0.0 closed.
    pub fn channel_value(self) -> f32 {
        match self {
            GripperAction::Open => 1.0,
            GripperAction::Close => 0.0,
        }
    }

    /// True when actuating would change the current channel state.
    /// Gestures repeating the held state are dropped by the caller.
    pub fn changes(self, current_value: f32) -> bool {
        self.channel_value() != current_value
    }

    /// Decodes a volume-button gesture `[up, down]` from the AR device.
    pub fn from_volume(data: &[i32]) -> Option<Self> {
        match data {
            [1, 0, ..] => Some(GripperAction::Close),
            [0, 1, ..] => Some(GripperAction::Open),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ToolDataBody {
    value: [u8; 8],
}

pub struct GripperClient {
    endpoint: String,
    http: reqwest::Client,
}

impl GripperClient {
    pub fn new(robot_ip: &str) -> Result<Self, TeleopError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .map_err(|err| TeleopError::Gripper(err.to_string()))?;
        Ok(Self {
            endpoint: format!("http://{robot_ip}:{TOOL_DATA_PORT}/interface/toolDataExchange"),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn actuate(&self, action: GripperAction) -> Result<(), TeleopError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ToolDataBody {
                value: action.payload(),
            })
            .send()
            .await
            .map_err(|err| TeleopError::Gripper(err.to_string()))?;

        if !response.status().is_success() {
            return Err(TeleopError::Gripper(format!(
                "endpoint answered HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn open_and_close_write_distinct_register_blocks() {
        assert_ne!(
            GripperAction::Open.payload(),
            GripperAction::Close.payload()
        );
        // open drives the 1000-count (0x03E8) stroke target
        assert_eq!(GripperAction::Open.payload()[4..6], [3, 232]);
        assert_eq!(GripperAction::Close.payload()[4..6], [0, 0]);
    }

    #[test]
    fn volume_gestures_decode_to_actions() {
        assert_eq!(
            GripperAction::from_volume(&[1, 0]),
            Some(GripperAction::Close)
        );
        assert_eq!(
            GripperAction::from_volume(&[0, 1]),
            Some(GripperAction::Open)
        );
        assert_eq!(GripperAction::from_volume(&[0, 0]), None);
        assert_eq!(GripperAction::from_volume(&[1, 1]), None);
        assert_eq!(GripperAction::from_volume(&[]), None);
    }

    #[test]
    fn endpoint_uses_the_tool_data_port() {
        let client = GripperClient::new("192.168.1.6").unwrap();
        assert_eq!(
            client.endpoint(),
            "http://192.168.1.6:22000/interface/toolDataExchange"
        );
    }

    #[test]
    fn channel_values_match_recorder_convention() {
        assert_eq!(GripperAction::Open.channel_value(), 1.0);
        assert_eq!(GripperAction::Close.channel_value(), 0.0);
    }

    #[test]
    fn repeated_gestures_do_not_retrigger_the_cycle() {
        let mut value = GripperAction::Open.channel_value();

        let close = GripperAction::from_volume(&[1, 0]).unwrap();
        assert!(close.changes(value));
        value = close.channel_value();

        // the same gesture replayed while already closed is a no-op
        assert!(!close.changes(value));
        assert!(GripperAction::Open.changes(value));
    }
}
