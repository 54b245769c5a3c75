//! Teleoperation for a Dobot CR5 arm over ROS2.
//!
//! Three nodes live in `src/bin/`:
//!
//! * `joystick_control` turns `sensor_msgs/Joy` samples into 6-axis jog
//!   command vectors,
//! * `ar_teleop` streams AR-device poses to the arm as `ServoP` targets
//!   with workspace limits and gripper control,
//! * `episode_recorder` samples robot state and teleop targets into
//!   jsonl episodes for dataset collection.
//!
//! The modules here hold the logic those nodes share; the mapping,
//! gating, parsing and recording paths run without a ROS graph and are
//! unit-tested offline.

pub mod config;
pub mod dobot_client;
pub mod gripper;
pub mod joy_mapper;
pub mod limits;
pub mod recorder;
pub mod ros;
pub mod transforms;

mod teleop_error;
pub use teleop_error::TeleopError;
