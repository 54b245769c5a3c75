//! Interface types for a Dobot CR5 arm driven over ROS2.
//!
//! The bringup node (`dobot_bringup_ros2`) exposes the arm as a set of
//! `dobot_msgs_v4` services plus a couple of status messages. This crate
//! carries those definitions as plain serde structs so they can be used
//! with [ros2-client](https://docs.rs/ros2-client) without any ROS
//! typesupport code generation.
//!
//! Example usage:
//!
//! ```no_run
//! use dobot_msgs::msg::{sensor_msgs::Joy, MessageType};
//!
//! // graph type name for topic creation, e.g. sensor_msgs/msg/Joy
//! let type_name = Joy::message_type_name();
//! ```

pub mod msg;
pub mod reply;
pub mod srv;
