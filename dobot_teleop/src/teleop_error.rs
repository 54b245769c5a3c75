use thiserror::Error;

/// Enumerates the different types of errors
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TeleopError {
    /// Error of ros2-client / rustdds, carried as a string.
    #[error("dobot_teleop: ros2 error {0}")]
    Ros2(String),
    /// The controller answered a command with a non-zero status code.
    #[error("dobot_teleop: controller rejected command, res {0}")]
    CommandRejected(i32),
    /// The gripper's HTTP endpoint failed or answered badly.
    #[error("dobot_teleop: gripper {0}")]
    Gripper(String),
    #[error(transparent)]
    Reply(#[from] dobot_msgs::reply::ReplyError),
    #[error("dobot_teleop: config {0}")]
    Config(#[from] crate::config::ReadTomlFileError),
}
