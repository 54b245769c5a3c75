use ros2_client::builtin_interfaces;

pub trait MessageType: Sized {
    fn message_type_name() -> ros2_client::MessageTypeName;
}
macro_rules! message_type {
    ($($package_name:ident / $type_name:ident),* $(,)?) => {$(
        impl crate::msg::MessageType for crate::msg::$package_name::$type_name {
            fn message_type_name() -> ros2_client::MessageTypeName {
                ros2_client::MessageTypeName::new(stringify!($package_name), stringify!($type_name))
            }
        }
        impl ros2_client::Message for crate::msg::$package_name::$type_name {}
    )*};
}
message_type!(
    std_msgs / Header,
    std_msgs / Int32MultiArray,
    std_msgs / Float32MultiArray,
    geometry_msgs / PoseStamped,
    sensor_msgs / Joy,
    sensor_msgs / JointState,
    dobot_msgs_v4 / RobotStatus,
    dobot_msgs_v4 / ToolVectorActual,
);

/// [std_msgs](https://github.com/ros2/common_interfaces/tree/HEAD/std_msgs)
pub mod std_msgs {
    use serde::{Deserialize, Serialize};

    use crate::msg::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Header {
        pub stamp: builtin_interfaces::Time,
        pub frame_id: String,
    }
    impl Default for Header {
        fn default() -> Self {
            Self {
                stamp: builtin_interfaces::Time::ZERO,
                frame_id: Default::default(),
            }
        }
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct MultiArrayDimension {
        pub label: String,
        pub size: u32,
        pub stride: u32,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct MultiArrayLayout {
        pub dim: Vec<MultiArrayDimension>,
        pub data_offset: u32,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Int32MultiArray {
        pub layout: MultiArrayLayout,
        pub data: Vec<i32>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Float32MultiArray {
        pub layout: MultiArrayLayout,
        pub data: Vec<f32>,
    }
}

/// [geometry_msgs](https://github.com/ros2/common_interfaces/tree/HEAD/geometry_msgs)
pub mod geometry_msgs {
    use serde::{Deserialize, Serialize};

    use crate::msg::*;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Point {
        pub x: f64,
        pub y: f64,
        pub z: f64,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Quaternion {
        pub x: f64,
        pub y: f64,
        pub z: f64,
        pub w: f64,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Pose {
        pub position: Point,
        pub orientation: Quaternion,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct PoseStamped {
        pub header: std_msgs::Header,
        pub pose: Pose,
    }
}

/// [sensor_msgs](https://github.com/ros2/common_interfaces/tree/HEAD/sensor_msgs)
pub mod sensor_msgs {
    use serde::{Deserialize, Serialize};

    use crate::msg::*;

    /// One reading of button/axis state from a joystick.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Joy {
        pub header: std_msgs::Header,
        pub axes: Vec<f32>,
        pub buttons: Vec<i32>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct JointState {
        pub header: std_msgs::Header,
        pub name: Vec<String>,
        pub position: Vec<f64>,
        pub velocity: Vec<f64>,
        pub effort: Vec<f64>,
    }
}

/// Status messages published by the Dobot bringup node.
pub mod dobot_msgs_v4 {
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct RobotStatus {
        pub is_enable: bool,
        pub is_connected: bool,
    }

    /// Actual TCP pose of the arm, position in mm and rotation in degrees.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ToolVectorActual {
        pub x: f64,
        pub y: f64,
        pub z: f64,
        pub rx: f64,
        pub ry: f64,
        pub rz: f64,
    }

    impl ToolVectorActual {
        pub fn to_array(self) -> [f64; 6] {
            [self.x, self.y, self.z, self.rx, self.ry, self.rz]
        }
    }

    impl From<[f64; 6]> for ToolVectorActual {
        fn from(value: [f64; 6]) -> Self {
            Self {
                x: value[0],
                y: value[1],
                z: value[2],
                rx: value[3],
                ry: value[4],
                rz: value[5],
            }
        }
    }
}
