//! Service types for the Dobot v4 command API.
//!
//! The bringup node maps every controller command onto a ROS2 service
//! under [`SERVICE_PREFIX`]. The full API is large; this module carries
//! the services the application nodes call plus a representative set
//! for each functional group (control, motion, queries, I/O, Modbus,
//! kinematics). Responses report a controller status code in `res`
//! (zero on success); query-style services additionally return their
//! payload as a formatted string in `robot_return`, see
//! [`crate::reply`] for parsing.

use ros2_client::{service::AService, ServiceTypeName};
use serde::{Deserialize, Serialize};

/// Namespace the bringup node advertises its services under.
pub const SERVICE_PREFIX: &str = "/dobot_bringup_ros2/srv";

/// Graph type name for a `dobot_msgs_v4` service, e.g.
/// `dobot_msgs_v4/srv/EnableRobot`.
pub fn service_type_name(service: &str) -> ServiceTypeName {
    ServiceTypeName::new("dobot_msgs_v4", service)
}

macro_rules! empty_request {
    ($($name:ident),* $(,)?) => {$(
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {}
        impl ros2_client::Message for $name {}
    )*};
}

macro_rules! res_only_response {
    ($($name:ident),* $(,)?) => {$(
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            pub res: i32,
        }
        impl ros2_client::Message for $name {}
    )*};
}

macro_rules! query_response {
    ($($name:ident),* $(,)?) => {$(
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            pub res: i32,
            pub robot_return: String,
        }
        impl ros2_client::Message for $name {}
    )*};
}

/// Six-component cartesian target (x, y, z in mm, rx, ry, rz in deg),
/// field names per the controller protocol.
macro_rules! cartesian_request {
    ($($name:ident),* $(,)?) => {$(
        #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            pub a: f64,
            pub b: f64,
            pub c: f64,
            pub d: f64,
            pub e: f64,
            pub f: f64,
        }
        impl ros2_client::Message for $name {}
        impl From<[f64; 6]> for $name {
            fn from(value: [f64; 6]) -> Self {
                Self {
                    a: value[0],
                    b: value[1],
                    c: value[2],
                    d: value[3],
                    e: value[4],
                    f: value[5],
                }
            }
        }
    )*};
}

macro_rules! message_impl {
    ($($name:ident),* $(,)?) => {$(
        impl ros2_client::Message for $name {}
    )*};
}

// control
empty_request!(
    EnableRobotRequest,
    DisableRobotRequest,
    ClearErrorRequest,
    EmergencyStopRequest,
    GetPoseRequest,
    GetAngleRequest,
    GetErrorIDRequest,
);
res_only_response!(
    EnableRobotResponse,
    DisableRobotResponse,
    ClearErrorResponse,
    EmergencyStopResponse,
    SpeedFactorResponse,
    MovJResponse,
    MovLResponse,
    ServoPResponse,
    ServoJResponse,
    DOResponse,
    ToolDOResponse,
    AOResponse,
    ModbusCloseResponse,
    SetHoldRegsResponse,
);
query_response!(
    GetPoseResponse,
    GetAngleResponse,
    GetErrorIDResponse,
    DIResponse,
    GetHoldRegsResponse,
    PositiveSolutionResponse,
    InverseSolutionResponse,
);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedFactorRequest {
    /// Global speed ratio in percent, 1..=100.
    pub ratio: i32,
}

// motion targets
cartesian_request!(MovJRequest, MovLRequest, ServoPRequest);

/// Joint-space streaming target, degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServoJRequest {
    pub j1: f64,
    pub j2: f64,
    pub j3: f64,
    pub j4: f64,
    pub j5: f64,
    pub j6: f64,
}

// digital / analog I/O
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DORequest {
    pub index: i32,
    pub status: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDORequest {
    pub index: i32,
    pub status: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AORequest {
    pub index: i32,
    pub value: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DIRequest {
    pub index: i32,
}

// Modbus master passthrough
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModbusCreateRequest {
    pub ip: String,
    pub port: i32,
    pub slave_id: i32,
    pub is_rtu: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModbusCreateResponse {
    pub res: i32,
    /// Handle for subsequent register calls.
    pub index: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModbusCloseRequest {
    pub index: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetHoldRegsRequest {
    pub index: i32,
    pub addr: i32,
    pub count: i32,
    pub val_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetHoldRegsRequest {
    pub index: i32,
    pub addr: i32,
    pub count: i32,
    pub val_tab: String,
    pub val_type: String,
}

// kinematics
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositiveSolutionRequest {
    pub j1: f64,
    pub j2: f64,
    pub j3: f64,
    pub j4: f64,
    pub j5: f64,
    pub j6: f64,
    pub user: i32,
    pub tool: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InverseSolutionRequest {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub user: i32,
    pub tool: i32,
}

message_impl!(
    SpeedFactorRequest,
    ServoJRequest,
    DORequest,
    ToolDORequest,
    AORequest,
    DIRequest,
    ModbusCreateRequest,
    ModbusCreateResponse,
    ModbusCloseRequest,
    GetHoldRegsRequest,
    SetHoldRegsRequest,
    PositiveSolutionRequest,
    InverseSolutionRequest,
);

pub type EnableRobot = AService<EnableRobotRequest, EnableRobotResponse>;
pub type DisableRobot = AService<DisableRobotRequest, DisableRobotResponse>;
pub type ClearError = AService<ClearErrorRequest, ClearErrorResponse>;
pub type EmergencyStop = AService<EmergencyStopRequest, EmergencyStopResponse>;
pub type SpeedFactor = AService<SpeedFactorRequest, SpeedFactorResponse>;
pub type MovJ = AService<MovJRequest, MovJResponse>;
pub type MovL = AService<MovLRequest, MovLResponse>;
pub type ServoP = AService<ServoPRequest, ServoPResponse>;
pub type ServoJ = AService<ServoJRequest, ServoJResponse>;
pub type GetPose = AService<GetPoseRequest, GetPoseResponse>;
pub type GetAngle = AService<GetAngleRequest, GetAngleResponse>;
pub type GetErrorID = AService<GetErrorIDRequest, GetErrorIDResponse>;
pub type DO = AService<DORequest, DOResponse>;
pub type ToolDO = AService<ToolDORequest, ToolDOResponse>;
pub type AO = AService<AORequest, AOResponse>;
pub type DI = AService<DIRequest, DIResponse>;
pub type ModbusCreate = AService<ModbusCreateRequest, ModbusCreateResponse>;
pub type ModbusClose = AService<ModbusCloseRequest, ModbusCloseResponse>;
pub type GetHoldRegs = AService<GetHoldRegsRequest, GetHoldRegsResponse>;
pub type SetHoldRegs = AService<SetHoldRegsRequest, SetHoldRegsResponse>;
pub type PositiveSolution = AService<PositiveSolutionRequest, PositiveSolutionResponse>;
pub type InverseSolution = AService<InverseSolutionRequest, InverseSolutionResponse>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cartesian_request_from_array_keeps_order() {
        let req = ServoPRequest::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(req.a, 1.0);
        assert_eq!(req.c, 3.0);
        assert_eq!(req.f, 6.0);
    }

    #[test]
    fn response_defaults_to_success_code() {
        // controller uses res == 0 for success, the default
        assert_eq!(EnableRobotResponse::default().res, 0);
        assert!(GetPoseResponse::default().robot_return.is_empty());
    }
}
