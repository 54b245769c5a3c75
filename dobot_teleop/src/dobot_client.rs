//! Service clients for the Dobot bringup node.

use std::time::Duration;

use ros2_client::{Client, Name, Node, Service, ServiceMapping};
use rustdds::QosPolicies;

use dobot_msgs::reply::parse_pose_reply;
use dobot_msgs::srv;

use crate::{ros, TeleopError};

/// The bundle of controller services the teleop nodes call.
pub struct DobotClient {
    clear_error: Client<srv::ClearError>,
    enable_robot: Client<srv::EnableRobot>,
    get_pose: Client<srv::GetPose>,
    servo_p: Client<srv::ServoP>,
}

fn create_client<S>(
    node: &mut Node,
    service: &str,
    qos: &QosPolicies,
) -> Result<Client<S>, TeleopError>
where
    S: Service + 'static,
    S::Request: Clone,
{
    let name = Name::new(srv::SERVICE_PREFIX, service)
        .map_err(|err| TeleopError::Ros2(format!("bad service name '{service}': {err:?}")))?;
    node.create_client::<S>(
        ServiceMapping::Enhanced,
        &name,
        &srv::service_type_name(service),
        qos.clone(),
        qos.clone(),
    )
    .map_err(|err| TeleopError::Ros2(format!("create client '{service}': {err:?}")))
}

impl DobotClient {
    pub fn new(node: &mut Node) -> Result<Self, TeleopError> {
        let qos = ros::service_qos();
        Ok(Self {
            clear_error: create_client(node, "ClearError", &qos)?,
            enable_robot: create_client(node, "EnableRobot", &qos)?,
            get_pose: create_client(node, "GetPose", &qos)?,
            servo_p: create_client(node, "ServoP", &qos)?,
        })
    }

    async fn call<S>(client: &Client<S>, request: S::Request) -> Result<S::Response, TeleopError>
    where
        S: Service + 'static,
    {
        let request_id = client
            .async_send_request(request)
            .await
            .map_err(|err| TeleopError::Ros2(format!("send request: {err:?}")))?;
        client
            .async_receive_response(request_id)
            .await
            .map_err(|err| TeleopError::Ros2(format!("receive response: {err:?}")))
    }

    pub async fn clear_error(&self) -> Result<(), TeleopError> {
        let response = Self::call(&self.clear_error, srv::ClearErrorRequest::default()).await?;
        ok_or_rejected(response.res)
    }

    pub async fn enable_robot(&self) -> Result<(), TeleopError> {
        let response = Self::call(&self.enable_robot, srv::EnableRobotRequest::default()).await?;
        ok_or_rejected(response.res)
    }

    /// Current TCP pose via `GetPose`, parsed from the reply string.
    pub async fn tool_pose(&self) -> Result<[f64; 6], TeleopError> {
        let response = Self::call(&self.get_pose, srv::GetPoseRequest::default()).await?;
        ok_or_rejected(response.res)?;
        Ok(parse_pose_reply(&response.robot_return)?)
    }

    /// Streams one cartesian target. The response is not awaited; the
    /// servo stream is fire-and-forget.
    pub async fn servo_p(&self, target: [f64; 6]) -> Result<(), TeleopError> {
        self.servo_p
            .async_send_request(srv::ServoPRequest::from(target))
            .await
            .map(|_| ())
            .map_err(|err| TeleopError::Ros2(format!("servo_p: {err:?}")))
    }

    /// Clear-then-enable startup handshake, retrying until the
    /// controller accepts both.
    pub async fn startup(&self) {
        loop {
            match self.clear_error().await {
                Ok(()) => break,
                Err(err) => log::warn!("clear error failed, retrying: {err}"),
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        loop {
            match self.enable_robot().await {
                Ok(()) => {
                    log::info!("robot enabled");
                    break;
                }
                Err(err) => log::warn!("enable robot failed, retrying: {err}"),
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }

    /// Initial TCP pose, retrying until the controller answers sanely.
    pub async fn wait_for_tool_pose(&self) -> [f64; 6] {
        loop {
            match self.tool_pose().await {
                Ok(pose) => return pose,
                Err(err) => log::warn!("initial pose unavailable, retrying: {err}"),
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
}

fn ok_or_rejected(res: i32) -> Result<(), TeleopError> {
    if res == 0 {
        Ok(())
    } else {
        Err(TeleopError::CommandRejected(res))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn request_types_satisfy_client_bounds() {
        // Node::create_client needs Clone on the request type
        fn assert_client_compatible<S>()
        where
            S: Service + 'static,
            S::Request: Clone,
        {
        }
        assert_client_compatible::<srv::ClearError>();
        assert_client_compatible::<srv::EnableRobot>();
        assert_client_compatible::<srv::GetPose>();
        assert_client_compatible::<srv::ServoP>();
    }

    #[test]
    fn nonzero_res_maps_to_command_rejected() {
        assert!(ok_or_rejected(0).is_ok());
        let err = ok_or_rejected(-1).unwrap_err();
        assert!(matches!(err, TeleopError::CommandRejected(-1)));
    }
}
