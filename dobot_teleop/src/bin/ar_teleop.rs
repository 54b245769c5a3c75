use std::time::{Duration, Instant};

use clap::Parser;
use ros2_client::Context;

use dobot_msgs::msg::{
    geometry_msgs::PoseStamped,
    std_msgs::{Float32MultiArray, Int32MultiArray},
    MessageType,
};
use dobot_teleop::config::{self, TeleopConfig};
use dobot_teleop::dobot_client::DobotClient;
use dobot_teleop::gripper::{GripperAction, GripperClient};
use dobot_teleop::limits::MotionGate;
use dobot_teleop::ros;
use dobot_teleop::transforms::quat_to_euler;

/// Stream AR-device poses to the arm as ServoP targets.
///
/// The first pose sample after startup becomes the device reference;
/// subsequent samples drive the TCP relative to its initial pose, with
/// workspace clamping and jump/noise gating. Volume-button gestures
/// actuate the gripper over the controller's HTTP tool-data endpoint,
/// and every sent target is republished for the episode recorder.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Teleop config toml
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => config::get_config_from_toml(path)?,
        None => TeleopConfig::default(),
    };

    let context = Context::new()?;
    let mut node = ros::new_node(&context, "ar_teleop")?;

    let pose_topic = ros::create_topic(
        &mut node,
        &config.topics.ar_pose,
        PoseStamped::message_type_name(),
        &ros::sensor_qos(),
    )?;
    // depth-1 best-effort so gestures from before or during a gripper
    // cycle are not replayed afterwards
    let volume_topic = ros::create_topic(
        &mut node,
        &config.topics.volume,
        Int32MultiArray::message_type_name(),
        &ros::sensor_qos(),
    )?;
    let target_topic = ros::create_topic(
        &mut node,
        &config.topics.target_pose,
        Float32MultiArray::message_type_name(),
        &ros::command_qos(),
    )?;

    let pose_sub = node.create_subscription::<PoseStamped>(&pose_topic, None)?;
    let volume_sub = node.create_subscription::<Int32MultiArray>(&volume_topic, None)?;
    let target_pub = node.create_publisher::<Float32MultiArray>(&target_topic, None)?;

    let dobot = DobotClient::new(&mut node)?;
    let gripper = GripperClient::new(&config.robot_ip)?;
    ros::spawn_spinner(&mut node)?;

    log::info!("clearing errors and enabling the robot");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => return Ok(()),
        _ = dobot.startup() => {}
    }
    let initial_robot = tokio::select! {
        _ = tokio::signal::ctrl_c() => return Ok(()),
        pose = dobot.wait_for_tool_pose() => pose,
    };
    log::info!("initial TCP pose {initial_robot:?}");

    let limits = config.limits;
    let mut gate = MotionGate::new(&config.gate);
    let mut initial_device: Option<([f64; 3], (f64, f64, f64))> = None;
    let mut gripper_value = GripperAction::Open.channel_value();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("ctrl-c, exiting");
                break;
            }
            sample = pose_sub.async_take() => {
                let pose = match sample {
                    Ok((msg, _info)) => msg.pose,
                    Err(err) => {
                        log::warn!("ar pose take failed: {err:?}");
                        continue;
                    }
                };

                let position = [pose.position.x, pose.position.y, pose.position.z];
                let euler = quat_to_euler(&pose.orientation);
                let Some((device0, euler0)) = initial_device else {
                    initial_device = Some((position, euler));
                    log::info!("teleop initialized");
                    continue;
                };

                // device-frame deltas, metres scaled to robot mm
                let dx = (position[0] - device0[0]) * config.position_scale;
                let dy = (position[1] - device0[1]) * config.position_scale;
                let dz = (position[2] - device0[2]) * config.position_scale;

                let target_pos = limits.clamp([
                    initial_robot[0] - dz,
                    initial_robot[1] - dx,
                    initial_robot[2] + dy,
                ]);
                let rx = initial_robot[3] + (euler.1 - euler0.1).to_degrees();
                let ry = initial_robot[4] + (euler.2 - euler0.2).to_degrees();
                let rz = initial_robot[5] + (euler.0 - euler0.0).to_degrees();

                if !gate.admit(target_pos, Instant::now()) {
                    continue;
                }

                let target = [target_pos[0], target_pos[1], target_pos[2], rx, ry, rz];
                if let Err(err) = dobot.servo_p(target).await {
                    log::warn!("servo stream failed: {err}");
                }

                let mut data: Vec<f32> = target.iter().map(|value| *value as f32).collect();
                data.push(gripper_value);
                let msg = Float32MultiArray {
                    data,
                    ..Default::default()
                };
                if let Err(err) = target_pub.publish(msg) {
                    log::warn!("target publish failed: {err}");
                }
            }
            gesture = volume_sub.async_take() => {
                let data = match gesture {
                    Ok((msg, _info)) => msg.data,
                    Err(err) => {
                        log::warn!("volume take failed: {err:?}");
                        continue;
                    }
                };
                let Some(action) = GripperAction::from_volume(&data) else {
                    continue;
                };
                if !action.changes(gripper_value) {
                    continue;
                }

                // streaming is held off for the whole gripper cycle; pose
                // samples arriving meanwhile are dropped by the depth-1 QoS
                log::info!("gripper {action:?}");
                gripper_value = action.channel_value();
                tokio::time::sleep(Duration::from_millis(300)).await;
                if let Err(err) = gripper.actuate(action).await {
                    log::warn!("gripper failed: {err}");
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
                if let Err(err) = dobot.enable_robot().await {
                    log::warn!("re-enable after gripper failed: {err}");
                }
                gate.reset();
            }
        }
    }

    Ok(())
}
