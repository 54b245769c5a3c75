use clap::Parser;
use ros2_client::Context;

use dobot_msgs::msg::{sensor_msgs::Joy, std_msgs::Int32MultiArray, MessageType};
use dobot_teleop::config::{self, TeleopConfig};
use dobot_teleop::joy_mapper::JoyMapper;
use dobot_teleop::ros;

/// Translate joystick samples into 6-axis jog command vectors.
///
/// Subscribes to a `sensor_msgs/Joy` topic and publishes one
/// `std_msgs/Int32MultiArray` command per sample; the robot driver owns
/// the mapping from jog vector to actual motion. Holding L1 routes the
/// sticks to rotation jog instead of translation jog.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Teleop config toml
    #[arg(long)]
    config: Option<String>,

    /// Joystick input topic, overrides the config
    #[arg(long)]
    joy_topic: Option<String>,

    /// Jog command output topic, overrides the config
    #[arg(long)]
    command_topic: Option<String>,
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
    let joy_topic_path = args.joy_topic.unwrap_or(config.topics.joy);
    let command_topic_path = args.command_topic.unwrap_or(config.topics.command);

    let context = Context::new()?;
    let mut node = ros::new_node(&context, "joystick_control")?;

    let joy_topic = ros::create_topic(
        &mut node,
        &joy_topic_path,
        Joy::message_type_name(),
        &ros::sensor_qos(),
    )?;
    let command_topic = ros::create_topic(
        &mut node,
        &command_topic_path,
        Int32MultiArray::message_type_name(),
        &ros::command_qos(),
    )?;

    let joy_sub = node.create_subscription::<Joy>(&joy_topic, None)?;
    let command_pub = node.create_publisher::<Int32MultiArray>(&command_topic, None)?;
    ros::spawn_spinner(&mut node)?;

    log::info!("jogging from '{joy_topic_path}' to '{command_topic_path}'");

    let mut mapper = JoyMapper::new(config.joy);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("ctrl-c, exiting");
                break;
            }
            sample = joy_sub.async_take() => {
                let joy = match sample {
                    Ok((joy, _info)) => joy,
                    Err(err) => {
                        log::warn!("joy take failed: {err:?}");
                        continue;
                    }
                };

                let command = mapper.handle_sample(&joy);
                if command.mode_pressed {
                    log::info!("mode button down, sticks jog rotation");
                }
                if !command.is_idle() {
                    log::debug!("jog {:?}", command.vector);
                }

                let msg = Int32MultiArray {
                    data: command.vector.to_vec(),
                    ..Default::default()
                };
                if let Err(err) = command_pub.publish(msg) {
                    log::warn!("command publish failed: {err}");
                }
            }
        }
    }

    Ok(())
}
