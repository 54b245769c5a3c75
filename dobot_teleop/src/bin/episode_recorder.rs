use std::time::{Duration, Instant};

use clap::Parser;
use ros2_client::Context;

use dobot_msgs::msg::{
    dobot_msgs_v4::ToolVectorActual,
    sensor_msgs::JointState,
    std_msgs::Float32MultiArray,
    MessageType,
};
use dobot_teleop::config::{self, TeleopConfig};
use dobot_teleop::recorder::EpisodeRecorder;
use dobot_teleop::ros;

/// Record robot state and teleop targets into a jsonl episode.
///
/// Samples the latest joint states, TCP pose and teleop target at a
/// fixed rate; on ctrl-c the buffered rows are written to
/// `data/chunk-000/episode_NNNNNN.jsonl` and one metadata line is
/// appended to `meta/episodes.jsonl`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Teleop config toml
    #[arg(long)]
    config: Option<String>,

    /// Dataset root directory
    #[arg(long, default_value = "dataset")]
    data_root: String,

    /// Sampling rate in Hz
    #[arg(long, default_value_t = 20.0)]
    rate: f64,

    /// Task description stored in the episode metadata
    #[arg(long, default_value = "teleop episode")]
    task: String,

    #[arg(long, default_value_t = 0)]
    task_index: usize,
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
    let mut node = ros::new_node(&context, "episode_recorder")?;

    let joints_topic = ros::create_topic(
        &mut node,
        &config.topics.joint_states,
        JointState::message_type_name(),
        &ros::sensor_qos(),
    )?;
    let tool_topic = ros::create_topic(
        &mut node,
        &config.topics.tool_vector,
        ToolVectorActual::message_type_name(),
        &ros::sensor_qos(),
    )?;
    let target_topic = ros::create_topic(
        &mut node,
        &config.topics.target_pose,
        Float32MultiArray::message_type_name(),
        &ros::command_qos(),
    )?;

    let joints_sub = node.create_subscription::<JointState>(&joints_topic, None)?;
    let tool_sub = node.create_subscription::<ToolVectorActual>(&tool_topic, None)?;
    let target_sub = node.create_subscription::<Float32MultiArray>(&target_topic, None)?;
    ros::spawn_spinner(&mut node)?;

    let mut recorder = EpisodeRecorder::create(&args.data_root, args.task_index)?;
    log::info!(
        "recording episode {} at {} Hz, ctrl-c to finish",
        recorder.episode_index(),
        args.rate
    );

    let mut latest_joints: Option<JointState> = None;
    let mut latest_tool: Option<ToolVectorActual> = None;
    let mut latest_target: Option<Vec<f32>> = None;

    let start = Instant::now();
    let mut tick = tokio::time::interval(Duration::from_secs_f64(1.0 / args.rate.max(1e-3)));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("ctrl-c, finalizing episode");
                break;
            }
            sample = joints_sub.async_take() => {
                match sample {
                    Ok((msg, _info)) => latest_joints = Some(msg),
                    Err(err) => log::warn!("joint take failed: {err:?}"),
                }
            }
            sample = tool_sub.async_take() => {
                match sample {
                    Ok((msg, _info)) => latest_tool = Some(msg),
                    Err(err) => log::warn!("tool take failed: {err:?}"),
                }
            }
            sample = target_sub.async_take() => {
                match sample {
                    Ok((msg, _info)) => latest_target = Some(msg.data),
                    Err(err) => log::warn!("target take failed: {err:?}"),
                }
            }
            _ = tick.tick() => {
                // wait for the robot topics before recording anything
                let (Some(joints), Some(tool)) = (&latest_joints, &latest_tool) else {
                    continue;
                };
                recorder.push_sample(
                    start.elapsed().as_secs_f64(),
                    &joints.position,
                    tool,
                    latest_target.as_deref(),
                );
            }
        }
    }

    let length = recorder.len();
    match recorder.finalize(&[args.task, "valid".to_string()])? {
        Some(path) => log::info!("saved {} rows to {}", length, path.display()),
        None => log::warn!("no samples recorded, episode discarded"),
    }

    Ok(())
}
