//! Episode recording for dataset collection.
//!
//! Rows follow the LeRobot-style schema the downstream training tooling
//! expects: `observation.state` is joints + TCP pose + gripper channel,
//! `action` is the target-minus-current deltas plus the absolute gripper
//! command. Episodes land as jsonl under `data/chunk-000/` with one
//! metadata line appended to `meta/episodes.jsonl`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dobot_msgs::msg::dobot_msgs_v4::ToolVectorActual;

pub const CHUNK: &str = "chunk-000";

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("couldn't write episode data")]
    Io(#[from] std::io::Error),
    #[error("couldn't encode row")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRow {
    #[serde(rename = "observation.state")]
    pub observation_state: Vec<f64>,
    pub action: Vec<f64>,
    pub timestamp: f64,
    pub episode_index: usize,
    pub index: usize,
    pub task_index: usize,
    #[serde(rename = "next.reward")]
    pub next_reward: f64,
    #[serde(rename = "next.done")]
    pub next_done: bool,
    /// 1 = valid; flipped downstream when an episode is rejected.
    #[serde(rename = "annotation.human.validity")]
    pub validity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
struct EpisodeMeta {
    episode_index: usize,
    tasks: Vec<String>,
    length: usize,
    recorded_at: String,
}

/// Action vector for one sample: six pose deltas plus the absolute
/// gripper channel. With no target seen yet the deltas are zero and the
/// gripper defaults to open.
pub fn action_from_target(current: &[f64; 6], target: Option<&[f32]>) -> (Vec<f64>, f32) {
    match target {
        Some(target) if target.len() >= 7 => {
            let gripper = target[6];
            let mut action: Vec<f64> = current
                .iter()
                .zip(target.iter())
                .map(|(current, target)| f64::from(*target) - current)
                .collect();
            action.push(f64::from(gripper));
            (action, gripper)
        }
        _ => {
            let mut action = vec![0.0; 6];
            action.push(1.0);
            (action, 1.0)
        }
    }
}

/// Buffers one episode's rows and writes them out on [`finalize`].
///
/// [`finalize`]: EpisodeRecorder::finalize
pub struct EpisodeRecorder {
    data_root: PathBuf,
    episode_index: usize,
    task_index: usize,
    rows: Vec<EpisodeRow>,
}

impl EpisodeRecorder {
    /// Sets up the directory layout and picks the next free episode index.
    pub fn create(data_root: impl Into<PathBuf>, task_index: usize) -> Result<Self, RecorderError> {
        let data_root = data_root.into();
        let data_dir = data_root.join("data").join(CHUNK);
        fs::create_dir_all(&data_dir)?;
        fs::create_dir_all(data_root.join("meta"))?;
        let episode_index = next_episode_index(&data_dir)?;
        Ok(Self {
            data_root,
            episode_index,
            task_index,
            rows: Vec::new(),
        })
    }

    pub fn episode_index(&self) -> usize {
        self.episode_index
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends one sample row from the latest observed values.
    pub fn push_sample(
        &mut self,
        timestamp: f64,
        joints: &[f64],
        tool: &ToolVectorActual,
        target: Option<&[f32]>,
    ) {
        let current = tool.to_array();
        let (action, gripper) = action_from_target(&current, target);

        let mut observation_state = joints.to_vec();
        observation_state.extend(current);
        observation_state.push(f64::from(gripper));

        self.rows.push(EpisodeRow {
            observation_state,
            action,
            timestamp,
            episode_index: self.episode_index,
            index: self.rows.len(),
            task_index: self.task_index,
            next_reward: 0.0,
            next_done: false,
            validity: 1,
        });
    }

    /// Writes the episode rows and appends the metadata line; returns
    /// the episode data path. An episode with no rows is discarded
    /// without touching disk, leaving its index free.
    pub fn finalize(mut self, tasks: &[String]) -> Result<Option<PathBuf>, RecorderError> {
        let Some(last) = self.rows.last_mut() else {
            return Ok(None);
        };
        last.next_done = true;

        let data_path = self
            .data_root
            .join("data")
            .join(CHUNK)
            .join(format!("episode_{:06}.jsonl", self.episode_index));
        let mut data_file = std::io::BufWriter::new(fs::File::create(&data_path)?);
        for row in &self.rows {
            serde_json::to_writer(&mut data_file, row)?;
            data_file.write_all(b"\n")?;
        }
        data_file.flush()?;

        let meta = EpisodeMeta {
            episode_index: self.episode_index,
            tasks: tasks.to_vec(),
            length: self.rows.len(),
            recorded_at: chrono::Local::now().to_rfc3339(),
        };
        let meta_path = self.data_root.join("meta").join("episodes.jsonl");
        let mut meta_file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(meta_path)?;
        serde_json::to_writer(&mut meta_file, &meta)?;
        meta_file.write_all(b"\n")?;

        Ok(Some(data_path))
    }
}

fn next_episode_index(data_dir: &Path) -> Result<usize, RecorderError> {
    let mut next = 0;
    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(index) = name
            .strip_prefix("episode_")
            .and_then(|rest| rest.strip_suffix(".jsonl"))
            .and_then(|digits| digits.parse::<usize>().ok())
        else {
            continue;
        };
        next = next.max(index + 1);
    }
    Ok(next)
}

#[cfg(test)]
mod test {
    use super::*;

    fn tool(pose: [f64; 6]) -> ToolVectorActual {
        ToolVectorActual::from(pose)
    }

    #[test]
    fn action_is_target_minus_current_plus_gripper() {
        let current = [-400.0, 0.0, 300.0, 180.0, 0.0, -90.0];
        let target = [-395.0f32, 2.0, 300.0, 180.0, 0.0, -90.0, 0.0];
        let (action, gripper) = action_from_target(&current, Some(&target));
        assert_eq!(action.len(), 7);
        assert!((action[0] - 5.0).abs() < 1e-4);
        assert!((action[1] - 2.0).abs() < 1e-4);
        assert_eq!(action[6], 0.0);
        assert_eq!(gripper, 0.0);
    }

    #[test]
    fn no_target_yet_means_zero_deltas_and_open_gripper() {
        let (action, gripper) = action_from_target(&[0.0; 6], None);
        assert_eq!(action, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(gripper, 1.0);
    }

    #[test]
    fn short_target_is_treated_as_absent() {
        let (action, gripper) = action_from_target(&[0.0; 6], Some(&[1.0, 2.0]));
        assert_eq!(gripper, 1.0);
        assert_eq!(action[0], 0.0);
    }

    #[test]
    fn records_an_episode_and_advances_the_index() {
        let dir = tempfile::tempdir().unwrap();

        let mut recorder = EpisodeRecorder::create(dir.path(), 0).unwrap();
        assert_eq!(recorder.episode_index(), 0);
        assert!(recorder.is_empty());

        let pose = tool([-400.0, 0.0, 300.0, 180.0, 0.0, -90.0]);
        recorder.push_sample(0.0, &[0.1; 6], &pose, None);
        recorder.push_sample(
            0.05,
            &[0.1; 6],
            &pose,
            Some(&[-398.0, 0.0, 300.0, 180.0, 0.0, -90.0, 1.0]),
        );
        assert_eq!(recorder.len(), 2);

        let path = recorder
            .finalize(&["pick cube".to_string(), "valid".to_string()])
            .unwrap()
            .expect("a non-empty episode is written");
        let contents = fs::read_to_string(&path).unwrap();
        let rows: Vec<EpisodeRow> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        // joints(6) + tcp(6) + gripper
        assert_eq!(rows[0].observation_state.len(), 13);
        assert!(!rows[0].next_done);
        assert!(rows[1].next_done);
        assert!(rows.iter().all(|row| row.validity == 1));
        assert!(contents.contains("\"annotation.human.validity\""));

        let meta = fs::read_to_string(dir.path().join("meta").join("episodes.jsonl")).unwrap();
        assert_eq!(meta.lines().count(), 1);
        assert!(meta.contains("\"pick cube\""));

        // a fresh recorder in the same root picks the next index
        let second = EpisodeRecorder::create(dir.path(), 0).unwrap();
        assert_eq!(second.episode_index(), 1);
    }

    #[test]
    fn empty_episode_is_discarded_without_burning_an_index() {
        let dir = tempfile::tempdir().unwrap();

        let recorder = EpisodeRecorder::create(dir.path(), 0).unwrap();
        assert_eq!(recorder.finalize(&["noop".to_string()]).unwrap(), None);

        // nothing on disk, no meta line
        let data_dir = dir.path().join("data").join(CHUNK);
        assert_eq!(fs::read_dir(&data_dir).unwrap().count(), 0);
        let meta_path = dir.path().join("meta").join("episodes.jsonl");
        assert!(!meta_path.exists());

        // the index is reused by the next recording
        let next = EpisodeRecorder::create(dir.path(), 0).unwrap();
        assert_eq!(next.episode_index(), 0);
    }
}
