//! Joystick-sample to jog-command translation.
//!
//! One [`JogCommand`] is produced per incoming [`Joy`] sample. A single
//! held-button latch distinguishes press edges from the held state: while
//! the mode button (L1 on a PS-style pad) is down the sticks drive
//! rotation jog instead of translation jog.

use serde::{Deserialize, Serialize};

use dobot_msgs::msg::sensor_msgs::Joy;

/// Button/axis layout of the pad plus mapping parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoyConfig {
    /// Button index of the mode (hold) button, L1 by default.
    pub mode_button: usize,
    /// Left stick left/right.
    pub x_axis: usize,
    /// Left stick up/down.
    pub y_axis: usize,
    /// Right stick up/down.
    pub z_axis: usize,
    /// Axis magnitude below which a stick reads as centered.
    pub deadzone: f32,
    /// Magnitude of one jog step.
    pub step: i32,
}

impl Default for JoyConfig {
    fn default() -> Self {
        Self {
            mode_button: 4,
            x_axis: 0,
            y_axis: 1,
            z_axis: 4,
            deadzone: 0.5,
            step: 1,
        }
    }
}

/// Jog command derived from one joystick sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JogCommand {
    /// Per-axis steps, always `[x, y, z, rx, ry, rz]`.
    pub vector: [i32; 6],
    /// True only on the sample where the mode button went down.
    pub mode_pressed: bool,
}

impl JogCommand {
    pub fn is_idle(&self) -> bool {
        self.vector.iter().all(|step| *step == 0)
    }
}

/// Translates joystick samples into [`JogCommand`]s.
///
/// The latch always reflects the most recent observed state of the mode
/// button, so a press edge is reported exactly once per press.
pub struct JoyMapper {
    config: JoyConfig,
    l1_held: bool,
}

impl JoyMapper {
    pub fn new(config: JoyConfig) -> Self {
        Self {
            config,
            l1_held: false,
        }
    }

    pub fn l1_held(&self) -> bool {
        self.l1_held
    }

    /// Handles one sample, always yielding a command.
    pub fn handle_sample(&mut self, joy: &Joy) -> JogCommand {
        let held = button_down(joy, self.config.mode_button);
        let mode_pressed = held && !self.l1_held;
        self.l1_held = held;

        let x = self.axis_step(joy, self.config.x_axis);
        let y = self.axis_step(joy, self.config.y_axis);
        let z = self.axis_step(joy, self.config.z_axis);

        let vector = if held {
            [0, 0, 0, x, y, z]
        } else {
            [x, y, z, 0, 0, 0]
        };

        JogCommand {
            vector,
            mode_pressed,
        }
    }

    fn axis_step(&self, joy: &Joy, index: usize) -> i32 {
        // out-of-range axes read as centered
        let value = joy
            .axes
            .get(index)
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0);
        if value.abs() < self.config.deadzone {
            0
        } else if value > 0.0 {
            self.config.step
        } else {
            -self.config.step
        }
    }
}

fn button_down(joy: &Joy, index: usize) -> bool {
    matches!(joy.buttons.get(index), Some(state) if *state != 0)
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample(axes: Vec<f32>, buttons: Vec<i32>) -> Joy {
        Joy {
            axes,
            buttons,
            ..Default::default()
        }
    }

    fn mapper() -> JoyMapper {
        JoyMapper::new(JoyConfig::default())
    }

    #[test]
    fn centered_pad_is_idle() {
        let mut mapper = mapper();
        let command = mapper.handle_sample(&sample(vec![0.0; 6], vec![0; 8]));
        assert_eq!(command.vector, [0; 6]);
        assert!(command.is_idle());
        assert!(!command.mode_pressed);
    }

    #[test]
    fn command_vector_is_always_six_elements() {
        let mut mapper = mapper();
        // even an empty sample yields a full-width command
        let command = mapper.handle_sample(&sample(vec![], vec![]));
        assert_eq!(command.vector.len(), 6);
    }

    #[test]
    fn stick_past_deadzone_jogs_translation() {
        let mut mapper = mapper();
        let command = mapper.handle_sample(&sample(vec![1.0, -0.8, 0.0, 0.0, 0.3], vec![0; 8]));
        // z axis (index 4) below deadzone stays centered
        assert_eq!(command.vector, [1, -1, 0, 0, 0, 0]);
    }

    #[test]
    fn held_mode_button_routes_sticks_to_rotation() {
        let mut mapper = mapper();
        let mut buttons = vec![0; 8];
        buttons[4] = 1;
        let command = mapper.handle_sample(&sample(vec![1.0, 0.0, 0.0, 0.0, -1.0], buttons));
        assert_eq!(command.vector, [0, 0, 0, 1, 0, -1]);
    }

    #[test]
    fn press_edge_fires_exactly_once_per_press() {
        let mut mapper = mapper();
        let mut held = vec![0; 8];
        held[4] = 1;

        let first = mapper.handle_sample(&sample(vec![0.0; 6], held.clone()));
        assert!(first.mode_pressed);
        assert!(mapper.l1_held());

        let second = mapper.handle_sample(&sample(vec![0.0; 6], held.clone()));
        assert!(!second.mode_pressed);
        assert!(mapper.l1_held());

        let released = mapper.handle_sample(&sample(vec![0.0; 6], vec![0; 8]));
        assert!(!released.mode_pressed);
        assert!(!mapper.l1_held());

        // pressing again fires a fresh edge
        let again = mapper.handle_sample(&sample(vec![0.0; 6], held));
        assert!(again.mode_pressed);
    }

    #[test]
    fn out_of_range_indices_never_panic() {
        let mut mapper = JoyMapper::new(JoyConfig {
            mode_button: 40,
            x_axis: 17,
            y_axis: 18,
            z_axis: 19,
            ..Default::default()
        });
        let command = mapper.handle_sample(&sample(vec![1.0], vec![1]));
        assert!(command.is_idle());
        assert!(!mapper.l1_held());
    }

    #[test]
    fn axis_values_are_clamped_to_unit_range() {
        let mut mapper = mapper();
        let command = mapper.handle_sample(&sample(vec![5.0, -3.0], vec![0; 8]));
        assert_eq!(command.vector[0], 1);
        assert_eq!(command.vector[1], -1);
    }
}
