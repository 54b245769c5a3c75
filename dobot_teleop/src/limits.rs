//! Safety limits for streamed cartesian targets.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Axis-aligned reachable box for the TCP, mm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceLimits {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub z: (f64, f64),
}

impl Default for WorkspaceLimits {
    fn default() -> Self {
        Self {
            x: (-800.0, 0.0),
            y: (-500.0, 500.0),
            z: (155.0, 750.0),
        }
    }
}

impl WorkspaceLimits {
    /// Saturates a target position into the box.
    pub fn clamp(&self, target: [f64; 3]) -> [f64; 3] {
        [
            target[0].clamp(self.x.0, self.x.1),
            target[1].clamp(self.y.0, self.y.1),
            target[2].clamp(self.z.0, self.z.1),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Largest step accepted between consecutive sent targets, mm.
    pub max_jump_mm: f64,
    /// Smallest step worth sending, mm.
    pub min_move_mm: f64,
    /// Streaming rate cap, Hz.
    pub command_rate_hz: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_jump_mm: 40.0,
            min_move_mm: 2.0,
            command_rate_hz: 30.0,
        }
    }
}

/// Decides which streamed targets actually go out.
///
/// A target is rejected when it arrives faster than the rate cap, jumps
/// further than `max_jump_mm` from the last sent target (tracking
/// glitch), or moves less than `min_move_mm` (sensor noise). The first
/// target after construction or [`MotionGate::reset`] always passes the
/// distance checks.
#[derive(Debug)]
pub struct MotionGate {
    max_jump_mm: f64,
    min_move_mm: f64,
    min_interval: Duration,
    last_sent: Option<[f64; 3]>,
    last_sent_at: Option<Instant>,
}

impl MotionGate {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            max_jump_mm: config.max_jump_mm,
            min_move_mm: config.min_move_mm,
            min_interval: Duration::from_secs_f64(1.0 / config.command_rate_hz.max(1e-3)),
            last_sent: None,
            last_sent_at: None,
        }
    }

    /// Returns true when the target should be sent; records it if so.
    pub fn admit(&mut self, target: [f64; 3], now: Instant) -> bool {
        if let Some(at) = self.last_sent_at {
            if now.duration_since(at) < self.min_interval {
                return false;
            }
        }

        if let Some(last) = self.last_sent {
            let dist = distance(target, last);
            if dist > self.max_jump_mm || dist < self.min_move_mm {
                return false;
            }
        }

        self.last_sent = Some(target);
        self.last_sent_at = Some(now);
        true
    }

    /// Forgets the last sent target (the rate cap stays in effect).
    /// Used after a gripper cycle to re-ground the stream.
    pub fn reset(&mut self) {
        self.last_sent = None;
    }
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clamp_saturates_each_axis() {
        let limits = WorkspaceLimits::default();
        assert_eq!(
            limits.clamp([100.0, -900.0, 10.0]),
            [0.0, -500.0, 155.0]
        );
        assert_eq!(
            limits.clamp([-400.0, 0.0, 300.0]),
            [-400.0, 0.0, 300.0]
        );
    }

    fn gate() -> MotionGate {
        MotionGate::new(&GateConfig::default())
    }

    #[test]
    fn first_target_always_passes() {
        let mut gate = gate();
        assert!(gate.admit([-400.0, 0.0, 300.0], Instant::now()));
    }

    #[test]
    fn rate_cap_rejects_back_to_back_targets() {
        let mut gate = gate();
        let t0 = Instant::now();
        assert!(gate.admit([-400.0, 0.0, 300.0], t0));
        assert!(!gate.admit([-405.0, 0.0, 300.0], t0 + Duration::from_millis(1)));
        assert!(gate.admit([-405.0, 0.0, 300.0], t0 + Duration::from_millis(40)));
    }

    #[test]
    fn jump_beyond_threshold_is_rejected() {
        let mut gate = gate();
        let t0 = Instant::now();
        assert!(gate.admit([-400.0, 0.0, 300.0], t0));
        // 50mm jump exceeds the 40mm cap
        assert!(!gate.admit([-450.0, 0.0, 300.0], t0 + Duration::from_millis(40)));
        // a rejected target is not recorded, so a sane follow-up passes
        assert!(gate.admit([-410.0, 0.0, 300.0], t0 + Duration::from_millis(80)));
    }

    #[test]
    fn sub_threshold_move_is_rejected() {
        let mut gate = gate();
        let t0 = Instant::now();
        assert!(gate.admit([-400.0, 0.0, 300.0], t0));
        assert!(!gate.admit([-400.5, 0.0, 300.0], t0 + Duration::from_millis(40)));
    }

    #[test]
    fn reset_forgets_the_last_target() {
        let mut gate = gate();
        let t0 = Instant::now();
        assert!(gate.admit([-400.0, 0.0, 300.0], t0));
        gate.reset();
        // would have been a 100mm jump without the reset
        assert!(gate.admit([-500.0, 0.0, 300.0], t0 + Duration::from_millis(40)));
    }
}
