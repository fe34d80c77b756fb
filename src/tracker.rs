//! Touch tracking state machine: turns decoded samples into relative motion
//! and press edges.

use crate::device::{AxisId, ButtonId, DeviceVariant, VariantPolicy};
use crate::frame::Sample;

pub const DEFAULT_WEIGHT_THRESHOLD: u8 = 0x08;
pub const DEFAULT_POSITION_CHANGE_THRESHOLD: u16 = 0x100;
pub const DEFAULT_MOVEMENT_BITSHIFT: u32 = 8;

/// Tunables fixed at attach time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Minimum weight for a sample to count as a touch.
    pub weight_threshold: u8,
    /// Motion must exceed this (strictly) before it is reported.
    pub position_change_threshold: u16,
    /// Right-shift applied to the motion magnitude before reporting.
    pub movement_bitshift: u32,
    /// Negate reported motion.
    pub reverse: bool,
    /// When false, state is still tracked but no events are returned.
    pub send_events: bool,
    pub log_packets: bool,
    pub log_events: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            weight_threshold: DEFAULT_WEIGHT_THRESHOLD,
            position_change_threshold: DEFAULT_POSITION_CHANGE_THRESHOLD,
            movement_bitshift: DEFAULT_MOVEMENT_BITSHIFT,
            reverse: false,
            send_events: true,
            log_packets: false,
            log_events: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionEvent {
    pub axis: AxisId,
    pub delta: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressEvent {
    pub button: ButtonId,
    pub pressed: bool,
}

/// Output of one sample. Motion, when present, is emitted before the press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Events {
    pub motion: Option<MotionEvent>,
    pub press: Option<PressEvent>,
}

impl Events {
    pub fn is_empty(&self) -> bool {
        self.motion.is_none() && self.press.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackerState {
    pub touching: bool,
    /// Only meaningful while `touching`.
    pub reference_position: u16,
    pub press_latched: bool,
}

pub struct MotionTracker {
    policy: &'static VariantPolicy,
    config: TrackerConfig,
    state: TrackerState,
}

impl MotionTracker {
    pub fn new(variant: DeviceVariant, config: TrackerConfig) -> Self {
        Self {
            policy: variant.policy(),
            config,
            state: TrackerState::default(),
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn process(&mut self, sample: &Sample) -> Events {
        let motion = self.track_touch(sample);
        let press = self.track_press(sample);

        if !self.config.send_events {
            return Events::default();
        }
        Events { motion, press }
    }

    fn track_touch(&mut self, sample: &Sample) -> Option<MotionEvent> {
        let touched = sample.weight >= self.config.weight_threshold;

        match (touched, self.state.touching) {
            (true, false) => {
                self.state.touching = true;
                self.state.reference_position = sample.position;
                self.log_event(format_args!("touch begin at {}", sample.position));
                None
            }
            (true, true) => self.track_motion(sample.position),
            (false, true) => {
                self.state.touching = false;
                self.log_event(format_args!("touch end at {}", sample.position));
                None
            }
            (false, false) => None,
        }
    }

    fn track_motion(&mut self, position: u16) -> Option<MotionEvent> {
        let raw = self.policy.difference(self.state.reference_position, position);
        let threshold = self.config.position_change_threshold as u32;

        if raw.unsigned_abs() <= threshold {
            self.log_event(format_args!(
                "motion {} from {} below threshold {}",
                raw, self.state.reference_position, threshold
            ));
            return None;
        }

        let delta = self.scale(raw);
        self.log_event(format_args!(
            "motion {} -> {} ({} to {})",
            raw, delta, self.state.reference_position, position
        ));
        self.state.reference_position = position;

        Some(MotionEvent {
            axis: self.policy.axis,
            delta,
        })
    }

    /// `sign(raw) * (|raw| >> shift)`, so truncation is always toward zero.
    fn scale(&self, raw: i32) -> i32 {
        let magnitude = raw
            .unsigned_abs()
            .checked_shr(self.config.movement_bitshift)
            .unwrap_or(0) as i32;
        let delta = raw.signum() * magnitude;
        if self.config.reverse {
            -delta
        } else {
            delta
        }
    }

    fn track_press(&mut self, sample: &Sample) -> Option<PressEvent> {
        if sample.pressed == self.state.press_latched {
            return None;
        }
        self.state.press_latched = sample.pressed;
        self.log_event(format_args!(
            "{:?} {}",
            self.policy.button,
            if sample.pressed { "pressed" } else { "released" }
        ));

        Some(PressEvent {
            button: self.policy.button,
            pressed: sample.pressed,
        })
    }

    fn log_event(&self, args: std::fmt::Arguments<'_>) {
        if self.config.log_events {
            log::debug!("[{}] {}", self.policy.name, args);
        }
    }
}
