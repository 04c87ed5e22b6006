//! Per-tick control input of the arm, and the mapping from pressed keys to it.
//!
//! Reading the actual device is left to the host. The host passes the set of keys held
//! during the frame to `InputMapper::update` and hands the resulting `ControlState` to the
//! arm controller.

use std::fmt;
use bitflags::bitflags;
use nalgebra::Vector3;
use crate::kinematic_traits::Joint;
use crate::parameters::arm_kinematics::InputSpeeds;

/// Frame in which a commanded pose change is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceFrame {
    /// The fixed base frame of the arm.
    #[default]
    Ship,
    /// The frame of the end effector itself.
    EndEffector,
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceFrame::Ship => f.write_str("Ship"),
            ReferenceFrame::EndEffector => f.write_str("End Effector"),
        }
    }
}

/// What the arm is asked to do during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Drive a single joint. With no joint selected, the arm holds still.
    Direct {
        joint: Option<Joint>,
        /// Degrees per second
        velocity: f64,
    },
    /// Move the end effector in all six degrees of freedom.
    Pose {
        frame: ReferenceFrame,
        /// Translation per second
        translation: Vector3<f64>,
        /// Euler angles per second, degrees
        rotation: Vector3<f64>,
    },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Direct { joint: Some(Joint::ShoulderYaw), velocity: 0.0 }
    }
}

/// Snapshot of the control input, consumed once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlState {
    pub mode: Mode,
    /// Zero the arm. Takes precedence over the mode.
    pub reset: bool,
}

impl ControlState {
    pub fn direct(joint: Joint, velocity: f64) -> Self {
        ControlState { mode: Mode::Direct { joint: Some(joint), velocity }, reset: false }
    }

    pub fn pose(frame: ReferenceFrame, translation: Vector3<f64>, rotation: Vector3<f64>) -> Self {
        ControlState { mode: Mode::Pose { frame, translation, rotation }, reset: false }
    }

    pub fn reset_command() -> Self {
        ControlState { reset: true, ..Default::default() }
    }

    /// One line summary for on-screen display, like `2 - Direct: Shoulder Pitch (30.00)`.
    pub fn status_text(&self) -> String {
        match self.mode {
            Mode::Direct { joint: Some(joint), velocity } => {
                format!("{} - Direct: {} ({:.2})", joint.index() + 1, joint, velocity)
            }
            Mode::Direct { joint: None, velocity } => format!("Direct: no joint ({:.2})", velocity),
            Mode::Pose { frame, translation: t, rotation: r } => {
                let key = match frame {
                    ReferenceFrame::Ship => 7,
                    ReferenceFrame::EndEffector => 8,
                };
                format!(
                    "{} - Controlled: {} ({:.2},{:.2},{:.2}) [{:.2},{:.2},{:.2}]",
                    key, frame, t.x, t.y, t.z, r.x, r.y, r.z
                )
            }
        }
    }
}

bitflags! {
    /// Keys held during a frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u32 {
        const SELECT_1 = 1 << 0;
        const SELECT_2 = 1 << 1;
        const SELECT_3 = 1 << 2;
        const SELECT_4 = 1 << 3;
        const SELECT_5 = 1 << 4;
        const SELECT_6 = 1 << 5;
        const SELECT_7 = 1 << 6;
        const SELECT_8 = 1 << 7;

        /// I, along +Z. Also drives the direct command up.
        const FORWARD = 1 << 8;
        /// K
        const BACK = 1 << 9;
        /// L
        const RIGHT = 1 << 10;
        /// J
        const LEFT = 1 << 11;
        /// U
        const UP = 1 << 12;
        /// O
        const DOWN = 1 << 13;

        /// Arrow up
        const DIRECT_PLUS = 1 << 14;
        /// Arrow down
        const DIRECT_MINUS = 1 << 15;

        /// W, about +X
        const PITCH_PLUS = 1 << 16;
        /// S
        const PITCH_MINUS = 1 << 17;
        /// A, about +Z
        const ROLL_PLUS = 1 << 18;
        /// D
        const ROLL_MINUS = 1 << 19;
        /// E, about +Y
        const YAW_PLUS = 1 << 20;
        /// Q
        const YAW_MINUS = 1 << 21;

        const RESET = 1 << 22;
    }
}

/// Selection of mode and joint latched by the number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Direct(Joint),
    Pose(ReferenceFrame),
}

/// Turns held keys into a `ControlState`. The mode selection persists between calls,
/// the continuous commands are recomputed from scratch every call.
#[derive(Debug, Clone)]
pub struct InputMapper {
    speeds: InputSpeeds,
    selection: Selection,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(InputSpeeds::default())
    }
}

impl InputMapper {
    pub fn new(speeds: InputSpeeds) -> Self {
        InputMapper { speeds, selection: Selection::Direct(Joint::ShoulderYaw) }
    }

    pub fn update(&mut self, keys: Keys) -> ControlState {
        self.read_selection(keys);

        let s = &self.speeds;
        let axis = |plus: Keys, minus: Keys, speed: f64| {
            if keys.contains(plus) {
                speed
            } else if keys.contains(minus) {
                -speed
            } else {
                0.0
            }
        };

        let mut direct = axis(Keys::FORWARD, Keys::BACK, s.direct);
        if keys.intersects(Keys::DIRECT_PLUS | Keys::DIRECT_MINUS) {
            direct = axis(Keys::DIRECT_PLUS, Keys::DIRECT_MINUS, s.direct);
        }

        let translation = Vector3::new(
            axis(Keys::RIGHT, Keys::LEFT, s.translate),
            axis(Keys::UP, Keys::DOWN, s.translate),
            axis(Keys::FORWARD, Keys::BACK, s.translate),
        );
        let rotation = Vector3::new(
            axis(Keys::PITCH_PLUS, Keys::PITCH_MINUS, s.rotate),
            axis(Keys::YAW_PLUS, Keys::YAW_MINUS, s.rotate),
            axis(Keys::ROLL_PLUS, Keys::ROLL_MINUS, s.rotate),
        );

        let mode = match self.selection {
            Selection::Direct(joint) => Mode::Direct { joint: Some(joint), velocity: direct },
            Selection::Pose(frame) => Mode::Pose { frame, translation, rotation },
        };
        ControlState { mode, reset: keys.contains(Keys::RESET) }
    }

    fn read_selection(&mut self, keys: Keys) {
        const DIRECT: [(Keys, Joint); 6] = [
            (Keys::SELECT_1, Joint::ShoulderYaw),
            (Keys::SELECT_2, Joint::ShoulderPitch),
            (Keys::SELECT_3, Joint::ElbowPitch),
            (Keys::SELECT_4, Joint::WristPitch),
            (Keys::SELECT_5, Joint::WristYaw),
            (Keys::SELECT_6, Joint::WristRoll),
        ];
        if let Some((_, joint)) = DIRECT.iter().find(|(key, _)| keys.contains(*key)) {
            self.selection = Selection::Direct(*joint);
        } else if keys.contains(Keys::SELECT_7) {
            self.selection = Selection::Pose(ReferenceFrame::Ship);
        } else if keys.contains(Keys::SELECT_8) {
            self.selection = Selection::Pose(ReferenceFrame::EndEffector);
        }
    }
}
