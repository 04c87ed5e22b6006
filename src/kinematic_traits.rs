//! Core types and the forward kinematics trait

extern crate nalgebra as na;

use std::fmt;
use na::{Isometry3, SMatrix, SVector};

/// Pose is used as a pose of the end effector. It contains both Cartesian position and rotation
/// quaternion. The pose is always rigid (no scale or shear).
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(0.0, 0.467, 17.489);
/// let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 30_f64.to_radians());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Six joint values in fixed joint order (shoulder yaw first, wrist roll last).
/// Depending on the context these are angles (degrees) or velocities (degrees per second).
pub type Joints = [f64; 6];

/// Joint values, all zero. The reference arm stretches straight along its Z axis in this pose.
pub const JOINTS_AT_ZERO: Joints = [0.0; 6];

/// The pose flattened into 12 numbers: the nine rotation matrix entries row by row,
/// followed by the translation.
pub type PoseEncoding = SVector<f64, 12>;

/// Partial derivatives of the pose encoding by each joint angle (one column per joint).
pub type JacobianMatrix = SMatrix<f64, 12, 6>;

/// Rotary joints of the arm, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    ShoulderYaw,
    ShoulderPitch,
    ElbowPitch,
    WristPitch,
    WristYaw,
    WristRoll,
}

impl Joint {
    /// All joints, from the base to the wrist.
    pub const ALL: [Joint; 6] = [
        Joint::ShoulderYaw,
        Joint::ShoulderPitch,
        Joint::ElbowPitch,
        Joint::WristPitch,
        Joint::WristYaw,
        Joint::WristRoll,
    ];

    /// Position of this joint in the chain and in any `Joints` array.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Joint> {
        Self::ALL.get(index).copied()
    }

    /// Snake case name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Joint::ShoulderYaw => "shoulder_yaw",
            Joint::ShoulderPitch => "shoulder_pitch",
            Joint::ElbowPitch => "elbow_pitch",
            Joint::WristPitch => "wrist_pitch",
            Joint::WristYaw => "wrist_yaw",
            Joint::WristRoll => "wrist_roll",
        }
    }

    pub fn from_name(name: &str) -> Option<Joint> {
        Self::ALL.iter().copied().find(|j| j.name() == name)
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Joint::ShoulderYaw => "Shoulder Yaw",
            Joint::ShoulderPitch => "Shoulder Pitch",
            Joint::ElbowPitch => "Elbow Pitch",
            Joint::WristPitch => "Wrist Pitch",
            Joint::WristYaw => "Wrist Yaw",
            Joint::WristRoll => "Wrist Roll",
        };
        f.write_str(label)
    }
}

pub trait Kinematics: Sync {
    /// Find the pose of the end effector for the given joint angles (degrees).
    fn forward(&self, qs: &Joints) -> Pose;

    /// Computes the frames of all six joints, followed by the frame of the end effector.
    /// The last entry always equals what `forward` returns.
    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 7];
}
