//! Rust implementation of forward kinematics and differential velocity control for a simulated
//! six-joint serial arm (shoulder yaw, shoulder pitch, elbow pitch, wrist pitch, wrist yaw and
//! wrist roll).
//!
//! The arm is driven either joint by joint, or by asking the end effector to move with a given
//! translation and rotation rate. In the latter case a numerical Jacobian of the end effector
//! pose is computed at every tick and solved in the least squares sense for joint velocities.
//!
//! # Features
//!
//! - Forward kinematics of a serial chain with arbitrary fixed joint axes and offsets,
//!   including the frames of all intermediate joints for rendering.
//! - Numerical (forward difference) Jacobian of a pose encoding that has no singular
//!   parameterization: the rotation matrix rows followed by the translation.
//! - Least squares velocity solver that tolerates rank loss.
//! - Actuators with hard mechanical stops and uniform velocity scaling: a saturated
//!   coordinated motion slows down but keeps its direction.
//! - Motion in the base ("ship") frame or in the frame of the end effector.
//! - Key set to control state mapping, for hosts that read a keyboard.
//! - Arm geometry and controller tuning from YAML.
//!
//! All angles are in degrees and all angular velocities in degrees per second.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector3;
//! use rs_arm_kinematics::arm::ArmController;
//! use rs_arm_kinematics::controls::{ControlState, ReferenceFrame};
//! use rs_arm_kinematics::parameters::arm_kinematics::ArmParameters;
//!
//! let mut arm = ArmController::new(ArmParameters::default_arm()).unwrap();
//! arm.actuators_mut().set_angles([20.0, -45.0, 90.0, -30.0, 20.0, 10.0]);
//!
//! // Move the end effector along the X axis of the base
//! let control = ControlState::pose(ReferenceFrame::Ship, Vector3::x(), Vector3::zeros());
//! for _ in 0..10 {
//!     let output = arm.tick(0.02, &control);
//!     println!("{:?}", output.pose.translation);
//! }
//! ```

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

pub mod parameter_error;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod constraints;

pub mod jacobian;

pub mod differential;

pub mod actuator;

pub mod actuator_bank;

pub mod controls;

pub mod arm;

#[cfg(test)]
mod tests;
