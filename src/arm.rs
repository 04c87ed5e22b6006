//! The per-tick controller of the arm.
//!
//! ```
//! use rs_arm_kinematics::arm::ArmController;
//! use rs_arm_kinematics::controls::ControlState;
//! use rs_arm_kinematics::kinematic_traits::Joint;
//! use rs_arm_kinematics::parameters::arm_kinematics::ArmParameters;
//!
//! let mut arm = ArmController::new(ArmParameters::default_arm()).unwrap();
//! let output = arm.tick(0.5, &ControlState::direct(Joint::WristRoll, 20.0));
//! assert_eq!(output.angles[5], 10.0);
//! ```

use std::mem::{discriminant, Discriminant};
use nalgebra::{Translation3, Vector3};
use tracing::{debug, trace};
use crate::actuator_bank::ActuatorBank;
use crate::controls::{ControlState, Mode, ReferenceFrame};
use crate::differential::DifferentialController;
use crate::jacobian::{encode_pose, Jacobian};
use crate::kinematic_traits::{Joints, Kinematics, Pose};
use crate::kinematics_impl::KinematicChain;
use crate::parameter_error::ParameterError;
use crate::parameters::arm_kinematics::{ArmParameters, ControllerConfig};
use crate::utils::euler_rotation;

/// What the arm looks like after a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickOutput {
    /// Joint angles, degrees
    pub angles: Joints,
    /// End effector pose in the arm base frame
    pub pose: Pose,
    /// Frames of the six joints, then of the end effector, in the arm base frame
    pub frames: [Pose; 7],
}

/// Owns the actuators and the kinematic chain and advances them once per tick.
#[derive(Debug, Clone)]
pub struct ArmController {
    chain: KinematicChain,
    actuators: ActuatorBank,
    solver: DifferentialController,
    config: ControllerConfig,
    last_mode: Option<Discriminant<Mode>>,
}

impl ArmController {
    pub fn new(parameters: ArmParameters) -> Result<Self, ParameterError> {
        Self::with_config(parameters, ControllerConfig::default())
    }

    /// Fails if the arm or the controller configuration does not validate.
    pub fn with_config(parameters: ArmParameters, config: ControllerConfig) -> Result<Self, ParameterError> {
        parameters.validate()?;
        config.validate()?;
        Ok(ArmController {
            actuators: ActuatorBank::new(&parameters),
            chain: KinematicChain::new(parameters),
            solver: DifferentialController::from_config(&config),
            config,
            last_mode: None,
        })
    }

    pub fn chain(&self) -> &KinematicChain {
        &self.chain
    }

    pub fn actuators(&self) -> &ActuatorBank {
        &self.actuators
    }

    pub fn actuators_mut(&mut self) -> &mut ActuatorBank {
        &mut self.actuators
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Runs one control step of `dt` seconds.
    ///
    /// A reset zeroes the actuators and skips everything else. Otherwise the commanded
    /// velocities are computed from the angles at the start of the tick, and the actuators
    /// are integrated over `dt`.
    pub fn tick(&mut self, dt: f64, control: &ControlState) -> TickOutput {
        if control.reset {
            debug!("reset requested");
            self.actuators.reset();
            return self.output();
        }

        let mode = discriminant(&control.mode);
        if self.last_mode != Some(mode) {
            debug!(mode = ?control.mode, "control mode changed");
            self.last_mode = Some(mode);
        }

        let angles = self.actuators.angles();
        let current = self.chain.forward(&angles);

        match control.mode {
            Mode::Direct { joint, velocity } => {
                let mut velocities = [0.0; 6];
                if let Some(joint) = joint {
                    velocities[joint.index()] = velocity;
                }
                self.actuators.set_velocities(velocities);
            }
            Mode::Pose { frame, translation, rotation } => {
                let desired = desired_pose(&current, frame, &translation, &rotation);
                let velocities = self.velocities_towards(&angles, &current, &desired);
                self.actuators.set_velocities(velocities);
            }
        }

        self.actuators.integrate(dt);

        let output = self.output();
        trace!(angles = ?output.angles, "tick");
        output
    }

    /// Joint velocities that move the end effector from `current` towards `desired`,
    /// both given for the joint angles `angles`.
    pub fn velocities_towards(&self, angles: &Joints, current: &Pose, desired: &Pose) -> Joints {
        let jacobian = Jacobian::new(&self.chain, angles, self.config.jacobian_step);
        let delta = encode_pose(desired) - encode_pose(current);
        self.solver.velocities(&jacobian, &delta)
    }

    /// Current state, without advancing anything.
    pub fn output(&self) -> TickOutput {
        let angles = self.actuators.angles();
        let frames = self.chain.forward_with_joint_poses(&angles);
        TickOutput { angles, pose: frames[6], frames }
    }
}

/// The pose the end effector is asked to reach: the current pose moved by the commanded
/// translation and rotation (Euler degrees), interpreted in the given frame.
pub fn desired_pose(current: &Pose, frame: ReferenceFrame,
                    translation: &Vector3<f64>, rotation: &Vector3<f64>) -> Pose {
    let delta_rotation = euler_rotation(rotation);
    match frame {
        ReferenceFrame::EndEffector => {
            current * Pose::from_parts(Translation3::from(*translation), delta_rotation)
        }
        ReferenceFrame::Ship => Pose::from_parts(
            Translation3::from(translation + current.translation.vector),
            delta_rotation * current.rotation,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematic_traits::Joint;
    use crate::parameters::arm_kinematics::JointParameters;
    use crate::utils::assert_pose_eq;

    const NON_SINGULAR: Joints = [20.0, -45.0, 90.0, -30.0, 20.0, 10.0];

    #[test]
    fn test_direct_mode_moves_selected_joint_only() {
        let mut arm = ArmController::new(ArmParameters::default_arm()).unwrap();
        let output = arm.tick(1.0, &ControlState::direct(Joint::WristPitch, 15.0));
        assert_eq!(output.angles, [0.0, 0.0, 0.0, 15.0, 0.0, 0.0]);
        assert_pose_eq(&output.pose, &arm.chain().forward(&output.angles), 1e-12, 1e-6);
    }

    #[test]
    fn test_direct_mode_without_joint_holds() {
        let mut arm = ArmController::new(ArmParameters::default_arm()).unwrap();
        arm.tick(1.0, &ControlState::direct(Joint::ShoulderYaw, 10.0));
        let control = ControlState { mode: Mode::Direct { joint: None, velocity: 30.0 }, reset: false };
        let output = arm.tick(1.0, &control);
        assert_eq!(output.angles, [10.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mode_switch_takes_effect_immediately() {
        let mut arm = ArmController::new(ArmParameters::default_arm()).unwrap();
        arm.tick(1.0, &ControlState::direct(Joint::ShoulderYaw, 10.0));
        let output = arm.tick(1.0, &ControlState::direct(Joint::WristRoll, 10.0));
        // Selecting another joint stops the previous one
        assert_eq!(output.angles, [10.0, 0.0, 0.0, 0.0, 0.0, 10.0]);
    }

    #[test]
    fn test_reset_skips_tick() {
        let mut arm = ArmController::new(ArmParameters::default_arm()).unwrap();
        arm.tick(1.0, &ControlState::direct(Joint::ShoulderYaw, 10.0));
        let mut control = ControlState::direct(Joint::ShoulderYaw, 10.0);
        control.reset = true;
        let output = arm.tick(1.0, &control);
        assert_eq!(output.angles, [0.0; 6]);
        assert_eq!(arm.actuators().velocities(), [0.0; 6]);
    }

    #[test]
    fn test_desired_pose_ship_frame() {
        let current = Pose::from_parts(
            Translation3::new(1.0, 2.0, 3.0),
            euler_rotation(&Vector3::new(0.0, 90.0, 0.0)),
        );
        let desired = desired_pose(&current, ReferenceFrame::Ship,
                                   &Vector3::new(1.0, 0.0, 0.0), &Vector3::new(0.0, 0.0, 0.0));
        // Translation applied in the base frame, not along the rotated X
        assert!((desired.translation.vector - Vector3::new(2.0, 2.0, 3.0)).norm() < 1e-12);
        assert!(desired.rotation.angle_to(&current.rotation) < 1e-9);
    }

    #[test]
    fn test_desired_pose_end_effector_frame() {
        let current = Pose::from_parts(
            Translation3::new(1.0, 2.0, 3.0),
            euler_rotation(&Vector3::new(0.0, 90.0, 0.0)),
        );
        let desired = desired_pose(&current, ReferenceFrame::EndEffector,
                                   &Vector3::new(1.0, 0.0, 0.0), &Vector3::new(0.0, 0.0, 0.0));
        // Local X of the end effector points along -Z of the base
        assert!((desired.translation.vector - Vector3::new(1.0, 2.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn test_pose_mode_approaches_target() {
        let mut arm = ArmController::new(ArmParameters::default_arm()).unwrap();
        arm.actuators_mut().set_angles(NON_SINGULAR);
        let before = arm.output().pose;
        let target = before.translation.vector + Vector3::new(1.0, 0.0, 0.0);

        let control = ControlState::pose(ReferenceFrame::Ship, Vector3::new(1.0, 0.0, 0.0), Vector3::zeros());
        let after = arm.tick(0.05, &control).pose;

        let distance_before = (target - before.translation.vector).norm();
        let distance_after = (target - after.translation.vector).norm();
        assert!(distance_after < distance_before, "{} >= {}", distance_after, distance_before);
        // Orientation is held
        assert!(after.rotation.angle_to(&before.rotation) < 1e-2);
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        let config = ControllerConfig { jacobian_step: 0.0, ..Default::default() };
        assert!(matches!(
            ArmController::with_config(ArmParameters::default_arm(), config),
            Err(ParameterError::InvalidValue { .. })
        ));

        let config = ControllerConfig { singular_tolerance: f64::NAN, ..Default::default() };
        assert!(ArmController::with_config(ArmParameters::default_arm(), config).is_err());

        let mut parameters = ArmParameters::default_arm();
        parameters.joints[2] = JointParameters::new(Vector3::zeros(), Vector3::z(), 0.0, 150.0, 10.0);
        assert!(ArmController::new(parameters).is_err());
    }

    #[test]
    fn test_non_finite_time_step_returns() {
        let mut arm = ArmController::new(ArmParameters::default_arm()).unwrap();
        arm.actuators_mut().set_angles(NON_SINGULAR);
        let control = ControlState::pose(ReferenceFrame::Ship, Vector3::x(), Vector3::zeros());

        let output = arm.tick(f64::NAN, &control);
        assert_eq!(output.angles, NON_SINGULAR);
        let output = arm.tick(f64::INFINITY, &control);
        assert_eq!(output.angles, NON_SINGULAR);

        // Still moves on a regular tick afterwards
        let output = arm.tick(0.05, &control);
        assert!(output.angles.iter().all(|a| a.is_finite()));
        assert_ne!(output.angles, NON_SINGULAR);
    }

    #[test]
    fn test_pose_mode_without_command_holds() {
        let mut arm = ArmController::new(ArmParameters::default_arm()).unwrap();
        arm.actuators_mut().set_angles(NON_SINGULAR);
        let control = ControlState::pose(ReferenceFrame::EndEffector, Vector3::zeros(), Vector3::zeros());
        let output = arm.tick(0.1, &control);
        for (a, b) in output.angles.iter().zip(NON_SINGULAR) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
