//! The six actuators of the arm, with velocity scaling that preserves the direction of motion

use tracing::{debug, warn};
use crate::actuator::ActuatorModel;
use crate::kinematic_traits::{Joint, Joints};
use crate::parameters::arm_kinematics::ArmParameters;
use crate::utils::arm_kinematics::is_valid;

/// Owns one actuator per joint.
///
/// Velocity commands are stored raw and then scaled uniformly: if any joint would exceed its
/// maximal velocity, all joints are slowed down by the same factor. The relative proportions
/// between joints survive, so a coordinated motion keeps its direction while saturated.
#[derive(Debug, Clone)]
pub struct ActuatorBank {
    actuators: [ActuatorModel; 6],

    /// Last raw commands, before scaling.
    commanded: Joints,
}

impl ActuatorBank {
    pub fn new(parameters: &ArmParameters) -> Self {
        ActuatorBank {
            actuators: std::array::from_fn(|i| ActuatorModel::from_parameters(&parameters.joints[i])),
            commanded: [0.0; 6],
        }
    }

    pub fn actuator(&self, joint: Joint) -> &ActuatorModel {
        &self.actuators[joint.index()]
    }

    /// Sets the raw command of a single joint, keeping the raw commands of the others,
    /// then rescales all.
    pub fn set_velocity(&mut self, joint: Joint, velocity: f64) {
        self.commanded[joint.index()] = velocity;
        self.apply_scaled();
    }

    /// Sets the raw commands of all joints, then rescales.
    pub fn set_velocities(&mut self, velocities: Joints) {
        self.commanded = velocities;
        self.apply_scaled();
    }

    /// Sets the raw commands of the leading joints only. Joints past the end of the slice keep
    /// their previous raw command, values past the sixth are ignored.
    pub fn set_velocities_prefix(&mut self, velocities: &[f64]) {
        if velocities.len() != 6 {
            warn!(len = velocities.len(), "velocity vector does not cover all six joints");
        }
        for (slot, v) in self.commanded.iter_mut().zip(velocities.iter()) {
            *slot = *v;
        }
        self.apply_scaled();
    }

    /// Last raw commands, before scaling.
    pub fn commanded(&self) -> Joints {
        self.commanded
    }

    /// Velocities the actuators actually run with, after scaling.
    pub fn velocities(&self) -> Joints {
        std::array::from_fn(|i| self.actuators[i].velocity())
    }

    /// Current angles in joint order, degrees.
    pub fn angles(&self) -> Joints {
        std::array::from_fn(|i| self.actuators[i].angle())
    }

    /// Moves all joints to the given angles, each clamped to its limits. Velocities stay.
    pub fn set_angles(&mut self, angles: Joints) {
        for (actuator, angle) in self.actuators.iter_mut().zip(angles) {
            actuator.set_angle(angle);
        }
    }

    /// Advances all actuators by `dt` seconds. A non-finite `dt` is ignored.
    pub fn integrate(&mut self, dt: f64) {
        if !dt.is_finite() {
            warn!(dt, "time step is not finite, skipping integration");
            return;
        }
        for actuator in self.actuators.iter_mut() {
            actuator.integrate(dt);
        }
    }

    /// Zero all commands, velocities and angles.
    pub fn reset(&mut self) {
        debug!("resetting actuators");
        self.commanded = [0.0; 6];
        for actuator in self.actuators.iter_mut() {
            actuator.reset();
        }
    }

    /// Joints currently sitting on one of their stops.
    pub fn limited_joints(&self) -> Vec<Joint> {
        Joint::ALL
            .iter()
            .copied()
            .filter(|j| self.actuators[j.index()].is_at_limit())
            .collect()
    }

    /// The largest ratio of commanded to maximal velocity over all joints.
    fn saturation(&self) -> f64 {
        self.commanded
            .iter()
            .zip(self.actuators.iter())
            .map(|(v, a)| v.abs() / a.max_velocity())
            .fold(0.0, f64::max)
    }

    fn apply_scaled(&mut self) {
        if !is_valid(&self.commanded) {
            warn!(commanded = ?self.commanded, "non finite velocity command, holding the arm");
            self.commanded = [0.0; 6];
        }
        let factor = self.saturation();
        let divisor = if factor > 1.0 {
            debug!(factor, "velocity command saturated, scaling down");
            factor
        } else {
            1.0
        };
        for (actuator, v) in self.actuators.iter_mut().zip(self.commanded) {
            actuator.set_velocity(v / divisor);
        }
    }
}
