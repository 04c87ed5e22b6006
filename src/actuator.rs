//! Rotary actuator of a single joint, with hard stops

use crate::constraints::Constraints;
use crate::parameters::arm_kinematics::JointParameters;

/// One rotary joint actuator. The angle is integrated from the commanded velocity and
/// pinned to the mechanical stops. Hitting a stop does not zero the velocity, so the joint
/// leaves the stop as soon as the command reverses.
#[derive(Debug, Clone)]
pub struct ActuatorModel {
    limits: Constraints,
    max_velocity: f64,

    /// Current angle, degrees. Always within the limits.
    angle: f64,

    /// Commanded velocity, degrees per second.
    velocity: f64,
}

impl ActuatorModel {
    pub fn new(limits: Constraints, max_velocity: f64) -> Self {
        ActuatorModel {
            limits,
            max_velocity,
            angle: limits.clamp(0.0),
            velocity: 0.0,
        }
    }

    pub fn from_parameters(parameters: &JointParameters) -> Self {
        Self::new(parameters.limits, parameters.max_velocity)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn limits(&self) -> &Constraints {
        &self.limits
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    /// Moves the joint to the given angle, clamped to the limits.
    /// Non-finite angles are ignored.
    pub fn set_angle(&mut self, angle: f64) {
        if angle.is_finite() {
            self.angle = self.limits.clamp(angle);
        }
    }

    /// Advances the angle by `velocity * dt`, stopping exactly at a limit if crossed.
    /// A non-finite step leaves the angle unchanged.
    pub fn integrate(&mut self, dt: f64) {
        let angle = self.angle + self.velocity * dt;
        if angle.is_finite() {
            self.angle = self.limits.clamp(angle);
        }
    }

    /// Zero angle and velocity. Limits and maximal velocity stay. If zero is outside
    /// the limits, the angle goes to the nearest limit instead.
    pub fn reset(&mut self) {
        self.angle = self.limits.clamp(0.0);
        self.velocity = 0.0;
    }

    /// True if the joint sits on (or beyond) one of its stops.
    pub fn is_at_limit(&self) -> bool {
        self.limits.at_limit(self.angle)
    }
}
