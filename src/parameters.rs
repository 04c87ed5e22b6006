//! Defines the arm geometry and controller parameter data structures

pub mod arm_kinematics {
    use nalgebra::{Unit, Vector3};
    use crate::constraints::Constraints;
    use crate::kinematic_traits::Joint;
    use crate::parameter_error::ParameterError;
    use crate::utils::{number, vec3};

    /// Fixed description of one rotary joint.
    #[derive(Debug, Clone, Copy)]
    pub struct JointParameters {
        /// Rotation axis in the frame of the parent joint.
        pub axis: Unit<Vector3<f64>>,

        /// Translation from the origin of the parent joint to the origin of this joint.
        pub offset: Vector3<f64>,

        /// Hard mechanical stops, degrees.
        pub limits: Constraints,

        /// Maximal angular velocity, degrees per second. Always positive.
        pub max_velocity: f64,
    }

    /// Parameters of the complete arm. See [parameters_robots.rs](parameters_robots.rs)
    /// for the reference arm.
    #[derive(Debug, Clone, Copy)]
    pub struct ArmParameters {
        /// Joints in chain order (index matches `Joint::index`).
        pub joints: [JointParameters; 6],

        /// Offset from the last joint to the end effector, applied without rotation.
        pub end_effector: Vector3<f64>,
    }

    impl ArmParameters {
        pub fn joint(&self, joint: Joint) -> &JointParameters {
            &self.joints[joint.index()]
        }

        /// Checks that all values are finite, limits are ordered and velocities are positive.
        pub fn validate(&self) -> Result<(), ParameterError> {
            for (joint, p) in Joint::ALL.iter().zip(self.joints.iter()) {
                let finite = p.axis.iter().chain(p.offset.iter()).all(|v| v.is_finite())
                    && p.limits.from.is_finite() && p.limits.to.is_finite();
                if !finite {
                    return Err(ParameterError::InvalidValue {
                        field: joint.name().to_string(),
                        reason: "all values must be finite".to_string(),
                    });
                }
                if !(p.max_velocity > 0.0 && p.max_velocity.is_finite()) {
                    return Err(ParameterError::InvalidValue {
                        field: format!("{}.max_velocity", joint.name()),
                        reason: format!("must be positive (got {})", p.max_velocity),
                    });
                }
            }
            if !self.end_effector.iter().all(|v| v.is_finite()) {
                return Err(ParameterError::InvalidValue {
                    field: "end_effector".to_string(),
                    reason: "all values must be finite".to_string(),
                });
            }
            Ok(())
        }

        /// Convert to string yaml representation (quick viewing, configuration files).
        pub fn to_yaml(&self) -> String {
            let mut out = String::from("arm:\n  joints:\n");
            for (joint, p) in Joint::ALL.iter().zip(self.joints.iter()) {
                out.push_str(&format!(
                    "    - name: {}\n      \
                    axis: {}\n      \
                    offset: {}\n      \
                    limits: [{}, {}]\n      \
                    max_velocity: {}\n",
                    joint.name(),
                    vec3(&p.axis),
                    vec3(&p.offset),
                    number(p.limits.from),
                    number(p.limits.to),
                    number(p.max_velocity),
                ));
            }
            out.push_str(&format!("  end_effector: {}\n", vec3(&self.end_effector)));
            out
        }
    }

    /// Tuning of the differential controller.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct ControllerConfig {
        /// Forward difference step for the Jacobian, degrees.
        pub jacobian_step: f64,

        /// Singular values of the Jacobian below this are treated as zero by the solver.
        pub singular_tolerance: f64,
    }

    impl Default for ControllerConfig {
        fn default() -> Self {
            ControllerConfig {
                jacobian_step: 1.0,
                singular_tolerance: 1e-9,
            }
        }
    }

    impl ControllerConfig {
        /// The Jacobian step must be positive and finite, the tolerance finite and not negative.
        pub fn validate(&self) -> Result<(), ParameterError> {
            if !(self.jacobian_step > 0.0 && self.jacobian_step.is_finite()) {
                return Err(ParameterError::InvalidValue {
                    field: "controller.jacobian_step".to_string(),
                    reason: format!("must be positive (got {})", self.jacobian_step),
                });
            }
            if !(self.singular_tolerance >= 0.0 && self.singular_tolerance.is_finite()) {
                return Err(ParameterError::InvalidValue {
                    field: "controller.singular_tolerance".to_string(),
                    reason: format!("must not be negative (got {})", self.singular_tolerance),
                });
            }
            Ok(())
        }
    }

    /// Magnitudes produced by the input mapper when a key is held.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct InputSpeeds {
        /// Direct joint command, degrees per second.
        pub direct: f64,

        /// Translation command, length units per second.
        pub translate: f64,

        /// Rotation command, degrees per second.
        pub rotate: f64,
    }

    impl Default for InputSpeeds {
        fn default() -> Self {
            InputSpeeds {
                direct: 30.0,
                translate: 1.0,
                rotate: 10.0,
            }
        }
    }
}
