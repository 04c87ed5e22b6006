//! Hardcoded parameters for the reference arm

pub mod arm_kinematics {
    use nalgebra::{Unit, Vector3};
    use crate::constraints::Constraints;
    use crate::parameters::arm_kinematics::{ArmParameters, JointParameters};

    impl JointParameters {
        pub fn new(axis: Vector3<f64>, offset: Vector3<f64>, from: f64, to: f64, max_velocity: f64) -> Self {
            JointParameters {
                axis: Unit::new_normalize(axis),
                offset,
                limits: Constraints::new(from, to),
                max_velocity,
            }
        }
    }

    impl Default for ArmParameters {
        fn default() -> Self {
            Self::default_arm()
        }
    }

    impl ArmParameters {
        /// The reference arm: yaw at the base, three parallel pitch joints, then wrist yaw and roll.
        /// Links extend along Z with the arm at zero. Lengths are in scene units.
        pub fn default_arm() -> Self {
            ArmParameters {
                joints: [
                    // Shoulder yaw
                    JointParameters::new(Vector3::y(), Vector3::zeros(), -90.0, 90.0, 10.0),
                    // Shoulder pitch
                    JointParameters::new(Vector3::x(), Vector3::new(0.0, 0.467, 0.0), -180.0, 0.0, 10.0),
                    // Elbow pitch
                    JointParameters::new(Vector3::x(), Vector3::new(0.0, 0.0, 6.943), 0.0, 150.0, 10.0),
                    // Wrist pitch
                    JointParameters::new(Vector3::x(), Vector3::new(0.0, 0.0, 7.63), -100.0, 100.0, 20.0),
                    // Wrist yaw
                    JointParameters::new(Vector3::y(), Vector3::new(0.0, 0.0, 1.174), -90.0, 90.0, 20.0),
                    // Wrist roll
                    JointParameters::new(Vector3::z(), Vector3::new(0.0, 0.0, 1.196), -180.0, 180.0, 20.0),
                ],
                end_effector: Vector3::new(0.0, 0.0, 0.546),
            }
        }
    }
}
