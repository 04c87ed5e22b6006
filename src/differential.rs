//! Least squares solver turning a desired pose change into joint velocities

use nalgebra::SVD;
use tracing::warn;
use crate::jacobian::Jacobian;
use crate::kinematic_traits::{JacobianMatrix, Joints, PoseEncoding};
use crate::parameters::arm_kinematics::ControllerConfig;
use crate::utils::vector6_to_joints;

/// Solves `J * v = delta` for joint velocities `v` in the least squares sense.
///
/// The system has 12 equations and 6 unknowns and is generally inconsistent, so the
/// minimizer is returned rather than an exact solution. Near singular configurations the
/// result may be large: there is no damping, the actuator velocity scaling is the only bound.
#[derive(Debug, Clone, Copy)]
pub struct DifferentialController {
    /// Singular values below this are treated as zero (rank loss).
    tolerance: f64,
}

impl Default for DifferentialController {
    fn default() -> Self {
        Self::from_config(&ControllerConfig::default())
    }
}

impl DifferentialController {
    pub fn new(tolerance: f64) -> Self {
        DifferentialController { tolerance }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(config.singular_tolerance)
    }

    /// Joint velocities that best produce the given change of the pose encoding.
    /// Directions in which the Jacobian has lost rank get zero velocity (minimum norm).
    pub fn solve(&self, jacobian: &JacobianMatrix, delta: &PoseEncoding) -> Joints {
        // SVD does not converge on NaN
        if !jacobian.iter().chain(delta.iter()).all(|x| x.is_finite()) {
            warn!("Jacobian or pose change is not finite, holding the arm");
            return [0.0; 6];
        }

        let svd = SVD::new(*jacobian, true, true);

        let rank = svd.rank(self.tolerance);
        if rank < 6 {
            warn!(rank, "Jacobian has lost rank, solving for minimum norm velocities");
        }

        match svd.solve(delta, self.tolerance) {
            Ok(v) if v.iter().all(|x| x.is_finite()) => vector6_to_joints(v),
            Ok(_) => {
                warn!("least squares solution is not finite, holding the arm");
                [0.0; 6]
            }
            Err(e) => {
                // Only possible if U or V were not computed
                warn!(error = e, "least squares solve failed, holding the arm");
                [0.0; 6]
            }
        }
    }

    /// Same as `solve`, taking the Jacobian struct.
    pub fn velocities(&self, jacobian: &Jacobian, delta: &PoseEncoding) -> Joints {
        self.solve(jacobian.matrix(), delta)
    }
}
