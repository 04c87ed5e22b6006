//! Numerical Jacobian of the encoded end effector pose by the joint angles

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use crate::kinematic_traits::{JacobianMatrix, Joint, Joints, Pose, PoseEncoding};
use crate::kinematics_impl::KinematicChain;
use crate::utils::rotation_matrix;

/// Struct representing the Jacobian matrix
pub struct Jacobian {
    /// A 12x6 matrix representing the Jacobian
    ///
    /// Each column corresponds to a joint, and each row corresponds to one element of the
    /// pose encoding (nine rotation matrix entries, then three translation components).
    /// Units are encoding units per degree.
    matrix: JacobianMatrix,

    /// The disturbance value used for computing the Jacobian, degrees
    step: f64,
}

impl Jacobian {
    /// Constructs a new Jacobian struct by computing the Jacobian matrix of the default
    /// pose encoding (see `encode_pose`) for the given chain and joint configuration
    ///
    /// # Arguments
    ///
    /// * `chain` - the kinematic chain of the arm
    /// * `qs` - joint angles, degrees
    /// * `step` - forward difference step, degrees
    pub fn new(chain: &KinematicChain, qs: &Joints, step: f64) -> Self {
        let matrix = compute_jacobian(chain, qs, encode_pose, step);
        Self { matrix, step }
    }

    pub fn matrix(&self) -> &JacobianMatrix {
        &self.matrix
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Flattens the pose into 12 numbers: rotation matrix rows, then translation.
/// Unlike quaternions or Euler angles, this encoding has no singular or double-covered
/// points, so small pose changes always produce small encoding changes.
pub fn encode_pose(pose: &Pose) -> PoseEncoding {
    let r = rotation_matrix(pose);
    let r = r.matrix();
    let t = &pose.translation.vector;
    PoseEncoding::from_column_slice(&[
        r[(0, 0)], r[(0, 1)], r[(0, 2)],
        r[(1, 0)], r[(1, 1)], r[(1, 2)],
        r[(2, 0)], r[(2, 1)], r[(2, 2)],
        t.x, t.y, t.z,
    ])
}

/// Function to compute the Jacobian matrix for a given chain and joint configuration
///
/// # Arguments
///
/// * `chain` - the kinematic chain of the arm
/// * `qs` - joint angles, degrees
/// * `encode` - converts a pose into the vector being differentiated
/// * `step` - forward difference step, degrees
///
/// # Returns
///
/// A 12x6 matrix. Column `j` is `(encode(perturbed) - encode(baseline)) / step` where only
/// joint `j` is advanced by `step`. This is a first order approximation, its error grows
/// with the step.
pub fn compute_jacobian<F>(chain: &KinematicChain, qs: &Joints, encode: F, step: f64) -> JacobianMatrix
where
    F: Fn(&Pose) -> PoseEncoding + Sync,
{
    let locals = chain.local_transforms(qs);
    let baseline = encode(&chain.compose(&locals));

    let column = |j: usize| {
        let mut perturbed = locals;
        perturbed[j] = chain.joint_transform(Joint::ALL[j], qs[j] + step);
        (encode(&chain.compose(&perturbed)) - baseline) / step
    };

    #[cfg(feature = "parallel")]
    let columns: Vec<PoseEncoding> = (0..6).into_par_iter().map(column).collect();
    #[cfg(not(feature = "parallel"))]
    let columns: Vec<PoseEncoding> = (0..6).map(column).collect();

    let mut jacobian = JacobianMatrix::zeros();
    for (j, c) in columns.iter().enumerate() {
        jacobian.set_column(j, c);
    }
    jacobian
}
