//! Helper functions

use crate::kinematic_traits::{Joints, Pose};
use nalgebra::{Rotation3, UnitQuaternion, Vector3, Vector6};

/// Checks the joint values for validity.
pub(crate) mod arm_kinematics {
    use crate::kinematic_traits::Joints;

    /// Checks if all elements in the array are finite
    pub fn is_valid(qs: &Joints) -> bool {
        qs.iter().all(|&q| q.is_finite())
    }
}

/// Joint values as a single line, `[ 10.00 -45.00 ...]`.
pub fn format_joints(joints: &Joints) -> String {
    let mut row_str = String::new();
    for joint_idx in 0..6 {
        row_str.push_str(&format!("{:7.2} ", joints[joint_idx]));
    }
    format!("[{}]", row_str.trim_end())
}

pub fn dump_pose(isometry: &Pose) {
    let translation = isometry.translation.vector;
    let rotation: UnitQuaternion<f64> = isometry.rotation;

    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    );
}

/// Rotation from Euler angles in degrees. The rotation around Z is applied first,
/// then around X, then around Y.
pub fn euler_rotation(degrees: &Vector3<f64>) -> UnitQuaternion<f64> {
    let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), degrees.x.to_radians());
    let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), degrees.y.to_radians());
    let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), degrees.z.to_radians());
    ry * rx * rz
}

/// Rotation matrix of the pose.
pub fn rotation_matrix(pose: &Pose) -> Rotation3<f64> {
    pose.rotation.to_rotation_matrix()
}

/// Converts ```nalgebra::Vector6<f64>``` to Joints ([f64; 6])
pub fn vector6_to_joints(v: Vector6<f64>) -> Joints {
    [v[0], v[1], v[2], v[3], v[4], v[5]]
}

/// Converts ```Joints ([f64; 6])``` to a ```Vector6<f64>```
pub fn joints_to_vector6(j: Joints) -> Vector6<f64> {
    Vector6::new(j[0], j[1], j[2], j[3], j[4], j[5])
}

/// Compares two poses with the given tolerances, panics with both poses printed if they differ.
pub fn assert_pose_eq(ta: &Pose, tb: &Pose,
                      distance_tolerance: f64, angular_tolerance: f64) -> bool {
    fn bad(ta: &Pose, tb: &Pose) {
        dump_pose(ta);
        dump_pose(tb);
    }

    let translation_distance = (ta.translation.vector - tb.translation.vector).norm();
    let angular_distance = ta.rotation.angle_to(&tb.rotation);

    if translation_distance.abs() > distance_tolerance {
        bad(ta, tb);
        panic!("Poses have too different translations");
    }

    if angular_distance.abs() > angular_tolerance {
        bad(ta, tb);
        panic!("Poses have too different angles");
    }
    true
}

/// formatting of numbers for YAML output
pub(crate) fn number(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{}", x)
}

/// formatting of vectors for YAML output, `[x, y, z]`
pub(crate) fn vec3(v: &Vector3<f64>) -> String {
    format!("[{}, {}, {}]", number(v.x), number(v.y), number(v.z))
}
