use nalgebra::{UnitQuaternion, Vector3};
use crate::kinematic_traits::{Joint, Joints, Kinematics, Pose, JOINTS_AT_ZERO};
use crate::kinematics_impl::KinematicChain;
use crate::parameters::arm_kinematics::ArmParameters;
use crate::utils::assert_pose_eq;

const SMALL: f64 = 1e-9;

fn chain() -> KinematicChain {
    KinematicChain::new(ArmParameters::default_arm())
}

#[test]
fn test_forward_kinematics_at_zero() {
    let chain = chain();
    let poses = chain.forward_with_joint_poses(&JOINTS_AT_ZERO);

    // Accumulated offsets, all frames unrotated
    let expected_positions = [
        (0.0, 0.0, 0.0),
        (0.0, 0.467, 0.0),
        (0.0, 0.467, 6.943),
        (0.0, 0.467, 14.573),
        (0.0, 0.467, 15.747),
        (0.0, 0.467, 16.943),
        (0.0, 0.467, 17.489),
    ];

    for (i, (pose, (x, y, z))) in poses.iter().zip(expected_positions).enumerate() {
        let t = pose.translation.vector;
        assert!((t - Vector3::new(x, y, z)).norm() < SMALL, "frame {}: {:?}", i, t);
        assert!(pose.rotation.angle() < SMALL, "frame {} is rotated", i);
    }

    let tcp = chain.forward(&JOINTS_AT_ZERO);
    assert_pose_eq(&tcp, &poses[6], SMALL, 1e-6);
}

/// Rotating a single joint must give the same end effector as rotating the unmoved
/// downstream part of the arm about that joint.
#[test]
fn test_single_joint_rotation_matches_rotated_subchain() {
    let chain = chain();
    let zero = chain.forward_with_joint_poses(&JOINTS_AT_ZERO);
    let tcp_at_zero = zero[6];

    for joint in Joint::ALL {
        for theta in [-35.0, 12.5, 60.0] {
            let mut qs: Joints = JOINTS_AT_ZERO;
            qs[joint.index()] = theta;
            let moved = chain.forward(&qs);

            // Frame of the joint itself is not affected by its own angle
            let joint_frame = zero[joint.index()];
            let axis = chain.parameters().joint(joint).axis;
            let rotation = Pose::from_parts(
                nalgebra::Translation3::identity(),
                UnitQuaternion::from_axis_angle(&axis, theta.to_radians()),
            );
            let expected = joint_frame * rotation * joint_frame.inverse() * tcp_at_zero;

            assert_pose_eq(&moved, &expected, 1e-9, 1e-6);
        }
    }
}

#[test]
fn test_elbow_folds_forearm() {
    let chain = chain();
    let qs = [0.0, 0.0, 90.0, 0.0, 0.0, 0.0];
    let poses = chain.forward_with_joint_poses(&qs);

    // Rotation about +X by 90 degrees turns +Z into -Y
    let forearm = 7.63 + 1.174 + 1.196 + 0.546;
    let expected = Vector3::new(0.0, 0.467 - forearm, 6.943);
    assert!((poses[6].translation.vector - expected).norm() < SMALL, "{:?}", poses[6].translation);

    // Elbow and everything before it stays
    assert!((poses[2].translation.vector - Vector3::new(0.0, 0.467, 6.943)).norm() < SMALL);
}

#[test]
fn test_wrist_roll_does_not_move_tip() {
    let chain = chain();
    let base = [10.0, -60.0, 70.0, 25.0, -15.0, 0.0];
    let mut rolled = base;
    rolled[5] = 120.0;

    let a = chain.forward(&base);
    let b = chain.forward(&rolled);
    assert!((a.translation.vector - b.translation.vector).norm() < SMALL);
    assert!((a.rotation.angle_to(&b.rotation) - 120_f64.to_radians()).abs() < 1e-9);
}
