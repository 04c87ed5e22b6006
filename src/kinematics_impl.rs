use crate::kinematic_traits::{Joint, Joints, Kinematics, Pose};
use crate::parameters::arm_kinematics::ArmParameters;
use nalgebra::{Translation3, UnitQuaternion};

/// Forward kinematics of a serial chain of six rotary joints. Each joint translates by its
/// fixed offset in the frame of its parent, then rotates by its angle about its fixed axis.
/// The end effector is offset from the last joint without rotation.
///
/// The chain does not keep the angles. Poses are pure functions of the angles passed in.
#[derive(Debug, Clone)]
pub struct KinematicChain {
    parameters: ArmParameters,
}

impl KinematicChain {
    /// Creates a new `KinematicChain` instance with the given parameters.
    pub fn new(parameters: ArmParameters) -> Self {
        KinematicChain { parameters }
    }

    pub fn parameters(&self) -> &ArmParameters {
        &self.parameters
    }

    /// Transform of the joint relative to its parent, with the joint at the given angle (degrees).
    pub fn joint_transform(&self, joint: Joint, angle: f64) -> Pose {
        let p = self.parameters.joint(joint);
        Pose::from_parts(
            Translation3::from(p.offset),
            UnitQuaternion::from_axis_angle(&p.axis, angle.to_radians()),
        )
    }

    /// Transform from the last joint to the end effector.
    pub fn end_effector_transform(&self) -> Pose {
        Pose::from_parts(
            Translation3::from(self.parameters.end_effector),
            UnitQuaternion::identity(),
        )
    }

    /// Local transforms of all joints, in chain order.
    pub fn local_transforms(&self, qs: &Joints) -> [Pose; 6] {
        std::array::from_fn(|i| self.joint_transform(Joint::ALL[i], qs[i]))
    }

    /// End effector pose for the given joint angles. Same as `forward`.
    pub fn compute_pose(&self, qs: &Joints) -> Pose {
        self.compose(&self.local_transforms(qs))
    }

    /// End effector pose with the local transforms already known.
    pub(crate) fn compose(&self, locals: &[Pose; 6]) -> Pose {
        locals.iter().fold(Pose::identity(), |acc, local| acc * local) * self.end_effector_transform()
    }

    /// Frames of the six joints and the end effector in the world, for rendering debug axes.
    /// The `world` transform places the arm base in the world.
    pub fn debug_frames(&self, qs: &Joints, world: &Pose) -> [Pose; 7] {
        self.forward_with_joint_poses(qs).map(|frame| world * frame)
    }
}

impl Kinematics for KinematicChain {
    fn forward(&self, qs: &Joints) -> Pose {
        self.compute_pose(qs)
    }

    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 7] {
        let mut poses = [Pose::identity(); 7];
        let mut location = Pose::identity();
        for (i, local) in self.local_transforms(qs).iter().enumerate() {
            location = location * local;
            poses[i] = location;
        }
        poses[6] = location * self.end_effector_transform();
        poses
    }
}
