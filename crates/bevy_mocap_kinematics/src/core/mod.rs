pub mod errors;
pub mod kinematics;
pub mod math;
pub mod motion;
pub mod plugin;
pub mod skeleton;

pub mod prelude {
    pub use super::errors::{AmcError, AssetLoaderError, KinematicsError, SkeletonError};
    pub use super::kinematics::{BonePose, IkConfig, IkStep, compute_pose, step_ik};
    pub use super::motion::{JointVec, Motion, Posture, loader::MotionLoader};
    pub use super::plugin::MocapKinematicsPlugin;
    pub use super::skeleton::{
        Axis, Bone, BoneSpec, DofFlags, Skeleton, loader::SkeletonLoader, serial::SkeletonSerial,
    };
}
