use bevy::prelude::*;

use super::{
    kinematics::{BonePose, IkConfig},
    motion::{JointVec, Motion, Posture, loader::MotionLoader},
    skeleton::{Axis, Bone, DofFlags, Skeleton, loader::SkeletonLoader},
};

/// Adds skeletal motion assets and kinematics support to an app.
///
/// Registers the skeleton and motion assets with their loaders and the
/// [`IkConfig`] resource. No systems are added: forward and inverse
/// kinematics are ordinary blocking calls driven by the caller.
#[derive(Default)]
pub struct MocapKinematicsPlugin;

impl Plugin for MocapKinematicsPlugin {
    fn build(&self, app: &mut App) {
        app //
            .init_asset::<Skeleton>()
            .init_asset_loader::<SkeletonLoader>()
            .init_asset::<Motion>()
            .init_asset_loader::<MotionLoader>()
            .init_resource::<IkConfig>()
            .register_type::<Skeleton>()
            .register_type::<Bone>()
            .register_type::<Axis>()
            .register_type::<DofFlags>()
            .register_type::<Motion>()
            .register_type::<Posture>()
            .register_type::<JointVec>()
            .register_type::<BonePose>()
            .register_type::<IkConfig>();
    }
}
