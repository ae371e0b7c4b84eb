//! Forward kinematics: joint angles to world-space bone placements.

use super::pose::BonePose;
use crate::core::{
    math::rotation_xyz_degrees,
    motion::Motion,
    skeleton::Skeleton,
};

/// Evaluate the world-space pose of every bone for one motion frame.
///
/// A pure function of its inputs: the output array is index-addressed by bone
/// (not traversal order), freshly allocated per call, and nothing is mutated.
/// The packed joint-vector cache is the read path. An out-of-range
/// `frame_idx` panics; a zero-bone skeleton yields an empty array.
pub fn compute_pose(skeleton: &Skeleton, motion: &Motion, frame_idx: usize) -> Vec<BonePose> {
    let mut poses = vec![BonePose::IDENTITY; skeleton.bone_count()];
    if skeleton.bone_count() == 0 {
        return poses;
    }

    let joints = motion.joint_vecs(frame_idx);
    assert_eq!(
        joints.len(),
        skeleton.bone_count(),
        "motion bone count must match the skeleton"
    );

    let root = skeleton.root_bone();
    let rotation =
        root.rest_rotation().transpose() * rotation_xyz_degrees(joints[root.index()].angular);
    let start = skeleton.root_position() + joints[root.index()].linear;
    let end = start + rotation * root.direction() * root.length();
    poses[root.index()] = BonePose {
        start,
        end,
        rotation,
    };

    // Depth-first pre-order; a bone's parent is always evaluated before it.
    let mut pending: Vec<usize> = root.children().iter().rev().copied().collect();
    while let Some(bone_idx) = pending.pop() {
        let bone = skeleton.bone(bone_idx);
        let parent_idx = bone.parent().expect("non-root bone must have a parent");
        let parent = poses[parent_idx];

        // Disabled axes contribute no rotation, whatever the cache holds.
        let local = rotation_xyz_degrees(bone.dof().mask(joints[bone_idx].angular));
        let rotation = parent.rotation * bone.rest_rotation().transpose() * local;
        let start = parent.end;
        let end = start + rotation * bone.direction() * bone.length();
        poses[bone_idx] = BonePose {
            start,
            end,
            rotation,
        };

        pending.extend(bone.children().iter().rev().copied());
    }

    poses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skeleton::{BoneSpec, DofFlags};
    use bevy::math::DVec3;
    use approx::assert_relative_eq;

    fn single_bone_skeleton(length: f64) -> Skeleton {
        let mut skeleton = Skeleton::new(DVec3::ZERO, 1.0);
        skeleton.add_bone(BoneSpec {
            name: "root".into(),
            parent: None,
            direction: DVec3::Z,
            length,
            rest_axis_degrees: DVec3::ZERO,
            dof: DofFlags::NONE,
        });
        skeleton
    }

    #[test]
    fn empty_skeleton_yields_an_empty_pose_array() {
        let skeleton = Skeleton::new(DVec3::ZERO, 1.0);
        let motion = Motion::with_frame_count(&skeleton, 1);
        assert!(compute_pose(&skeleton, &motion, 0).is_empty());
    }

    #[test]
    fn translated_root_rest_pose() {
        let skeleton = single_bone_skeleton(2.5);
        let mut motion = Motion::with_frame_count(&skeleton, 1);
        let mut joints = motion.joint_vecs(0).to_vec();
        joints[0].linear = DVec3::new(1.0, 2.0, 3.0);
        motion.set_joint_vecs(0, joints);

        let poses = compute_pose(&skeleton, &motion, 0);
        assert_eq!(poses.len(), 1);
        assert!(poses[0].start.abs_diff_eq(DVec3::new(1.0, 2.0, 3.0), 1e-12));
        assert!(poses[0].end.abs_diff_eq(DVec3::new(1.0, 2.0, 5.5), 1e-12));
    }

    #[test]
    fn deterministic_across_calls() {
        let skeleton = single_bone_skeleton(1.0);
        let mut motion = Motion::with_frame_count(&skeleton, 1);
        let mut joints = motion.joint_vecs(0).to_vec();
        joints[0].linear = DVec3::new(0.5, -0.25, 0.0);
        joints[0].angular = DVec3::new(12.0, -40.0, 7.5);
        motion.set_joint_vecs(0, joints);

        let first = compute_pose(&skeleton, &motion, 0);
        let second = compute_pose(&skeleton, &motion, 0);
        for (a, b) in first.iter().zip(&second) {
            assert!(a.is_approx(b, 0.0));
        }
    }

    #[test]
    fn enabled_axis_rotates_a_child() {
        let mut skeleton = Skeleton::new(DVec3::ZERO, 1.0);
        skeleton.add_bone(BoneSpec {
            name: "root".into(),
            parent: None,
            direction: DVec3::Z,
            length: 1.0,
            rest_axis_degrees: DVec3::ZERO,
            dof: DofFlags::NONE,
        });
        skeleton.add_bone(BoneSpec {
            name: "arm".into(),
            parent: Some(0),
            direction: DVec3::X,
            length: 1.0,
            rest_axis_degrees: DVec3::ZERO,
            dof: DofFlags::new(false, false, true),
        });

        let mut motion = Motion::with_frame_count(&skeleton, 1);
        let mut joints = motion.joint_vecs(0).to_vec();
        joints[0].angular = DVec3::ZERO;
        joints[1].angular = DVec3::new(0.0, 0.0, 90.0);
        motion.set_joint_vecs(0, joints);

        let poses = compute_pose(&skeleton, &motion, 0);
        // arm starts at the root's end and points along +Y after the Z spin
        assert!(poses[1].start.abs_diff_eq(DVec3::new(0.0, 0.0, 1.0), 1e-12));
        assert_relative_eq!(poses[1].end.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(poses[1].end.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(poses[1].end.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rigid_bone_still_inherits_rest_orientation() {
        let mut skeleton = Skeleton::new(DVec3::ZERO, 1.0);
        skeleton.add_bone(BoneSpec {
            name: "root".into(),
            parent: None,
            direction: DVec3::Z,
            length: 0.0,
            rest_axis_degrees: DVec3::ZERO,
            dof: DofFlags::NONE,
        });
        skeleton.add_bone(BoneSpec {
            name: "stub".into(),
            parent: Some(0),
            direction: DVec3::X,
            length: 1.0,
            rest_axis_degrees: DVec3::new(0.0, 0.0, 90.0),
            dof: DofFlags::NONE,
        });

        let motion = Motion::with_frame_count(&skeleton, 1);
        let poses = compute_pose(&skeleton, &motion, 0);
        // rest orientation is inverted, so the stub points along -Y
        assert_relative_eq!(poses[1].end.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(poses[1].end.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(poses[1].end.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn angles_on_disabled_axes_are_ignored() {
        let mut skeleton = Skeleton::new(DVec3::ZERO, 1.0);
        skeleton.add_bone(BoneSpec {
            name: "root".into(),
            parent: None,
            direction: DVec3::Z,
            length: 0.0,
            rest_axis_degrees: DVec3::ZERO,
            dof: DofFlags::NONE,
        });
        skeleton.add_bone(BoneSpec {
            name: "arm".into(),
            parent: Some(0),
            direction: DVec3::X,
            length: 1.0,
            rest_axis_degrees: DVec3::ZERO,
            dof: DofFlags::NONE,
        });

        let mut motion = Motion::with_frame_count(&skeleton, 1);
        let mut joints = motion.joint_vecs(0).to_vec();
        joints[1].angular = DVec3::new(45.0, 45.0, 45.0);
        motion.set_joint_vecs(0, joints);

        let poses = compute_pose(&skeleton, &motion, 0);
        assert!(poses[1].end.abs_diff_eq(DVec3::X, 1e-12));
    }
}
