//! Numerical inverse kinematics: one damped correction step per call.
//!
//! The solver linearizes the chain with a Jacobian, solves the least-squares
//! system with a thin SVD, and nudges every enabled angle along the solution.
//! Convergence is driven by the caller invoking [`step_ik`] repeatedly, e.g.
//! once per animation tick while a target is dragged.

use bevy::{math::DVec3, prelude::Resource, reflect::Reflect};
use nalgebra::{DMatrix, DVector};

use super::forward::compute_pose;
use crate::core::{
    errors::KinematicsError,
    motion::Motion,
    skeleton::{Axis, Skeleton},
};

/// Upper bound on the parent walk from the end bone to the start bone. A
/// chain this long means the hierarchy is malformed.
pub const MAX_CHAIN_LINKS: usize = 1000;

/// Externally configured solver inputs; not computed by the solver itself.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
pub struct IkConfig {
    /// Scale applied to every angle update.
    pub step_size: f64,
    /// Interactive mode takes single-strength steps and runs a
    /// predictor/corrector refinement against overshoot. Non-interactive
    /// (batch) mode oversamples the raw step by 5x instead.
    pub interactive: bool,
}

impl Default for IkConfig {
    fn default() -> Self {
        Self {
            step_size: 0.01,
            interactive: true,
        }
    }
}

/// What one [`step_ik`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkStep {
    /// False when the target was out of reach (or the chain is rigid) and
    /// the motion was left untouched.
    pub applied: bool,
    /// Distance from the end-effector to the target after the raw update.
    pub position_error: f64,
}

/// Perform exactly one correction step pulling the end of `end_bone` toward
/// `target`, mutating `motion` in place.
///
/// `end_bone` must be a descendant of `start_bone`; the chain is discovered
/// by walking parent links upward. An unreachable target is not an error:
/// the step is skipped and reported via [`IkStep::applied`].
pub fn step_ik(
    skeleton: &Skeleton,
    motion: &mut Motion,
    start_bone: usize,
    end_bone: usize,
    frame_idx: usize,
    target: DVec3,
    config: &IkConfig,
) -> Result<IkStep, KinematicsError> {
    for index in [start_bone, end_bone] {
        if index >= skeleton.bone_count() {
            return Err(KinematicsError::BoneIndexOutOfRange {
                index,
                bone_count: skeleton.bone_count(),
            });
        }
    }
    if frame_idx >= motion.frame_count() {
        return Err(KinematicsError::FrameIndexOutOfRange {
            index: frame_idx,
            frame_count: motion.frame_count(),
        });
    }

    // End-effector-most bone first, start bone last.
    let chain = collect_chain(skeleton, start_bone, end_bone)?;
    let poses = compute_pose(skeleton, motion, frame_idx);

    // If the chain cannot span the distance from its base joint to the
    // target, skip the update entirely.
    let total_length: f64 = chain.iter().map(|&idx| skeleton.bone(idx).length()).sum();
    let base_distance = (target - poses[start_bone].start).length();
    if total_length < base_distance {
        return Ok(IkStep {
            applied: false,
            position_error: (target - poses[end_bone].end).length(),
        });
    }

    // One column per enabled axis: axis world direction crossed with the
    // vector from the joint to the target. Using the target rather than the
    // end effector here reproduces the historical solver; see DESIGN.md.
    let mut columns: Vec<DVec3> = Vec::new();
    for &bone_idx in &chain {
        let bone = skeleton.bone(bone_idx);
        let to_target = target - poses[bone_idx].start;
        for axis in Axis::ALL {
            if bone.dof().enabled(axis) {
                let world_axis = poses[bone_idx].rotation * axis.unit();
                columns.push(world_axis.cross(to_target));
            }
        }
    }

    let error = target - poses[end_bone].end;
    if columns.is_empty() {
        // Every bone in the chain is rigid; there is nothing to adjust.
        return Ok(IkStep {
            applied: false,
            position_error: error.length(),
        });
    }

    let jacobian = DMatrix::from_fn(3, columns.len(), |row, col| columns[col][row]);
    let svd = jacobian.svd(true, true);
    let Ok(theta) = svd.solve(
        &DVector::from_column_slice(&[error.x, error.y, error.z]),
        f64::EPSILON,
    ) else {
        return Ok(IkStep {
            applied: false,
            position_error: error.length(),
        });
    };

    let gain = config.step_size * if config.interactive { 1.0 } else { 5.0 };
    apply_step(skeleton, motion, &chain, frame_idx, &theta, gain);

    let updated_poses = compute_pose(skeleton, motion, frame_idx);
    let position_error = (target - updated_poses[end_bone].end).length();

    if config.interactive {
        // Predictor/corrector: scale a second application of the same step by
        // how far the raw update actually moved the end effector.
        let moved = (updated_poses[end_bone].end - poses[end_bone].end).length();
        if moved > f64::EPSILON {
            let ratio = position_error / moved;
            apply_step(
                skeleton,
                motion,
                &chain,
                frame_idx,
                &theta,
                ratio * config.step_size,
            );
        }
    }

    Ok(IkStep {
        applied: true,
        position_error,
    })
}

/// Bone indices from `end` up to and including `start`.
fn collect_chain(
    skeleton: &Skeleton,
    start: usize,
    end: usize,
) -> Result<Vec<usize>, KinematicsError> {
    let mut chain = Vec::new();
    let mut bone_idx = end;

    for _ in 0..=MAX_CHAIN_LINKS {
        chain.push(bone_idx);
        if bone_idx == start {
            return Ok(chain);
        }
        match skeleton.bone(bone_idx).parent() {
            Some(parent) => bone_idx = parent,
            None => return Err(KinematicsError::BrokenChain { start, end }),
        }
    }

    Err(KinematicsError::BrokenChain { start, end })
}

/// Add `gain * theta[k]` to each enabled angular component along the chain,
/// in the same column order the Jacobian was built with.
fn apply_step(
    skeleton: &Skeleton,
    motion: &mut Motion,
    chain: &[usize],
    frame_idx: usize,
    theta: &DVector<f64>,
    gain: f64,
) {
    let mut joints = motion.joint_vecs(frame_idx).to_vec();
    let mut k = 0;

    for &bone_idx in chain {
        let dof = skeleton.bone(bone_idx).dof();
        for axis in Axis::ALL {
            if dof.enabled(axis) {
                joints[bone_idx].angular[axis.index()] += gain * theta[k];
                k += 1;
            }
        }
    }

    motion.set_joint_vecs(frame_idx, joints);
}
