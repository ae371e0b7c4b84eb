use thiserror::Error;

/// Possible errors raised by the IK solver. Numerical degeneracies
/// (unreachable target, zero end-effector displacement) are not errors; the
/// solver reports them by skipping the update.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KinematicsError {
    #[error("bone index {index} is out of range for a skeleton with {bone_count} bones")]
    BoneIndexOutOfRange { index: usize, bone_count: usize },
    #[error("frame index {index} is out of range for a motion with {frame_count} frames")]
    FrameIndexOutOfRange { index: usize, frame_count: usize },
    #[error("walking parent links from bone {end} never reaches bone {start}")]
    BrokenChain { start: usize, end: usize },
}
