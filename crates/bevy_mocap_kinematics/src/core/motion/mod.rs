pub mod amc;
pub mod loader;

use bevy::{
    asset::{Asset, Handle},
    math::DVec3,
    reflect::Reflect,
};

use crate::core::skeleton::Skeleton;

/// First line written to motion files created in memory rather than imported.
pub(crate) const DEFAULT_HEADER: &str = "#!OML:ASF";

/// One frame's snapshot of the root position plus every bone's rotation
/// angles (degrees) and translation. Translation is only semantically used
/// for the root bone.
#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct Posture {
    root_position: DVec3,
    rotations: Vec<DVec3>,
    translations: Vec<DVec3>,
}

impl Posture {
    pub fn new(bone_count: usize) -> Self {
        Self {
            root_position: DVec3::ZERO,
            rotations: vec![DVec3::ZERO; bone_count],
            translations: vec![DVec3::ZERO; bone_count],
        }
    }

    pub fn size(&self) -> usize {
        self.rotations.len()
    }

    pub fn root_position(&self) -> DVec3 {
        self.root_position
    }

    pub fn set_root_position(&mut self, position: DVec3) {
        self.root_position = position;
    }

    /// Per-bone rotation in degrees. Only components on enabled axes are
    /// meaningful.
    pub fn rotation(&self, bone_idx: usize) -> DVec3 {
        self.rotations[bone_idx]
    }

    pub fn set_rotation(&mut self, bone_idx: usize, degrees: DVec3) {
        self.rotations[bone_idx] = degrees;
    }

    pub fn translation(&self, bone_idx: usize) -> DVec3 {
        self.translations[bone_idx]
    }

    pub fn set_translation(&mut self, bone_idx: usize, translation: DVec3) {
        self.translations[bone_idx] = translation;
    }

    /// Reinitialize to `bone_count` zeroed entries. The only way the size of
    /// a posture changes after construction.
    pub fn reset(&mut self, bone_count: usize) {
        *self = Posture::new(bone_count);
    }

    pub fn is_approx(&self, other: &Posture, epsilon: f64) -> bool {
        self.size() == other.size()
            && self.root_position.abs_diff_eq(other.root_position, epsilon)
            && self
                .rotations
                .iter()
                .zip(&other.rotations)
                .all(|(a, b)| a.abs_diff_eq(*b, epsilon))
            && self
                .translations
                .iter()
                .zip(&other.translations)
                .all(|(a, b)| a.abs_diff_eq(*b, epsilon))
    }
}

/// Packed 6-component joint vector: 3 linear + 3 angular (degrees). One per
/// bone per frame; this cache is the primary read path for FK and IK.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq)]
pub struct JointVec {
    pub linear: DVec3,
    pub angular: DVec3,
}

/// An ordered sequence of motion frames over a fixed skeleton.
///
/// Each frame owns one [`Posture`] and one packed [`JointVec`] row; the two
/// are always resized together. Motions are imported from AMC text data (see
/// [`amc`]) or created zeroed, and are the only entity the IK solver mutates.
#[derive(Asset, Reflect, Clone, Debug, Default)]
pub struct Motion {
    pub(crate) postures: Vec<Posture>,
    pub(crate) joint_vecs: Vec<Vec<JointVec>>,
    pub(crate) frame_offset: i32,
    pub(crate) header: String,
    pub(crate) skeleton: Handle<Skeleton>,
}

impl Motion {
    /// A zeroed motion with `frame_count` rest-pose frames.
    pub fn with_frame_count(skeleton: &Skeleton, frame_count: usize) -> Self {
        let bone_count = skeleton.bone_count();
        Self {
            postures: vec![Posture::new(bone_count); frame_count],
            joint_vecs: vec![vec![JointVec::default(); bone_count]; frame_count],
            frame_offset: 0,
            header: DEFAULT_HEADER.to_string(),
            skeleton: Handle::default(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.postures.len()
    }

    pub fn posture(&self, frame_idx: usize) -> &Posture {
        &self.postures[frame_idx]
    }

    pub fn set_posture(&mut self, frame_idx: usize, posture: Posture) {
        self.postures[frame_idx] = posture;
    }

    pub fn joint_vecs(&self, frame_idx: usize) -> &[JointVec] {
        &self.joint_vecs[frame_idx]
    }

    pub fn set_joint_vecs(&mut self, frame_idx: usize, joint_vecs: Vec<JointVec>) {
        assert_eq!(
            joint_vecs.len(),
            self.joint_vecs[frame_idx].len(),
            "joint vector row must match the motion's bone count"
        );
        self.joint_vecs[frame_idx] = joint_vecs;
    }

    pub fn frame_offset(&self) -> i32 {
        self.frame_offset
    }

    pub fn set_frame_offset(&mut self, offset: i32) {
        self.frame_offset = offset;
    }

    /// Map an external playback index to an internal frame index, clamping to
    /// `[0, frame_count - 1]`. Out-of-range playback indices are a display
    /// convenience, not an error.
    pub fn posture_index(&self, frame_idx: i32) -> usize {
        let idx = frame_idx + self.frame_offset;
        if idx < 0 {
            0
        } else if idx as usize >= self.frame_count() {
            self.frame_count().saturating_sub(1)
        } else {
            idx as usize
        }
    }

    /// Opaque header line preserved from import, re-emitted on export.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn skeleton(&self) -> &Handle<Skeleton> {
        &self.skeleton
    }

    pub fn set_skeleton(&mut self, skeleton: Handle<Skeleton>) {
        self.skeleton = skeleton;
    }

    /// Zero every frame: rest root position, no rotation on any bone.
    pub fn reset_to_default(&mut self) {
        let bone_count = self.joint_vecs.first().map_or(0, Vec::len);
        for posture in &mut self.postures {
            posture.reset(bone_count);
        }
        for row in &mut self.joint_vecs {
            row.fill(JointVec::default());
        }
    }

    /// Resize to `frame_count` frames of `bone_count` bones, reinitializing
    /// every frame to zero. Postures and the packed cache are always resized
    /// together.
    pub fn resize_frames(&mut self, frame_count: usize, bone_count: usize) {
        self.postures = vec![Posture::new(bone_count); frame_count];
        self.joint_vecs = vec![vec![JointVec::default(); bone_count]; frame_count];
    }
}
