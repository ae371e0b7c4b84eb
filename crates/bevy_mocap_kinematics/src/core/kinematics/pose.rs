use bevy::{
    math::{DMat3, DVec3},
    reflect::Reflect,
};

/// World-space placement of one bone, produced by
/// [`compute_pose`](super::compute_pose).
///
/// Pose arrays are transient: they are recomputed on every FK query and owned
/// by the caller for the duration of that evaluation.
#[derive(Reflect, Clone, Copy, Debug, PartialEq)]
pub struct BonePose {
    /// World position of the bone's proximal joint.
    pub start: DVec3,
    /// World position of the bone's distal end.
    pub end: DVec3,
    /// World orientation of the bone's local frame.
    pub rotation: DMat3,
}

impl BonePose {
    pub const IDENTITY: BonePose = BonePose {
        start: DVec3::ZERO,
        end: DVec3::ZERO,
        rotation: DMat3::IDENTITY,
    };

    pub fn is_approx(&self, other: &BonePose, epsilon: f64) -> bool {
        self.start.abs_diff_eq(other.start, epsilon)
            && self.end.abs_diff_eq(other.end, epsilon)
            && self.rotation.abs_diff_eq(other.rotation, epsilon)
    }
}

impl Default for BonePose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
