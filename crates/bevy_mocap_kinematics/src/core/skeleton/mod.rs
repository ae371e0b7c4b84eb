pub mod loader;
pub mod serial;

use bevy::{
    asset::Asset,
    math::{DMat3, DVec3},
    platform::collections::HashMap,
    reflect::Reflect,
};

use crate::core::math::rotation_xyz_degrees;

/// One of the three local rotation axes of a bone.
///
/// The ordering of [`Axis::ALL`] is significant: motion files list angle
/// fields in X, Y, Z order, and the IK solver assigns one Jacobian column per
/// enabled axis in the same order.
#[derive(Reflect, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Unit vector along this axis in the bone's local frame.
    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    /// Component index into a `DVec3` of per-axis angles.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Which local rotation axes of a bone are free to move.
///
/// A bone with no enabled axes is rigid relative to its parent; such bones are
/// used as fixed placeholders in the hierarchy and carry no fields in motion
/// files.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DofFlags {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl DofFlags {
    pub const NONE: DofFlags = DofFlags {
        x: false,
        y: false,
        z: false,
    };
    pub const ALL: DofFlags = DofFlags {
        x: true,
        y: true,
        z: true,
    };

    pub fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    pub fn enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn any(&self) -> bool {
        self.x || self.y || self.z
    }

    pub fn count(&self) -> usize {
        usize::from(self.x) + usize::from(self.y) + usize::from(self.z)
    }

    /// Zero out the components of `angles` whose axes are disabled.
    pub fn mask(&self, angles: DVec3) -> DVec3 {
        DVec3::new(
            if self.x { angles.x } else { 0.0 },
            if self.y { angles.y } else { 0.0 },
            if self.z { angles.z } else { 0.0 },
        )
    }
}

/// Construction parameters for a single bone. See [`Skeleton::add_bone`].
#[derive(Clone, Debug)]
pub struct BoneSpec {
    pub name: String,
    /// Index of the parent bone, or `None` for the root.
    pub parent: Option<usize>,
    /// Direction of the bone's long axis in its own local frame. Unit length.
    pub direction: DVec3,
    pub length: f64,
    /// Rest orientation relative to the parent's local frame, as X, Y, Z
    /// Euler angles in degrees.
    pub rest_axis_degrees: DVec3,
    pub dof: DofFlags,
}

/// A rigid segment of the skeleton hierarchy. Immutable once added.
#[derive(Reflect, Clone, Debug)]
pub struct Bone {
    index: usize,
    parent: Option<usize>,
    children: Vec<usize>,
    name: String,
    /// Rotation from the parent's local frame to this bone's rest-local
    /// frame.
    rest_rotation: DMat3,
    direction: DVec3,
    length: f64,
    dof: DofFlags,
}

impl Bone {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rest_rotation(&self) -> DMat3 {
        self.rest_rotation
    }

    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn dof(&self) -> DofFlags {
        self.dof
    }
}

/// An immutable forest of bones with rest geometry and per-axis rotational
/// freedom.
///
/// Bones live in a flat arena addressed by integer index; each bone stores a
/// parent index and an ordered list of child indices. The skeleton is loaded
/// once (see [`loader::SkeletonLoader`]) or built programmatically with
/// [`Skeleton::add_bone`], and never mutated afterwards.
#[derive(Asset, Reflect, Clone, Debug)]
pub struct Skeleton {
    bones: Vec<Bone>,
    names: HashMap<String, usize>,
    root: Option<usize>,
    root_position: DVec3,
    length_scale: f64,
}

impl Skeleton {
    pub fn new(root_position: DVec3, length_scale: f64) -> Self {
        Self {
            bones: Vec::new(),
            names: HashMap::new(),
            root: None,
            root_position,
            length_scale,
        }
    }

    /// Append a bone to the arena and return its index.
    ///
    /// Panics on structural errors (duplicate name, dangling parent index,
    /// second root): those are construction bugs, not runtime conditions.
    /// The fallible path for untrusted input is [`Skeleton::from_serial`].
    pub fn add_bone(&mut self, spec: BoneSpec) -> usize {
        let index = self.bones.len();

        if self.names.contains_key(&spec.name) {
            panic!("duplicate bone name {:?} in skeleton", spec.name);
        }

        match spec.parent {
            Some(parent) => {
                if parent >= index {
                    panic!(
                        "bone {:?} references parent index {parent}, but only {index} bones exist",
                        spec.name
                    );
                }
                self.bones[parent].children.push(index);
            }
            None => {
                if self.root.is_some() {
                    panic!("bone {:?} would be a second root bone", spec.name);
                }
                self.root = Some(index);
            }
        }

        self.names.insert(spec.name.clone(), index);
        self.bones.push(Bone {
            index,
            parent: spec.parent,
            children: Vec::new(),
            name: spec.name,
            rest_rotation: rotation_xyz_degrees(spec.rest_axis_degrees),
            direction: spec.direction,
            length: spec.length,
            dof: spec.dof,
        });

        index
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn bone(&self, index: usize) -> &Bone {
        &self.bones[index]
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub fn root_index(&self) -> usize {
        self.root.expect("skeleton has no root bone")
    }

    pub fn root_bone(&self) -> &Bone {
        &self.bones[self.root_index()]
    }

    /// Rest position of the root joint in world space.
    pub fn root_position(&self) -> DVec3 {
        self.root_position
    }

    /// Uniform scale applied to positional data on motion import/export.
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    /// Number of bones that carry fields in a motion file: the root plus
    /// every other bone with at least one enabled axis. Zero-DOF placeholder
    /// bones are excluded. Motion frame counts are derived from this number.
    pub fn movable_bone_count(&self) -> usize {
        self.bones
            .iter()
            .filter(|bone| Some(bone.index) == self.root || bone.dof.any())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_skeleton() -> Skeleton {
        let mut skeleton = Skeleton::new(DVec3::ZERO, 0.06);
        skeleton.add_bone(BoneSpec {
            name: "root".into(),
            parent: None,
            direction: DVec3::ZERO,
            length: 0.0,
            rest_axis_degrees: DVec3::ZERO,
            dof: DofFlags::ALL,
        });
        skeleton.add_bone(BoneSpec {
            name: "hip_fixed".into(),
            parent: Some(0),
            direction: DVec3::new(1.0, 0.0, 0.0),
            length: 0.5,
            rest_axis_degrees: DVec3::ZERO,
            dof: DofFlags::NONE,
        });
        skeleton.add_bone(BoneSpec {
            name: "femur".into(),
            parent: Some(1),
            direction: DVec3::new(0.0, -1.0, 0.0),
            length: 1.5,
            rest_axis_degrees: DVec3::new(0.0, 0.0, 20.0),
            dof: DofFlags::new(true, false, true),
        });
        skeleton
    }

    #[test]
    fn hierarchy_wiring() {
        let skeleton = test_skeleton();
        assert_eq!(skeleton.bone_count(), 3);
        assert_eq!(skeleton.root_index(), 0);
        assert_eq!(skeleton.bone(0).children(), &[1]);
        assert_eq!(skeleton.bone(1).children(), &[2]);
        assert_eq!(skeleton.bone(2).parent(), Some(1));
        assert_eq!(skeleton.bone_index("femur"), Some(2));
        assert_eq!(skeleton.bone_index("tibia"), None);
    }

    #[test]
    fn movable_bone_count_excludes_placeholders() {
        let skeleton = test_skeleton();
        // root and femur move; hip_fixed has no enabled axes
        assert_eq!(skeleton.movable_bone_count(), 2);
    }

    #[test]
    fn dof_flags_mask_and_count() {
        let dof = DofFlags::new(true, false, true);
        assert_eq!(dof.count(), 2);
        assert!(dof.any());
        assert_eq!(
            dof.mask(DVec3::new(1.0, 2.0, 3.0)),
            DVec3::new(1.0, 0.0, 3.0)
        );
        assert!(!DofFlags::NONE.any());
    }

    #[test]
    #[should_panic(expected = "duplicate bone name")]
    fn duplicate_name_panics() {
        let mut skeleton = test_skeleton();
        skeleton.add_bone(BoneSpec {
            name: "femur".into(),
            parent: Some(0),
            direction: DVec3::X,
            length: 1.0,
            rest_axis_degrees: DVec3::ZERO,
            dof: DofFlags::NONE,
        });
    }
}
