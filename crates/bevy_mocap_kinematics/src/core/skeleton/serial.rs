use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use super::{BoneSpec, DofFlags, Skeleton};
use crate::core::errors::SkeletonError;

/// RON-facing description of a [`Skeleton`]. Bones are listed parents-first
/// and reference their parent by name.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SkeletonSerial {
    #[serde(default)]
    pub root_position: [f64; 3],
    pub length_scale: f64,
    pub bones: Vec<BoneSerial>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BoneSerial {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub direction: [f64; 3],
    pub length: f64,
    /// Rest orientation as X, Y, Z Euler angles in degrees.
    #[serde(default)]
    pub axis: [f64; 3],
    /// Enabled rotation axes, X, Y, Z order.
    #[serde(default)]
    pub dof: [bool; 3],
}

impl Skeleton {
    pub fn from_serial(serial: &SkeletonSerial) -> Result<Skeleton, SkeletonError> {
        let mut skeleton = Skeleton::new(
            DVec3::from_array(serial.root_position),
            serial.length_scale,
        );

        for bone in &serial.bones {
            if skeleton.bone_index(&bone.name).is_some() {
                return Err(SkeletonError::DuplicateBone(bone.name.clone()));
            }

            let parent = match &bone.parent {
                Some(parent_name) => Some(skeleton.bone_index(parent_name).ok_or_else(|| {
                    SkeletonError::UnknownParent {
                        bone: bone.name.clone(),
                        parent: parent_name.clone(),
                    }
                })?),
                None => {
                    if skeleton.bone_count() > 0 {
                        return Err(SkeletonError::MultipleRoots(bone.name.clone()));
                    }
                    None
                }
            };

            skeleton.add_bone(BoneSpec {
                name: bone.name.clone(),
                parent,
                direction: DVec3::from_array(bone.direction),
                length: bone.length,
                rest_axis_degrees: DVec3::from_array(bone.axis),
                dof: DofFlags::new(bone.dof[0], bone.dof[1], bone.dof[2]),
            });
        }

        if skeleton.bones.is_empty() {
            return Err(SkeletonError::MissingRoot);
        }

        Ok(skeleton)
    }
}
