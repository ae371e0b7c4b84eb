//! Import and export of AMC motion text data.
//!
//! The format is line-oriented: one opaque header line, directive lines up to
//! and including `:DEGREES`, then per frame a 1-based frame number line
//! followed by one line per moving bone. The root line carries six numeric
//! fields (translation then rotation); every other line carries only the
//! fields for that bone's enabled axes, in X, Y, Z order, with no placeholder
//! zeros.
//!
//! The frame count is not stored in the file. It is derived from the count of
//! non-empty lines as `(lines - 3) / (movable_bones + 1)`, which bakes in the
//! assumption of exactly three header/directive lines. Export therefore
//! always writes the canonical `:FULLY-SPECIFIED` and `:DEGREES` directive
//! pair, whatever the imported file contained.

use std::fmt::Write as _;
use std::path::Path;

use bevy::math::DVec3;

use super::{JointVec, Motion};
use crate::core::errors::AmcError;
use crate::core::skeleton::{Axis, Skeleton};

impl Motion {
    /// Parse AMC text into a freshly sized motion. Positional data is
    /// multiplied by `scale`.
    pub fn from_amc_str(source: &str, scale: f64, skeleton: &Skeleton) -> Result<Self, AmcError> {
        parse(source, scale, skeleton)
    }

    /// Read and parse an AMC file from disk.
    pub fn read_amc_file(
        path: impl AsRef<Path>,
        scale: f64,
        skeleton: &Skeleton,
    ) -> Result<Self, AmcError> {
        let source = std::fs::read_to_string(path)?;
        parse(&source, scale, skeleton)
    }

    /// Serialize every frame back to AMC text, dividing positional data by
    /// `scale`.
    pub fn to_amc_string(&self, skeleton: &Skeleton, scale: f64) -> String {
        write(self, skeleton, scale)
    }

    /// Write the motion to disk. Returns the number of frames written.
    pub fn write_amc_file(
        &self,
        path: impl AsRef<Path>,
        skeleton: &Skeleton,
        scale: f64,
    ) -> Result<usize, AmcError> {
        std::fs::write(path, write(self, skeleton, scale))?;
        Ok(self.frame_count())
    }
}

pub fn parse(source: &str, scale: f64, skeleton: &Skeleton) -> Result<Motion, AmcError> {
    let movable = skeleton.movable_bone_count();

    // Frame count is derived from the file's shape, not from a header field.
    let non_empty_lines = source.lines().filter(|line| !line.is_empty()).count();
    let frame_count = non_empty_lines.saturating_sub(3) / (movable + 1);

    let (header_line, rest) = source.split_once('\n').unwrap_or((source, ""));
    let header = header_line.strip_suffix('\r').unwrap_or(header_line);

    let mut tokens = rest.split_whitespace();
    loop {
        let token = tokens.next().ok_or(AmcError::MissingDegrees)?;
        if token.starts_with(":DEGREES") {
            break;
        }
    }

    let mut motion = Motion::with_frame_count(skeleton, frame_count);
    motion.header = header.to_string();

    for frame_idx in 0..frame_count {
        // 1-based frame number; the derived count is authoritative.
        next_f64(&mut tokens)?;

        for _ in 0..movable {
            let name = tokens.next().ok_or(AmcError::UnexpectedEof)?;
            let bone_idx = skeleton
                .bone_index(name)
                .ok_or_else(|| AmcError::UnknownBone(name.to_string()))?;

            let mut joint = JointVec::default();
            let posture = &mut motion.postures[frame_idx];

            if bone_idx == skeleton.root_index() {
                let position = DVec3::new(
                    next_f64(&mut tokens)?,
                    next_f64(&mut tokens)?,
                    next_f64(&mut tokens)?,
                ) * scale;
                posture.set_translation(bone_idx, position);
                posture.set_root_position(position);
                joint.linear = position;

                joint.angular = DVec3::new(
                    next_f64(&mut tokens)?,
                    next_f64(&mut tokens)?,
                    next_f64(&mut tokens)?,
                );
            } else {
                let dof = skeleton.bone(bone_idx).dof();
                for axis in Axis::ALL {
                    if dof.enabled(axis) {
                        joint.angular[axis.index()] = next_f64(&mut tokens)?;
                    }
                }
            }

            posture.set_rotation(bone_idx, joint.angular);
            motion.joint_vecs[frame_idx][bone_idx] = joint;
        }
    }

    Ok(motion)
}

pub fn write(motion: &Motion, skeleton: &Skeleton, scale: f64) -> String {
    let mut out = String::new();
    let root_idx = skeleton.root_index();
    let root_name = skeleton.root_bone().name();

    out.push_str(motion.header());
    out.push('\n');
    out.push_str(":FULLY-SPECIFIED\n");
    out.push_str(":DEGREES\n");

    for (frame_idx, posture) in motion.postures.iter().enumerate() {
        let _ = writeln!(out, "{}", frame_idx + 1);

        let position = posture.root_position() / scale;
        let rotation = posture.rotation(root_idx);
        let _ = write!(
            out,
            "{root_name} {:.8} {:.8} {:.8} {:.8} {:.8} {:.8}",
            position.x, position.y, position.z, rotation.x, rotation.y, rotation.z
        );

        for bone in skeleton.bones() {
            if bone.index() == root_idx || !bone.dof().any() {
                continue;
            }
            let _ = write!(out, "\n{}", bone.name());
            let rotation = posture.rotation(bone.index());
            for axis in Axis::ALL {
                if bone.dof().enabled(axis) {
                    let _ = write!(out, " {:.8}", rotation[axis.index()]);
                }
            }
        }
        out.push('\n');
    }

    out
}

fn next_f64<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<f64, AmcError> {
    let token = tokens.next().ok_or(AmcError::UnexpectedEof)?;
    token.parse().map_err(|source| AmcError::InvalidNumber {
        token: token.to_string(),
        source,
    })
}
