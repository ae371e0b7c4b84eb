use bevy::math::{DMat3, DVec3};

/// Rotation matrix for extrinsic X-then-Y-then-Z Euler angles (world-axis
/// rotations applied X first), in radians.
pub fn rotation_xyz(radians: DVec3) -> DMat3 {
    DMat3::from_rotation_z(radians.z)
        * DMat3::from_rotation_y(radians.y)
        * DMat3::from_rotation_x(radians.x)
}

/// Same as [`rotation_xyz`], taking angles in degrees. Motion data stores
/// angles in degrees throughout; conversion happens at the point of use.
pub fn rotation_xyz_degrees(degrees: DVec3) -> DMat3 {
    rotation_xyz(DVec3::new(
        degrees.x.to_radians(),
        degrees.y.to_radians(),
        degrees.z.to_radians(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn x_is_applied_first() {
        // Rotate +X by 90 about X (no-op on the X axis), then 90 about Z.
        let m = rotation_xyz_degrees(DVec3::new(90.0, 0.0, 90.0));
        let v = m * DVec3::X;
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-12);

        // The Y axis first goes to Z (about X), which Z rotation leaves alone.
        let v = m * DVec3::Y;
        assert_relative_eq!(v.z, 1.0, epsilon = 1e-12);
    }
}
