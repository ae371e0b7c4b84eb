//! # Bevy Mocap Kinematics
//!
//! Skeletal forward/inverse kinematics over Acclaim-style motion capture
//! data for [Bevy](https://bevyengine.org/).
//!
//! There are two kinds of assets introduced by this library:
//! - [`Skeleton`], defined in `*.skn.ron` files: an immutable hierarchy of
//!   bones, each with a rest orientation, a direction and length, and 0-3
//!   enabled rotation axes. For example:
//!   ```ron
//!   (
//!       root_position: (0.0, 0.0, 0.0),
//!       length_scale: 0.06,
//!       bones: [
//!           (name: "root", direction: (0.0, 0.0, 0.0), length: 0.0, dof: (true, true, true)),
//!           (name: "lowerback", parent: Some("root"), direction: (0.0, 1.0, 0.0),
//!            length: 2.0, axis: (0.0, 0.0, 0.0), dof: (true, true, true)),
//!       ],
//!   )
//!   ```
//! - [`Motion`], defined in `*.mot.ron` files pointing at a raw AMC text
//!   file and the skeleton that interprets it:
//!   ```ron
//!   (
//!       source: "motions/walk.amc",
//!       skeleton: "skeletons/actor.skn.ron",
//!   )
//!   ```
//!   A motion owns, per frame, a root position and per-bone rotation angles
//!   plus a packed 6-component joint vector cache used as the fast read path
//!   by the kinematics routines. Motions can also be read directly from disk
//!   with [`Motion::read_amc_file`] or built zeroed with
//!   [`Motion::with_frame_count`].
//!
//! On top of these, [`compute_pose`] evaluates world-space start/end
//! positions and orientation for every bone of one frame, and [`step_ik`]
//! performs one numerical inverse-kinematics correction step, dragging a
//! chain's end effector toward a target by adjusting upstream joint angles
//! in place. Repeated [`step_ik`] calls, e.g. once per animation tick,
//! drive convergence.
//!
//! [`Skeleton`]: crate::core::skeleton::Skeleton
//! [`Motion`]: crate::core::motion::Motion
//! [`Motion::read_amc_file`]: crate::core::motion::Motion::read_amc_file
//! [`Motion::with_frame_count`]: crate::core::motion::Motion::with_frame_count
//! [`compute_pose`]: crate::core::kinematics::compute_pose
//! [`step_ik`]: crate::core::kinematics::step_ik

pub mod core;

pub mod prelude {
    pub use super::core::prelude::*;
}
