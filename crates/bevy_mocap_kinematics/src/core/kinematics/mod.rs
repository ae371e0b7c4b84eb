pub mod forward;
pub mod ik;
pub mod pose;

pub use forward::compute_pose;
pub use ik::{IkConfig, IkStep, step_ik};
pub use pose::BonePose;
