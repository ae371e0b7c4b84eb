mod amc_error;
mod asset_loader_error;
mod kinematics_error;
mod skeleton_error;

pub use amc_error::AmcError;
pub use asset_loader_error::AssetLoaderError;
pub use kinematics_error::KinematicsError;
pub use skeleton_error::SkeletonError;
