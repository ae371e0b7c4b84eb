use thiserror::Error;

use super::{AmcError, SkeletonError};

/// Possible errors that can be produced by the skeleton and motion asset
/// loaders
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AssetLoaderError {
    /// An [IO](std::io) Error
    #[error("could not read asset: {0}")]
    Io(#[from] std::io::Error),
    /// A [RON](ron) Error
    #[error("could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
    #[error("could not complete direct asset load: {0}")]
    LoadDirectError(#[from] bevy::asset::LoadDirectError),
    #[error("could not read motion source bytes: {0}")]
    ReadBytes(#[from] bevy::asset::ReadAssetBytesError),
    #[error("could not build skeleton: {0}")]
    Skeleton(#[from] SkeletonError),
    #[error("could not parse motion data: {0}")]
    Amc(#[from] AmcError),
}
