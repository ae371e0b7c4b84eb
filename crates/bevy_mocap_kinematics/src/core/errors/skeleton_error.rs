use thiserror::Error;

/// Possible errors when building a [`Skeleton`] from its serial description
///
/// [`Skeleton`]: crate::core::skeleton::Skeleton
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SkeletonError {
    #[error("bone {bone:?} references unknown parent {parent:?} (parents must be listed first)")]
    UnknownParent { bone: String, parent: String },
    #[error("duplicate bone name {0:?}")]
    DuplicateBone(String),
    #[error("bone {0:?} has no parent, but a root bone already exists")]
    MultipleRoots(String),
    #[error("skeleton description contains no root bone")]
    MissingRoot,
}
