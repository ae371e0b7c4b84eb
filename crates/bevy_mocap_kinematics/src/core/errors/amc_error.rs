use thiserror::Error;

/// Possible errors when importing or exporting AMC motion data
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AmcError {
    #[error("could not access motion file: {0}")]
    Io(#[from] std::io::Error),
    #[error("no :DEGREES directive found in motion data")]
    MissingDegrees,
    #[error("bone name {0:?} in motion data does not exist in the skeleton")]
    UnknownBone(String),
    #[error("could not parse numeric field {token:?}: {source}")]
    InvalidNumber {
        token: String,
        source: std::num::ParseFloatError,
    },
    #[error("motion data ended before all derived frames were read")]
    UnexpectedEof,
}
