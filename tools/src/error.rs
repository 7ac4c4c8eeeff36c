use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The published digest is not 40 hex characters.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// Missing, surplus or non-numeric command line input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
