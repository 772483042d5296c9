//! Rule engine error types.

use thiserror::Error;

/// Rule engine errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A rule with this name already exists and overwrite was not requested.
    #[error("rule already defined: {0}")]
    DuplicateRule(String),

    /// A permission was checked against a rule name that was never defined.
    #[error("permission not defined: {0}")]
    UndefinedRule(String),

    /// A capability set was referenced that is not registered.
    #[error("unknown capability set: {0}")]
    UnknownCapabilitySet(String),

    /// A named handler target is malformed or names a method the set does
    /// not expose.
    #[error("cannot dispatch handler target: {0}")]
    BadTarget(String),

    /// Failed to parse a rule configuration file.
    #[error("failed to parse rule config: {0}")]
    Parse(String),

    /// An I/O error occurred while reading rule configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The cache backend failed.
    #[error(transparent)]
    Cache(#[from] cache::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
