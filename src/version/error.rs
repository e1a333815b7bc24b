use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building versions, values and enums
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("Invalid alias source for '{key}': expected a list of aliases or a mapping of version to aliases")]
    InvalidAliasSource { key: String },

    #[error("Invalid enum member: {reason}")]
    InvalidMember { reason: String },
}

/// Errors raised while resolving aliases or looking up enum members
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Versioned value {key} is not bound")]
    Unbound { key: String },

    #[error("Can't lookup value for unbound versioned enum")]
    EnumUnbound,

    #[error("No values of {key} could be found for version {version}")]
    NoMatchingVersion { key: String, version: String },

    #[error("No value of {key} could be found for version {version}")]
    EmptyValue { key: String, version: String },

    #[error("No member named {key}")]
    MemberNotFound { key: String },

    #[error("Could not find matching value for {value}")]
    NoMatchingMember { value: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
