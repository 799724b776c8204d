//! Error types for descriptor loading and tooltip resolution
//!
//! Tooltip rendering itself never fails: malformed signatures, missing
//! summaries and unknown cref kinds all degrade to partial output. These
//! errors cover assembly-time mistakes and descriptor data that cannot be
//! read at all.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resolver was assembled without a descriptor lookup
    #[error("description resolver requires a descriptor lookup")]
    MissingLookup,

    /// An attribute display name is too short to contain its return type and property
    #[error(
        "display name `{display_name}` cannot hold return type `{return_type}` and property `{property}`"
    )]
    DisplayNameMismatch {
        display_name: String,
        return_type: String,
        property: String,
    },

    /// A descriptor file could not be read
    #[error("failed to read descriptors from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A descriptor file is not valid descriptor JSON
    #[error("invalid descriptor data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
