//! Error types for the position storage engine

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::Position;
use crate::host::HostError;

/// Malformed text in a stored record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed position text: {0:?}")]
    Position(String),

    #[error("unknown position relativity: {0:?}")]
    Relativity(String),
}

/// Failure of a storage operation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A record with the same context already exists under this name
    #[error("position {name} already exists for this context, use update instead")]
    AlreadyExists { name: String },

    /// No stored record matches the context
    #[error("position {name} does not exist in an active context")]
    NotFound { name: String },

    /// Refused to delete a file outside the position storage
    #[error("refusing to remove {}: not inside the position storage", .0.display())]
    InvalidDeleteTarget(PathBuf),

    #[error("invalid position name: {0:?}")]
    InvalidName(String),

    #[error("stored record has no position")]
    MissingPosition,

    /// Moving between frames left the coordinate range
    #[error("position {position} is out of range relative to {origin}")]
    OutOfRange { position: Position, origin: Position },

    #[error("host query failed: {0}")]
    Host(#[from] HostError),

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
