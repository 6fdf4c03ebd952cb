use std::collections::TryReserveError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirlocError {
    // Memory
    #[error("allocation failure")]
    Allocation(#[from] TryReserveError),

    // Traversal
    #[error("cannot stat '{}'", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open directory '{}'", path.display())]
    DirectoryOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read directory '{}'", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Line counting
    #[error("cannot open file '{}'", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot map '{}'", path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Output
    #[error("cannot write output")]
    Write(#[source] std::io::Error),

    // Command line
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Coarse failure classes, one per process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Allocation,
    Io,
    InvalidArgument,
}

impl FailureKind {
    /// The small negative status code reported for this class.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Allocation => -1,
            Self::Io => -2,
            Self::InvalidArgument => -3,
        }
    }
}

impl DirlocError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stat { path, .. }
            | Self::DirectoryOpen { path, .. }
            | Self::DirectoryRead { path, .. }
            | Self::FileOpen { path, .. }
            | Self::Map { path, .. } => Some(path),
            Self::Allocation(_) | Self::Write(_) | Self::InvalidArgument(_) => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Allocation(_) => FailureKind::Allocation,
            Self::InvalidArgument(_) => FailureKind::InvalidArgument,
            _ => FailureKind::Io,
        }
    }
}
