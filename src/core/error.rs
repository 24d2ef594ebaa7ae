use std::path::PathBuf;
use thiserror::Error;

use crate::core::modpack::Side;

/// Central error type for the assembler.
/// Every module returns `Result<T, AssemblerError>`.
#[derive(Debug, Error)]
pub enum AssemblerError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt JSON at {path:?}: {source}")]
    CorruptFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    // ── Archive ─────────────────────────────────────────
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Archive entry '{0}' would be written twice")]
    DuplicateEntry(String),

    // ── Release ─────────────────────────────────────────
    #[error("Can only assemble a release for client or server, not {0}")]
    InvalidSide(Side),

    #[error("Release references config version '{0}' which the modpack does not have")]
    ConfigVersionNotFound(String),

    #[error("Release not found: {0}")]
    ReleaseNotFound(String),

    // ── Cache ───────────────────────────────────────────
    #[error("Version '{version}' of '{asset}' has no cached filename")]
    MissingFilename { asset: String, version: String },

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type AssemblerResult<T> = Result<T, AssemblerError>;

impl From<std::io::Error> for AssemblerError {
    fn from(source: std::io::Error) -> Self {
        AssemblerError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl AssemblerError {
    /// Attach a path to an IO error; used with `map_err`.
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| AssemblerError::Io { path, source }
    }
}
