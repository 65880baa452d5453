//! Error types for email importing

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a single email is not imported.
///
/// None of these abort a run: the email is logged and skipped.
#[derive(Error, Debug)]
pub enum Rejection {
    /// The raw bytes could not be parsed as an email
    #[error("Failed to parse email structure: {0}")]
    Malformed(String),

    /// No text part could be found in the email
    #[error("Could not extract a text body")]
    NoBody,

    /// The text part could not be decoded
    #[error("Failed to decode body: {0}")]
    Decode(String),

    /// No complete import/content block in the body
    #[error("No or no valid import/content block")]
    NoBlock,

    /// The import block has no `type` entry
    #[error("Metadata 'type' is missing")]
    MissingType,

    /// The `type` entry names a type that is not configured
    #[error("Type '{0}' is not configured")]
    UnknownType(String),

    /// The type's path template references a field the import block lacks
    #[error("Type '{kind}' requires metadata '{field}' which is missing")]
    MissingField { kind: String, field: String },

    /// The rendered directory would leave the content root
    #[error("Type '{kind}' renders to invalid path '{}'", path.display())]
    InvalidPath { kind: String, path: PathBuf },

    /// The destination directory could not be created
    #[error("Couldn't create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Neither a filename rule nor a `filename` entry produced a name
    #[error("Type '{0}' could not determine a filename")]
    NoFilename(String),

    /// The resolved filename would leave the destination directory
    #[error("Invalid filename '{0}'")]
    InvalidFilename(String),

    /// The destination file is already there
    #[error("File at '{0}' already exists")]
    FileExists(PathBuf),

    /// Writing the destination file failed
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Rejection {
    /// Ordinary mail without an import block is expected, not a problem.
    #[must_use]
    pub const fn is_routine(&self) -> bool {
        matches!(self, Self::NoBlock)
    }
}

/// Errors loading importer configuration
#[derive(Error, Debug)]
pub enum ImportError {
    /// I/O error with the associated file path
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration could not be deserialized
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type Result<T, E = ImportError> = std::result::Result<T, E>;
