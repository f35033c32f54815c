//! Error handling for folio.
//! Defines the error taxonomy shared by every stage of a build pass.

use std::io;
use thiserror::Error;

/// Custom error types for folio operations.
///
/// Errors local to one document or one file are reported and the pass
/// continues; `StructuralError` aborts the pass.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Malformed front matter in a single document
    #[error("Failed to parse '{path}': {reason}")]
    ParseError { path: String, reason: String },

    /// Embed extraction failure for a single image reference
    #[error("Failed to render '{reference}': {reason}")]
    RenderError { reference: String, reason: String },

    /// Represents errors that occur while selecting a page template
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Errors bubbled up from the MiniJinja engine
    #[error("MiniJinja error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    /// A single asset could not be copied
    #[error("Failed to copy asset '{path}': {reason}")]
    AssetCopyError { path: String, reason: String },

    /// The content tree itself is missing or unreadable
    #[error("Content tree error: {0}")]
    StructuralError(String),

    /// Represents errors that occur during site configuration parsing
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failures of the file watcher
    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),
}

/// Convenience type alias for Results with folio's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true when the error aborts a whole build pass rather than
    /// a single document or file.
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::StructuralError(_))
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
