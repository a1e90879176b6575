//! Unified error types for slidemark.
//!
//! Each layer keeps its own error enum (`OpcError`, `OoxmlError`, `DiagramError`,
//! `ConfigError`); everything that reaches the caller of a conversion is folded into
//! [`Error`] by the conversions in the sibling module.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for slidemark operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The Markdown input does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The Markdown input exists but could not be read as UTF-8 text
    #[error("Cannot read input file {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid conversion options
    #[error("Configuration error: {0}")]
    Config(String),

    /// XML generation error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Package structure error (part names, relationships)
    #[error("Package error: {0}")]
    Package(String),

    /// Invalid or unsupported content (e.g. an image format PowerPoint cannot embed)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error was raised before any conversion work started.
    ///
    /// Input errors are reported with a plain message; everything else is a
    /// conversion failure.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InputNotFound(_) | Error::InputUnreadable { .. })
    }
}

/// Result type for slidemark operations.
pub type Result<T> = std::result::Result<T, Error>;
