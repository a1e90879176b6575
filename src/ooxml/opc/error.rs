/// Error types for OPC package operations
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    #[error("Invalid pack URI: {0}")]
    InvalidPackUri(String),

    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Duplicate part: {0}")]
    DuplicatePart(String),

    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("ZIP error: {0}")]
    ZipError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for OpcError {
    fn from(err: zip::result::ZipError) -> Self {
        OpcError::ZipError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;
