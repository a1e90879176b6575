//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::deck::config::ConfigError;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        Error::from_opc_error(err)
    }
}

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::Xml(s) => Error::XmlError(s),
            OoxmlError::InvalidFormat(s) => Error::InvalidFormat(s),
            OoxmlError::UnknownSlide(index) => Error::Other(format!("Unknown slide index {index}")),
            OoxmlError::Opc(e) => Error::from_opc_error(e),
            OoxmlError::Other(s) => Error::Other(s),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => Error::Io(e),
            other => Error::Config(other.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

impl Error {
    pub(crate) fn from_opc_error(err: OpcError) -> Self {
        match err {
            OpcError::IoError(e) => Error::Io(e),
            OpcError::ZipError(e) => Error::ZipError(e),
            OpcError::XmlError(s) => Error::XmlError(s),
            _ => Error::Package(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opc_io_error_keeps_kind() {
        let err: Error = OpcError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ))
        .into();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_input_errors_are_classified() {
        assert!(Error::InputNotFound("deck.md".into()).is_input_error());
        assert!(!Error::ZipError("broken".to_string()).is_input_error());
    }
}
