//! Error types for decoding, resolving and encoding packs

use senml_core::ResolveError;
use thiserror::Error;

use crate::Format;

/// Result type alias for SenML operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding, resolving or encoding a pack
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested wire format is unknown or not compiled in
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// The payload is not a well-formed pack in the given format
    #[error("Could not decode {format} payload: {message}")]
    Decode { format: Format, message: String },

    /// The pack could not be written in the given format
    #[error("Could not encode {format} payload: {message}")]
    Encode { format: Format, message: String },

    /// The pack decoded but failed resolution
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl Error {
    /// Create an unsupported format error
    pub fn unsupported_format<S: Into<String>>(format: S) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a decode error
    pub fn decode<S: Into<String>>(format: Format, message: S) -> Self {
        Self::Decode {
            format,
            message: message.into(),
        }
    }

    /// Create an encode error
    pub fn encode<S: Into<String>>(format: Format, message: S) -> Self {
        Self::Encode {
            format,
            message: message.into(),
        }
    }
}

#[cfg(feature = "xml")]
impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::decode(Format::Xml, err.to_string())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(Format::Json, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::unsupported_format("cbor");
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
        assert_eq!(err.to_string(), "Unsupported format: cbor");
    }

    #[test]
    fn test_decode_error_names_format() {
        let err = Error::decode(Format::Xml, "unexpected end");
        assert_eq!(err.to_string(), "Could not decode XML payload: unexpected end");
    }

    #[test]
    fn test_resolve_error_is_transparent() {
        let err: Error = ResolveError::EmptyName { index: 2 }.into();
        assert_eq!(err.to_string(), "Record 2: resolved name is empty");
    }
}
