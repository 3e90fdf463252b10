//! Wire formats, media types and CoAP content formats

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, content_format};

/// Media type for SenML JSON
pub const SENML_JSON_MEDIA_TYPE: &str = "application/senml+json";
/// Media type for SenML streams in JSON
pub const SENSML_JSON_MEDIA_TYPE: &str = "application/sensml+json";
/// Media type for SenML XML
pub const SENML_XML_MEDIA_TYPE: &str = "application/senml+xml";
/// Media type for SenML streams in XML
pub const SENSML_XML_MEDIA_TYPE: &str = "application/sensml+xml";

/// A SenML wire format understood by [`decode`](crate::decode) and
/// [`encode`](crate::encode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON array of record objects
    Json,
    /// `<sensml>` document of `<senml>` elements
    Xml,
}

impl Format {
    /// Media type of a SenML pack in this format
    pub fn media_type(self) -> &'static str {
        match self {
            Format::Json => SENML_JSON_MEDIA_TYPE,
            Format::Xml => SENML_XML_MEDIA_TYPE,
        }
    }

    /// Parse a Content-Type value. Parameters after `;` are ignored and the
    /// streaming `sensml` types map to the same format.
    pub fn from_media_type(content_type: &str) -> Result<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            SENML_JSON_MEDIA_TYPE | SENSML_JSON_MEDIA_TYPE => Ok(Format::Json),
            SENML_XML_MEDIA_TYPE | SENSML_XML_MEDIA_TYPE => Ok(Format::Xml),
            _ => Err(Error::unsupported_format(content_type)),
        }
    }

    /// CoAP Content-Format identifier of a SenML pack in this format
    pub fn content_format(self) -> u16 {
        match self {
            Format::Json => content_format::SENML_JSON,
            Format::Xml => content_format::SENML_XML,
        }
    }

    /// Look up a CoAP Content-Format identifier
    pub fn from_content_format(id: u16) -> Result<Self> {
        match id {
            content_format::SENML_JSON | content_format::SENSML_JSON => Ok(Format::Json),
            content_format::SENML_XML | content_format::SENSML_XML => Ok(Format::Xml),
            other => Err(Error::unsupported_format(format!("content format {other}"))),
        }
    }

    /// Whether support for this format was compiled in
    pub fn is_enabled(self) -> bool {
        match self {
            Format::Json => cfg!(feature = "json"),
            Format::Xml => cfg!(feature = "xml"),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Xml => f.write_str("XML"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("json") {
            Ok(Format::Json)
        } else if s.eq_ignore_ascii_case("xml") {
            Ok(Format::Xml)
        } else {
            Err(Error::unsupported_format(s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("json".parse::<Format>(), Ok(Format::Json));
        assert_eq!("XML".parse::<Format>(), Ok(Format::Xml));
        assert_eq!(
            "cbor".parse::<Format>(),
            Err(Error::unsupported_format("cbor"))
        );
    }

    #[test]
    fn test_media_types() {
        assert_eq!(
            Format::from_media_type("application/senml+json"),
            Ok(Format::Json)
        );
        assert_eq!(
            Format::from_media_type("application/sensml+json; charset=utf-8"),
            Ok(Format::Json)
        );
        assert_eq!(
            Format::from_media_type("Application/SenML+XML"),
            Ok(Format::Xml)
        );
        assert!(Format::from_media_type("application/json").is_err());
        assert_eq!(Format::Xml.media_type(), "application/senml+xml");
    }

    #[test]
    fn test_content_formats() {
        assert_eq!(Format::from_content_format(110), Ok(Format::Json));
        assert_eq!(Format::from_content_format(311), Ok(Format::Xml));
        assert!(matches!(
            Format::from_content_format(content_format::SENML_CBOR),
            Err(Error::UnsupportedFormat { .. })
        ));
        assert_eq!(Format::Json.content_format(), 110);
        assert_eq!(Format::Xml.content_format(), 310);
    }

    #[test]
    fn test_display() {
        assert_eq!(Format::Json.to_string(), "JSON");
        assert_eq!(Format::Xml.to_string(), "XML");
    }
}
