//! # SenML - Sensor Measurement Lists for Rust
//!
//! Decode, resolve and encode [RFC 8428](https://tools.ietf.org/html/rfc8428)
//! SenML packs.
//!
//! ## Features
//!
//! - **Resolution**: base attributes folded into every record, relative
//!   times anchored at the current time, names and values checked against
//!   the RFC, records sorted chronologically
//! - **Formats**: JSON (`json` feature) and XML (`xml` feature), both on by
//!   default
//! - **Content negotiation**: media types and CoAP Content-Format ids
//!
//! ## Quick Start
//!
//! ```rust
//! use senml::{decode, encode, Format, Result};
//!
//! fn example() -> Result<()> {
//!     let input = br#"[
//!         {"bn":"urn:dev:ow:10e2073a01080063:","bt":1.320067464e+09,"bu":"%RH","v":20},
//!         {"u":"lon","v":24.30621},
//!         {"u":"lat","v":50.48140}
//!     ]"#;
//!
//!     let pack = decode(input, Format::Json)?;
//!     let resolved = pack.resolve()?;
//!     assert!(resolved.iter().all(|r| r.name == "urn:dev:ow:10e2073a01080063:"));
//!
//!     let xml = encode(&resolved, Format::Xml)?;
//!     println!("{}", String::from_utf8_lossy(&xml));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! The resolution engine and pack model live in `senml-core` and are
//! re-exported here.

pub mod codec;
pub mod error;
pub mod format;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "xml")]
pub mod xml;

// Re-export main types
pub use codec::{
    EncodeOptions, WirePack, decode, decode_and_resolve, decode_and_resolve_with, encode,
    encode_with,
};
pub use error::{Error, Result};
pub use format::Format;
pub use senml_core::{
    Clock, Config, FixedClock, RELATIVE_TIME_THRESHOLD, RawPack, RawRecord, ResolveError,
    ResolvedPack, ResolvedRecord, Resolver, SENML_VERSION, SenMLBuilder, SystemClock,
    TimeSeriesBuilder, Value, resolve,
};

/// SenML Content-Format identifiers for CoAP
pub mod content_format {
    /// application/senml+json
    pub const SENML_JSON: u16 = 110;
    /// application/sensml+json
    pub const SENSML_JSON: u16 = 111;
    /// application/senml+cbor
    pub const SENML_CBOR: u16 = 112;
    /// application/sensml+cbor
    pub const SENSML_CBOR: u16 = 113;
    /// application/senml-exi
    pub const SENML_EXI: u16 = 114;
    /// application/sensml-exi
    pub const SENSML_EXI: u16 = 115;
    /// application/senml+xml
    pub const SENML_XML: u16 = 310;
    /// application/sensml+xml
    pub const SENSML_XML: u16 = 311;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_resolve_encode() {
        let pack = decode(br#"[{"bn":"dev/","n":"temp","v":22.5}]"#, Format::Json).unwrap();
        let resolved = pack.resolve().unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.records[0].name, "dev/temp");

        let json = encode(&resolved, Format::Json).unwrap();
        assert_eq!(json, br#"[{"n":"dev/temp","v":22.5}]"#);
    }
}
