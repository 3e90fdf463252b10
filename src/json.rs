//! JSON representation (RFC 8428, section 5)
//!
//! A pack is a JSON array of objects keyed by the short field tags.

use senml_core::{RawPack, RawRecord};

use crate::codec::ensure_finite;
use crate::{Error, Format, Result};

/// Decode a JSON array of records
pub fn decode(bytes: &[u8]) -> Result<RawPack> {
    let records: Vec<RawRecord> = serde_json::from_slice(bytes)?;
    Ok(RawPack::from(records))
}

/// Encode records as a JSON array
///
/// Fails on NaN and infinities, which JSON would otherwise write as `null`.
pub fn encode(records: &[RawRecord], pretty: bool) -> Result<Vec<u8>> {
    ensure_finite(records, Format::Json)?;

    let encoded = if pretty {
        serde_json::to_vec_pretty(records)
    } else {
        serde_json::to_vec(records)
    };
    encoded.map_err(|e| Error::encode(Format::Json, e.to_string()))
}
