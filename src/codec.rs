//! Format dispatch between wire bytes and packs

use std::borrow::Cow;

use senml_core::{RawPack, RawRecord, ResolvedPack, Resolver};

use crate::{Error, Format, Result};

/// A pack that can be written to the wire
pub trait WirePack {
    /// Records in the order they are written
    fn wire_records(&self) -> Cow<'_, [RawRecord]>;
}

impl WirePack for RawPack {
    fn wire_records(&self) -> Cow<'_, [RawRecord]> {
        Cow::Borrowed(&self.records)
    }
}

impl WirePack for ResolvedPack {
    fn wire_records(&self) -> Cow<'_, [RawRecord]> {
        Cow::Owned(self.to_raw().records)
    }
}

/// Encoder settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Pretty-print JSON / indent XML
    pub pretty: bool,
}

impl EncodeOptions {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// Refuse records holding numbers the wire formats cannot represent
pub(crate) fn ensure_finite(records: &[RawRecord], format: Format) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if let Some(tag) = record.non_finite_field() {
            return Err(Error::encode(
                format,
                format!("record {index}: '{tag}' is not a finite number"),
            ));
        }
    }
    Ok(())
}

fn disabled(format: Format) -> Error {
    Error::unsupported_format(format!("{format} (feature disabled)"))
}

/// Decode `bytes` into a raw pack, keeping record order
pub fn decode(bytes: &[u8], format: Format) -> Result<RawPack> {
    let decoded: Result<RawPack> = match format {
        #[cfg(feature = "json")]
        Format::Json => crate::json::decode(bytes),
        #[cfg(feature = "xml")]
        Format::Xml => crate::xml::decode(bytes),
        #[allow(unreachable_patterns)]
        other => Err(disabled(other)),
    };

    match &decoded {
        Ok(pack) => tracing::debug!(
            %format,
            bytes = bytes.len(),
            records = pack.len(),
            "decoded SenML pack"
        ),
        Err(e) => tracing::warn!(
            %format,
            bytes = bytes.len(),
            error = %e,
            "failed to decode SenML pack"
        ),
    }
    decoded
}

/// Encode a raw or resolved pack in compact form
pub fn encode<P: WirePack + ?Sized>(pack: &P, format: Format) -> Result<Vec<u8>> {
    encode_with(pack, format, EncodeOptions::default())
}

/// Encode a raw or resolved pack
pub fn encode_with<P: WirePack + ?Sized>(
    pack: &P,
    format: Format,
    options: EncodeOptions,
) -> Result<Vec<u8>> {
    let records = pack.wire_records();

    let encoded: Vec<u8> = match format {
        #[cfg(feature = "json")]
        Format::Json => crate::json::encode(&records, options.pretty),
        #[cfg(feature = "xml")]
        Format::Xml => crate::xml::encode(&records, options.pretty),
        #[allow(unreachable_patterns)]
        other => Err(disabled(other)),
    }?;

    tracing::debug!(
        %format,
        records = records.len(),
        bytes = encoded.len(),
        "encoded SenML pack"
    );
    Ok(encoded)
}

/// Decode `bytes` and resolve the pack with `resolver`
pub fn decode_and_resolve_with<C: senml_core::Clock>(
    bytes: &[u8],
    format: Format,
    resolver: &Resolver<C>,
) -> Result<ResolvedPack> {
    let pack = decode(bytes, format)?;
    Ok(resolver.resolve(&pack)?)
}

/// Decode `bytes` and resolve the pack with the default resolver
pub fn decode_and_resolve(bytes: &[u8], format: Format) -> Result<ResolvedPack> {
    decode_and_resolve_with(bytes, format, &Resolver::new())
}
