//! XML representation (RFC 8428, section 7)
//!
//! A pack is a `<sensml>` root element in the SenML namespace holding one
//! empty `<senml>` element per record. Record fields are attributes named
//! after the short field tags.

use std::borrow::Cow;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use senml_core::{RawPack, RawRecord};

use crate::codec::ensure_finite;
use crate::{Error, Format, Result};

/// XML namespace of SenML documents
pub const NAMESPACE: &str = "urn:ietf:params:xml:ns:senml";

const ROOT: &str = "sensml";
const RECORD: &str = "senml";

fn invalid(message: impl Into<String>) -> Error {
    Error::decode(Format::Xml, message)
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(format!("attribute '{key}' is not a number: '{value}'")))
}

fn parse_float(key: &str, value: &str) -> Result<f64> {
    let number: f64 = parse_number(key, value)?;
    if !number.is_finite() {
        return Err(invalid(format!("attribute '{key}' is not a finite number: '{value}'")));
    }
    Ok(number)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(invalid(format!("attribute '{key}' is not a boolean: '{other}'"))),
    }
}

/// Read one `<senml>` element into a record.
///
/// Only unprefixed attributes are record fields. Namespace declarations,
/// prefixed attributes and unknown names are skipped.
fn parse_record(element: &BytesStart<'_>) -> Result<RawRecord> {
    let mut record = RawRecord::default();

    for attr in element.attributes() {
        let attr = attr.map_err(|e| invalid(e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() || attr.key.prefix().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value: Cow<'_, str> = attr.unescape_value()?;

        match key.as_str() {
            "bn" => record.base_name = Some(value.into_owned()),
            "bt" => record.base_time = Some(parse_float(&key, &value)?),
            "bu" => record.base_unit = Some(value.into_owned()),
            "bv" => record.base_value = Some(parse_float(&key, &value)?),
            "bs" => record.base_sum = Some(parse_float(&key, &value)?),
            "bver" => record.base_version = Some(parse_number(&key, &value)?),
            "n" => record.name = Some(value.into_owned()),
            "u" => record.unit = Some(value.into_owned()),
            "v" => record.value = Some(parse_float(&key, &value)?),
            "vb" => record.bool_value = Some(parse_bool(&key, &value)?),
            "vs" => record.string_value = Some(value.into_owned()),
            "vd" => record.data_value = Some(value.into_owned()),
            "s" => record.sum = Some(parse_float(&key, &value)?),
            "t" => record.time = Some(parse_float(&key, &value)?),
            "ut" => record.update_time = Some(parse_float(&key, &value)?),
            "l" => record.link = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok(record)
}

/// Decode a `<sensml>` document
pub fn decode(bytes: &[u8]) -> Result<RawPack> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        buf.clear();
        let (element, has_children) = match reader.read_event_into(&mut buf)? {
            Event::Start(e) => (e, true),
            Event::Empty(e) => (e, false),
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        let local_name = element.local_name();
        match depth {
            0 if seen_root => return Err(invalid("more than one root element")),
            0 if local_name.as_ref() == ROOT.as_bytes() => seen_root = true,
            0 => {
                return Err(invalid(format!(
                    "expected <{ROOT}> root element, found <{}>",
                    String::from_utf8_lossy(local_name.as_ref())
                )));
            }
            1 if local_name.as_ref() == RECORD.as_bytes() => records.push(parse_record(&element)?),
            _ => {
                return Err(invalid(format!(
                    "unexpected element <{}>",
                    String::from_utf8_lossy(local_name.as_ref())
                )));
            }
        }

        if has_children {
            depth += 1;
        }
    }

    if !seen_root {
        return Err(invalid(format!("missing <{ROOT}> root element")));
    }
    if depth != 0 {
        return Err(invalid("unexpected end of document"));
    }

    Ok(RawPack::from(records))
}

/// Present attributes of `record`, in tag order
fn attributes(record: &RawRecord) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    let mut put = |key: &'static str, value: Option<String>| {
        if let Some(value) = value {
            attrs.push((key, value));
        }
    };

    put("bn", record.base_name.clone());
    put("bt", record.base_time.map(|v| v.to_string()));
    put("bu", record.base_unit.clone());
    put("bv", record.base_value.map(|v| v.to_string()));
    put("bs", record.base_sum.map(|v| v.to_string()));
    put("bver", record.base_version.map(|v| v.to_string()));
    put("n", record.name.clone());
    put("u", record.unit.clone());
    put("v", record.value.map(|v| v.to_string()));
    put("vb", record.bool_value.map(|v| v.to_string()));
    put("vs", record.string_value.clone());
    put("vd", record.data_value.clone());
    put("s", record.sum.map(|v| v.to_string()));
    put("t", record.time.map(|v| v.to_string()));
    put("ut", record.update_time.map(|v| v.to_string()));
    put("l", record.link.clone());

    attrs
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::encode(Format::Xml, e.to_string()))
}

/// Encode records as a `<sensml>` document
///
/// Fails on NaN and infinities, which the schema's `double` type excludes.
pub fn encode(records: &[RawRecord], pretty: bool) -> Result<Vec<u8>> {
    ensure_finite(records, Format::Xml)?;

    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };

    let mut root = BytesStart::new(ROOT);
    root.push_attribute(("xmlns", NAMESPACE));

    if records.is_empty() {
        write(&mut writer, Event::Empty(root))?;
        return Ok(writer.into_inner());
    }

    write(&mut writer, Event::Start(root))?;
    for record in records {
        let mut element = BytesStart::new(RECORD);
        for (key, value) in attributes(record) {
            element.push_attribute((key, value.as_str()));
        }
        write(&mut writer, Event::Empty(element))?;
    }
    write(&mut writer, Event::End(BytesEnd::new(ROOT)))?;

    Ok(writer.into_inner())
}
