//! Raw SenML records and values

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

/// A SenML record exactly as it appeared on the wire, before base attributes
/// are applied.
///
/// Nothing is validated here: any combination of fields is representable,
/// including records with no name or no value. The resolver decides whether
/// the record makes sense in the context of its pack.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Base Name - prepended to this and following record names
    #[serde(rename = "bn", default, skip_serializing_if = "Option::is_none")]
    pub base_name: Option<String>,

    /// Base Time - added to this and following record times
    #[serde(rename = "bt", default, skip_serializing_if = "Option::is_none")]
    pub base_time: Option<f64>,

    /// Base Unit - used when a record has no unit of its own
    #[serde(rename = "bu", default, skip_serializing_if = "Option::is_none")]
    pub base_unit: Option<String>,

    /// Base Value - added to numeric values
    #[serde(rename = "bv", default, skip_serializing_if = "Option::is_none")]
    pub base_value: Option<f64>,

    /// Base Sum - added to sums
    #[serde(rename = "bs", default, skip_serializing_if = "Option::is_none")]
    pub base_sum: Option<f64>,

    /// Base Version - SenML version of the pack
    #[serde(rename = "bver", default, skip_serializing_if = "Option::is_none")]
    pub base_version: Option<u32>,

    /// Name - identifies the sensor or parameter
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Unit - SI unit or registered unit symbol
    #[serde(rename = "u", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Value - numeric measurement value
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Boolean Value
    #[serde(rename = "vb", default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,

    /// String Value
    #[serde(rename = "vs", default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,

    /// Data Value - base64 payload, carried as an opaque string
    #[serde(rename = "vd", default, skip_serializing_if = "Option::is_none")]
    pub data_value: Option<String>,

    /// Sum - integrated sum of values over time
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,

    /// Time - relative to base time, or absolute when at least 2^28
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,

    /// Update Time - maximum seconds before the next reading
    #[serde(rename = "ut", default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<f64>,

    /// Link - opaque link description, kept on the wire but never resolved
    #[serde(rename = "l", default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// The primary value carried by a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// String value
    String(String),
    /// Data value, still base64 encoded
    Data(String),
}

impl RawRecord {
    /// Create a new empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record with a numeric value
    pub fn with_value<S: Into<String>>(name: S, value: f64) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value),
            ..Default::default()
        }
    }

    /// Create a record with a string value
    pub fn with_string_value<S: Into<String>, V: Into<String>>(name: S, value: V) -> Self {
        Self {
            name: Some(name.into()),
            string_value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Create a record with a boolean value
    pub fn with_bool_value<S: Into<String>>(name: S, value: bool) -> Self {
        Self {
            name: Some(name.into()),
            bool_value: Some(value),
            ..Default::default()
        }
    }

    /// Create a record carrying binary data, encoded as URL-safe base64
    pub fn with_data_value<S: Into<String>>(name: S, data: &[u8]) -> Self {
        Self {
            name: Some(name.into()),
            data_value: Some(URL_SAFE_NO_PAD.encode(data)),
            ..Default::default()
        }
    }

    /// Create a record with only a sum
    pub fn with_sum_value<S: Into<String>>(name: S, sum: f64) -> Self {
        Self {
            name: Some(name.into()),
            sum: Some(sum),
            ..Default::default()
        }
    }

    /// Set the name of this record
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the unit of this record
    pub fn with_unit<S: Into<String>>(mut self, unit: S) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the time of this record
    pub fn with_time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    /// Set the sum of this record
    pub fn with_sum(mut self, sum: f64) -> Self {
        self.sum = Some(sum);
        self
    }

    /// Set the update time of this record
    pub fn with_update_time(mut self, update_time: f64) -> Self {
        self.update_time = Some(update_time);
        self
    }

    /// Set the link of this record
    pub fn with_link<S: Into<String>>(mut self, link: S) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Tag of the first numeric field holding NaN or an infinity.
    ///
    /// Neither JSON nor the SenML XML schema can carry such numbers.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("bt", self.base_time),
            ("bv", self.base_value),
            ("bs", self.base_sum),
            ("v", self.value),
            ("s", self.sum),
            ("t", self.time),
            ("ut", self.update_time),
        ]
        .into_iter()
        .find_map(|(tag, number)| number.filter(|n| !n.is_finite()).map(|_| tag))
    }

    /// Whether any base attribute is present on this record
    pub fn has_base_fields(&self) -> bool {
        self.base_name.is_some()
            || self.base_time.is_some()
            || self.base_unit.is_some()
            || self.base_value.is_some()
            || self.base_sum.is_some()
            || self.base_version.is_some()
    }

    /// Whether any value-shaped field, sum included, is present
    pub fn has_value(&self) -> bool {
        self.value.is_some()
            || self.bool_value.is_some()
            || self.string_value.is_some()
            || self.data_value.is_some()
            || self.sum.is_some()
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Self {
                value: Some(n),
                ..Default::default()
            },
            Value::Boolean(b) => Self {
                bool_value: Some(b),
                ..Default::default()
            },
            Value::String(s) => Self {
                string_value: Some(s),
                ..Default::default()
            },
            Value::Data(d) => Self {
                data_value: Some(d),
                ..Default::default()
            },
        }
    }
}

/// Decode a `vd` payload. RFC 8428 uses URL-safe base64; trailing padding
/// is tolerated.
pub(crate) fn decode_data(data: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(data.trim_end_matches('=')).ok()
}
