//! Resolved SenML packs - base attributes applied, times absolute

use std::collections::BTreeMap;

use crate::record::decode_data;
use serde::{Deserialize, Serialize};

use crate::{RawPack, RawRecord, Value};

/// A pack in resolved form, sorted chronologically
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedPack {
    /// Records sorted by time, undated records first
    pub records: Vec<ResolvedRecord>,
}

/// A record with every base attribute folded in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    /// Base name + name
    #[serde(rename = "n")]
    pub name: String,

    /// Record unit, or the base unit
    #[serde(rename = "u", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Base value + value
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(rename = "vb", default, skip_serializing_if = "Option::is_none")]
    pub bool_value: Option<bool>,

    #[serde(rename = "vs", default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,

    #[serde(rename = "vd", default, skip_serializing_if = "Option::is_none")]
    pub data_value: Option<String>,

    /// Base sum + sum
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,

    /// Absolute time in seconds since the Unix epoch
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,

    #[serde(rename = "ut", default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<f64>,

    /// Set only when the pack targets a version older than the resolver's
    #[serde(rename = "bver", default, skip_serializing_if = "Option::is_none")]
    pub base_version: Option<u32>,
}

impl ResolvedPack {
    /// Get the number of records in this pack
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if this pack is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedRecord> {
        self.records.iter()
    }

    /// Version stamped on the records, if the pack targets an older version
    pub fn version(&self) -> Option<u32> {
        self.records.first().and_then(|r| r.base_version)
    }

    /// Convert back to wire records. Base attributes are not reconstructed.
    pub fn to_raw(&self) -> RawPack {
        self.records.iter().map(ResolvedRecord::to_raw).collect()
    }

    /// Get all records whose name contains `pattern`
    pub fn records_matching(&self, pattern: &str) -> Vec<&ResolvedRecord> {
        self.records
            .iter()
            .filter(|record| record.name.contains(pattern))
            .collect()
    }

    /// Get all records with a time in `start..=end`
    pub fn records_in_time_range(&self, start: f64, end: f64) -> Vec<&ResolvedRecord> {
        self.records
            .iter()
            .filter(|record| record.time.is_some_and(|t| t >= start && t <= end))
            .collect()
    }

    /// Earliest and latest record time
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let mut times = self.records.iter().filter_map(|r| r.time);
        let first = times.next()?;
        Some(times.fold((first, first), |(min, max), t| (min.min(t), max.max(t))))
    }

    /// Group records by name prefix (everything before the last '/')
    pub fn group_by_prefix(&self) -> BTreeMap<&str, Vec<&ResolvedRecord>> {
        let mut groups: BTreeMap<&str, Vec<&ResolvedRecord>> = BTreeMap::new();

        for record in &self.records {
            let prefix = record
                .name
                .rfind('/')
                .map_or("", |pos| &record.name[..pos]);
            groups.entry(prefix).or_default().push(record);
        }

        groups
    }
}

impl ResolvedRecord {
    /// Get the primary value. Numeric values win over boolean, string and
    /// data values; a sum alone is not a primary value.
    pub fn primary_value(&self) -> Option<Value> {
        if let Some(v) = self.value {
            Some(Value::Number(v))
        } else if let Some(vb) = self.bool_value {
            Some(Value::Boolean(vb))
        } else if let Some(ref vs) = self.string_value {
            Some(Value::String(vs.clone()))
        } else {
            self.data_value.clone().map(Value::Data)
        }
    }

    /// Check if this record has any value field besides a sum
    pub fn has_value(&self) -> bool {
        self.value.is_some()
            || self.bool_value.is_some()
            || self.string_value.is_some()
            || self.data_value.is_some()
    }

    /// Decoded data value, if present and valid base64
    pub fn data_bytes(&self) -> Option<Vec<u8>> {
        self.data_value.as_deref().and_then(decode_data)
    }

    /// Get the base name (everything up to and including the last '/')
    pub fn base_name(&self) -> Option<&str> {
        self.name.rfind('/').map(|pos| &self.name[..pos + 1])
    }

    /// Get the local name (everything after the last '/')
    pub fn local_name(&self) -> &str {
        match self.name.rfind('/') {
            Some(pos) => &self.name[pos + 1..],
            None => &self.name,
        }
    }

    /// Wire form of this record
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            base_version: self.base_version,
            name: Some(self.name.clone()),
            unit: self.unit.clone(),
            value: self.value,
            bool_value: self.bool_value,
            string_value: self.string_value.clone(),
            data_value: self.data_value.clone(),
            sum: self.sum,
            time: self.time,
            update_time: self.update_time,
            ..Default::default()
        }
    }
}

impl<'a> IntoIterator for &'a ResolvedPack {
    type Item = &'a ResolvedRecord;
    type IntoIter = std::slice::Iter<'a, ResolvedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ResolvedPack {
    type Item = ResolvedRecord;
    type IntoIter = std::vec::IntoIter<ResolvedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
