//! Raw SenML pack - records in source order, base attributes unapplied

use serde::{Deserialize, Serialize};

use crate::{RawRecord, ResolvedPack, Resolver, Result};

/// An unresolved SenML pack.
///
/// Record order is significant: a base attribute applies to the record that
/// carries it and every record after it, so decoders must preserve the order
/// they read records in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPack {
    /// Records in wire order
    pub records: Vec<RawRecord>,
}

impl RawPack {
    /// Create a new empty pack
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Add a record to the end of this pack
    pub fn push(&mut self, record: RawRecord) {
        self.records.push(record);
    }

    /// Add multiple records to the end of this pack
    pub fn extend<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = RawRecord>,
    {
        self.records.extend(records);
    }

    /// Get the number of records in this pack
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if this pack is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in wire order
    pub fn iter(&self) -> impl Iterator<Item = &RawRecord> {
        self.records.iter()
    }

    /// Resolve this pack with the default resolver
    pub fn resolve(&self) -> Result<ResolvedPack> {
        Resolver::new().resolve(self)
    }
}

impl From<Vec<RawRecord>> for RawPack {
    fn from(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<RawRecord> for RawPack {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RawPack {
    type Item = RawRecord;
    type IntoIter = std::vec::IntoIter<RawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RawPack {
    type Item = &'a RawRecord;
    type IntoIter = std::slice::Iter<'a, RawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
