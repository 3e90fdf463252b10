//! Builder pattern for creating raw SenML packs

use crate::{RawPack, RawRecord};

/// Builder for creating SenML packs with a fluent API.
///
/// Base attributes are written as real base fields on the first record, so
/// the built pack has to be resolved to see them applied.
#[derive(Debug, Default)]
pub struct SenMLBuilder {
    base_name: Option<String>,
    base_time: Option<f64>,
    base_unit: Option<String>,
    base_value: Option<f64>,
    base_sum: Option<f64>,
    base_version: Option<u32>,
    records: Vec<RawRecord>,
}

impl SenMLBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base name for all records
    pub fn base_name<S: Into<String>>(mut self, name: S) -> Self {
        self.base_name = Some(name.into());
        self
    }

    /// Set the base time for all records
    pub fn base_time(mut self, time: f64) -> Self {
        self.base_time = Some(time);
        self
    }

    /// Set the base unit for all records
    pub fn base_unit<S: Into<String>>(mut self, unit: S) -> Self {
        self.base_unit = Some(unit.into());
        self
    }

    /// Set the base value to add to all numeric values
    pub fn base_value(mut self, value: f64) -> Self {
        self.base_value = Some(value);
        self
    }

    /// Set the base sum
    pub fn base_sum(mut self, sum: f64) -> Self {
        self.base_sum = Some(sum);
        self
    }

    /// Declare the SenML version the pack targets
    pub fn base_version(mut self, version: u32) -> Self {
        self.base_version = Some(version);
        self
    }

    /// Add a record with a numeric value
    pub fn add_value<S: Into<String>>(mut self, name: S, value: f64) -> Self {
        self.records.push(RawRecord::with_value(name, value));
        self
    }

    /// Add a record with a string value
    pub fn add_string_value<S: Into<String>, V: Into<String>>(mut self, name: S, value: V) -> Self {
        self.records.push(RawRecord::with_string_value(name, value));
        self
    }

    /// Add a record with a boolean value
    pub fn add_bool_value<S: Into<String>>(mut self, name: S, value: bool) -> Self {
        self.records.push(RawRecord::with_bool_value(name, value));
        self
    }

    /// Add a record with binary data
    pub fn add_data_value<S: Into<String>>(mut self, name: S, data: &[u8]) -> Self {
        self.records.push(RawRecord::with_data_value(name, data));
        self
    }

    /// Add a measurement with a (relative or absolute) timestamp
    pub fn add_measurement<S: Into<String>>(mut self, name: S, value: f64, time: f64) -> Self {
        self.records
            .push(RawRecord::with_value(name, value).with_time(time));
        self
    }

    /// Add a measurement with unit and timestamp
    pub fn add_measurement_with_unit<S: Into<String>, U: Into<String>>(
        mut self,
        name: S,
        value: f64,
        unit: U,
        time: f64,
    ) -> Self {
        self.records.push(
            RawRecord::with_value(name, value)
                .with_unit(unit)
                .with_time(time),
        );
        self
    }

    /// Add a sum measurement
    pub fn add_sum<S: Into<String>>(mut self, name: S, sum: f64, time: f64) -> Self {
        self.records
            .push(RawRecord::with_sum_value(name, sum).with_time(time));
        self
    }

    /// Add an existing record
    pub fn add_record(mut self, record: RawRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Add multiple records at once
    pub fn add_records<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        self.records.extend(records);
        self
    }

    /// Build the SenML pack.
    ///
    /// Base attributes travel on the first record. With no records added
    /// there is nothing to carry them, so they are dropped and the pack is
    /// empty: a lone base record would fail resolution for lack of a value.
    pub fn build(self) -> RawPack {
        let mut records = self.records;

        if let Some(first) = records.first_mut() {
            // Builder settings win over base fields on an added record
            first.base_name = self.base_name.or(first.base_name.take());
            first.base_time = self.base_time.or(first.base_time);
            first.base_unit = self.base_unit.or(first.base_unit.take());
            first.base_value = self.base_value.or(first.base_value);
            first.base_sum = self.base_sum.or(first.base_sum);
            first.base_version = self.base_version.or(first.base_version);
        }

        RawPack { records }
    }
}

/// Specialized builder for one sensor's time series
#[derive(Debug)]
pub struct TimeSeriesBuilder {
    base_name: String,
    base_time: f64,
    base_unit: Option<String>,
    /// `(offset from base time, value)`
    measurements: Vec<(f64, f64)>,
}

impl TimeSeriesBuilder {
    /// Create a new time series builder
    pub fn new<S: Into<String>>(base_name: S, base_time: f64) -> Self {
        Self {
            base_name: base_name.into(),
            base_time,
            base_unit: None,
            measurements: Vec::new(),
        }
    }

    /// Set the unit for all measurements
    pub fn unit<S: Into<String>>(mut self, unit: S) -> Self {
        self.base_unit = Some(unit.into());
        self
    }

    /// Add a measurement at a time relative to the base time
    pub fn measurement(mut self, relative_time: f64, value: f64) -> Self {
        self.measurements.push((relative_time, value));
        self
    }

    /// Add measurements from an iterator
    pub fn measurements<I>(mut self, measurements: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.measurements.extend(measurements);
        self
    }

    /// Build the time series pack
    pub fn build(self) -> RawPack {
        let Self {
            base_name,
            base_time,
            base_unit,
            measurements,
        } = self;

        let records = measurements.into_iter().map(|(time, value)| RawRecord {
            value: Some(value),
            time: Some(time),
            ..Default::default()
        });

        SenMLBuilder {
            base_name: Some(base_name),
            base_time: Some(base_time),
            base_unit,
            ..Default::default()
        }
        .add_records(records)
        .build()
    }
}
