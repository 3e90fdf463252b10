//! Base-attribute resolution
//!
//! Resolution is a single left-to-right fold over the raw records. A
//! [`BaseState`] accumulator carries the latest base attributes forward and
//! every step builds a fresh [`ResolvedRecord`]. Once all records are folded
//! the pack version is stamped (when older than the resolver's) and records
//! are stably sorted by time.

use std::cmp::Ordering;

use crate::clock::{Clock, SystemClock, to_absolute};
use crate::name::validate_name;
use crate::{Config, RawPack, RawRecord, ResolveError, ResolvedPack, ResolvedRecord, Result};

/// Base attributes in effect at some point of the fold.
///
/// Slots are replaced, never merged, whenever a record carries the matching
/// base attribute. A slot holding `Some(0.0)` is set and stays distinct from
/// an unset slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseState {
    pub name: Option<String>,
    pub time: Option<f64>,
    pub unit: Option<String>,
    pub value: Option<f64>,
    pub sum: Option<f64>,
}

impl BaseState {
    /// Take over every base attribute present on `record`
    pub fn update(&mut self, record: &RawRecord) {
        if let Some(ref bn) = record.base_name {
            self.name = Some(bn.clone());
        }
        if let Some(bt) = record.base_time {
            self.time = Some(bt);
        }
        if let Some(ref bu) = record.base_unit {
            self.unit = Some(bu.clone());
        }
        if let Some(bv) = record.base_value {
            self.value = Some(bv);
        }
        if let Some(bs) = record.base_sum {
            self.sum = Some(bs);
        }
    }

    /// Base name followed by the record's own name
    pub fn name_for(&self, record: &RawRecord) -> String {
        let base = self.name.as_deref().unwrap_or_default();
        let own = record.name.as_deref().unwrap_or_default();
        format!("{base}{own}")
    }
}

/// Base + own contribution, present when either side is
fn accumulate(base: Option<f64>, own: Option<f64>) -> Option<f64> {
    match (base, own) {
        (None, None) => None,
        (base, own) => Some(base.unwrap_or(0.0) + own.unwrap_or(0.0)),
    }
}

/// Undated records first, then ascending time
fn chronological(a: &ResolvedRecord, b: &ResolvedRecord) -> Ordering {
    match (a.time, b.time) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

/// Tracks the pack version across records
#[derive(Debug, Clone, Copy)]
struct VersionCheck {
    max: u32,
    adopted: Option<u32>,
}

impl VersionCheck {
    fn new(max: u32) -> Self {
        Self { max, adopted: None }
    }

    fn observe(&mut self, index: usize, record: &RawRecord) -> Result<()> {
        let Some(version) = record.base_version else {
            return Ok(());
        };

        if version > self.max {
            return Err(ResolveError::UnsupportedVersion {
                index,
                version,
                max: self.max,
            });
        }

        match self.adopted {
            None => self.adopted = Some(version),
            Some(expected) if expected != version => {
                return Err(ResolveError::InconsistentVersion {
                    index,
                    expected,
                    found: version,
                });
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Version to stamp on resolved records, if the pack targets an older one
    fn stamp(&self) -> Option<u32> {
        self.adopted.filter(|&v| v < self.max)
    }
}

/// Resolves raw packs.
///
/// A resolver holds only its configuration and clock, so one instance can
/// serve any number of packs, from any number of threads when the clock
/// allows it.
#[derive(Debug, Clone, Default)]
pub struct Resolver<C = SystemClock> {
    config: Config,
    clock: C,
}

impl Resolver {
    /// Resolver with the default config and the system clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with `config` and the system clock
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Resolver<C> {
    /// Resolver with `config` reading time from `clock`
    pub fn with_clock(config: Config, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve `pack`, failing on the first invalid record.
    pub fn resolve(&self, pack: &RawPack) -> Result<ResolvedPack> {
        let now = self.clock.now();

        let outcome = self.fold(pack, now);
        match &outcome {
            Ok(resolved) => tracing::debug!(
                records = resolved.len(),
                version = ?resolved.version(),
                "resolved SenML pack"
            ),
            Err(e) => tracing::debug!(index = e.index(), error = %e, "rejected SenML pack"),
        }
        outcome
    }

    fn fold(&self, pack: &RawPack, now: f64) -> Result<ResolvedPack> {
        let mut base = BaseState::default();
        let mut version = VersionCheck::new(self.config.max_version);
        let mut records = Vec::with_capacity(pack.len());

        for (index, record) in pack.iter().enumerate() {
            version.observe(index, record)?;
            base.update(record);
            records.push(resolve_record(index, record, &base, now)?);
        }

        if let Some(stamp) = version.stamp() {
            for record in &mut records {
                record.base_version = Some(stamp);
            }
        }

        records.sort_by(chronological);

        Ok(ResolvedPack { records })
    }
}

/// Resolve one record against the base attributes in effect for it
fn resolve_record(
    index: usize,
    record: &RawRecord,
    base: &BaseState,
    now: f64,
) -> Result<ResolvedRecord> {
    let name = base.name_for(record);
    validate_name(index, &name)?;

    let time = accumulate(base.time, record.time).map(|t| {
        let absolute = to_absolute(t, now);
        if absolute != t {
            tracing::trace!(index, relative = t, absolute, "anchored relative time");
        }
        absolute
    });

    let resolved = ResolvedRecord {
        unit: record.unit.clone().or_else(|| base.unit.clone()),
        value: accumulate(base.value, record.value),
        bool_value: record.bool_value,
        string_value: record.string_value.clone(),
        data_value: record.data_value.clone(),
        sum: accumulate(base.sum, record.sum),
        time,
        update_time: record.update_time,
        base_version: None,
        name,
    };

    if !resolved.has_value() && resolved.sum.is_none() {
        return Err(ResolveError::missing_value(index, resolved.name));
    }

    Ok(resolved)
}

/// Resolve `pack` with the default config and the system clock
pub fn resolve(pack: &RawPack) -> Result<ResolvedPack> {
    Resolver::new().resolve(pack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    const NOW: f64 = 1_700_000_000.0;

    fn resolver() -> Resolver<FixedClock> {
        Resolver::with_clock(Config::default(), FixedClock(NOW))
    }

    fn raw(json: &str) -> RawPack {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_base_name_is_inherited_forward() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"n":"first","v":0},{"bn":"A","v":1},{"v":2}]"#))
            .unwrap();

        let names: Vec<_> = resolved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["first", "A", "A"]);
    }

    #[test]
    fn test_base_name_replaced_not_merged() {
        let resolved = resolver()
            .resolve(&raw(
                r#"[{"bn":"a/","n":"x","v":1},{"bn":"b/","n":"y","v":2},{"n":"z","v":3}]"#,
            ))
            .unwrap();

        let names: Vec<_> = resolved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a/x", "b/y", "b/z"]);
    }

    #[test]
    fn test_value_is_additive() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bv":1,"bn":"x","v":0},{"v":2}]"#))
            .unwrap();

        let values: Vec<_> = resolved.iter().map(|r| r.value).collect();
        assert_eq!(values, [Some(1.0), Some(3.0)]);
    }

    #[test]
    fn test_base_value_applies_without_own_value() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"x","bv":5,"vb":true}]"#))
            .unwrap();

        assert_eq!(resolved.records[0].value, Some(5.0));
        assert_eq!(resolved.records[0].bool_value, Some(true));
    }

    #[test]
    fn test_zero_base_value_counts_as_set() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"x","bv":0,"vs":"on"}]"#))
            .unwrap();

        assert_eq!(resolved.records[0].value, Some(0.0));
    }

    #[test]
    fn test_untouched_value_stays_absent() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"n":"x","vs":"on"}]"#))
            .unwrap();

        let record = &resolved.records[0];
        assert_eq!(record.value, None);
        assert_eq!(record.sum, None);
        assert_eq!(record.time, None);
    }

    #[test]
    fn test_sum_is_additive() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"meter","bs":100,"s":5},{"s":7}]"#))
            .unwrap();

        let sums: Vec<_> = resolved.iter().map(|r| r.sum).collect();
        assert_eq!(sums, [Some(105.0), Some(107.0)]);
    }

    #[test]
    fn test_unit_overrides() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bu":"C","bn":"x","v":0},{"u":"F","v":1},{"v":2}]"#))
            .unwrap();

        let units: Vec<_> = resolved.iter().map(|r| r.unit.as_deref()).collect();
        assert_eq!(units, [Some("C"), Some("F"), Some("C")]);
    }

    #[test]
    fn test_relative_time_anchored_at_now() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"n":"x","t":-5,"v":1}]"#))
            .unwrap();

        assert_eq!(resolved.records[0].time, Some(NOW - 5.0));
    }

    #[test]
    fn test_time_threshold_boundary() {
        let resolved = resolver()
            .resolve(&raw(
                r#"[{"n":"abs","t":268435456,"v":1},{"n":"rel","t":268435455,"v":2}]"#,
            ))
            .unwrap();

        let abs = resolved.records_matching("abs")[0];
        let rel = resolved.records_matching("rel")[0];
        assert_eq!(abs.time, Some(268_435_456.0));
        assert_eq!(rel.time, Some(268_435_455.0 + NOW));
    }

    #[test]
    fn test_base_time_plus_relative_offset() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"x","bt":1276020076,"t":-5,"v":1},{"v":2}]"#))
            .unwrap();

        let times: Vec<_> = resolved.iter().map(|r| r.time).collect();
        assert_eq!(times, [Some(1_276_020_071.0), Some(1_276_020_076.0)]);
    }

    #[test]
    fn test_update_time_passes_through() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"x","bt":1276020076,"ut":10,"v":1}]"#))
            .unwrap();

        assert_eq!(resolved.records[0].update_time, Some(10.0));
    }

    #[test]
    fn test_name_errors() {
        let r = resolver();
        assert_eq!(
            r.resolve(&raw(r#"[{"n":"-test","v":1}]"#)),
            Err(ResolveError::invalid_name_start(0, "-test"))
        );
        assert_eq!(
            r.resolve(&raw(r#"[{"n":"ok","v":1},{"n":"test(","v":1}]"#)),
            Err(ResolveError::invalid_name_characters(1, "test("))
        );
        assert_eq!(
            r.resolve(&raw(r#"[{"n":"","v":1}]"#)),
            Err(ResolveError::EmptyName { index: 0 })
        );
        assert_eq!(
            r.resolve(&raw(r#"[{"v":1}]"#)),
            Err(ResolveError::EmptyName { index: 0 })
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            resolver().resolve(&raw(r#"[{"n":"x","u":"V"}]"#)),
            Err(ResolveError::missing_value(0, "x"))
        );
    }

    #[test]
    fn test_sum_alone_is_enough() {
        assert!(resolver().resolve(&raw(r#"[{"n":"x","s":1}]"#)).is_ok());
    }

    #[test]
    fn test_first_error_wins() {
        let err = resolver()
            .resolve(&raw(r#"[{"n":"a","v":1},{"n":"-b"},{"n":""}]"#))
            .unwrap_err();
        assert_eq!(err, ResolveError::invalid_name_start(1, "-b"));
    }

    #[test]
    fn test_version_stamped_when_older() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"x","bver":5,"v":1},{"bver":5,"v":2}]"#))
            .unwrap();

        assert!(resolved.iter().all(|r| r.base_version == Some(5)));
        assert_eq!(resolved.version(), Some(5));
    }

    #[test]
    fn test_version_stamped_from_later_record() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"x","v":1},{"bver":5,"v":2}]"#))
            .unwrap();

        assert!(resolved.iter().all(|r| r.base_version == Some(5)));
    }

    #[test]
    fn test_version_absent_by_default() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"x","v":1},{"v":2}]"#))
            .unwrap();
        assert!(resolved.iter().all(|r| r.base_version.is_none()));

        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"x","bver":10,"v":1}]"#))
            .unwrap();
        assert_eq!(resolved.version(), None);
    }

    #[test]
    fn test_inconsistent_version() {
        assert_eq!(
            resolver().resolve(&raw(r#"[{"bn":"x","bver":5,"v":1},{"bver":6,"v":2}]"#)),
            Err(ResolveError::InconsistentVersion {
                index: 1,
                expected: 5,
                found: 6
            })
        );
    }

    #[test]
    fn test_unsupported_version() {
        assert_eq!(
            resolver().resolve(&raw(r#"[{"bn":"x","bver":11,"v":1}]"#)),
            Err(ResolveError::UnsupportedVersion {
                index: 0,
                version: 11,
                max: 10
            })
        );
    }

    #[test]
    fn test_configured_max_version() {
        let r = Resolver::with_clock(Config::default().max_version(4), FixedClock(NOW));
        assert!(matches!(
            r.resolve(&raw(r#"[{"bn":"x","bver":5,"v":1}]"#)),
            Err(ResolveError::UnsupportedVersion { max: 4, .. })
        ));

        let resolved = r.resolve(&raw(r#"[{"bn":"x","bver":3,"v":1}]"#)).unwrap();
        assert_eq!(resolved.version(), Some(3));
    }

    #[test]
    fn test_chronological_stable_sort() {
        let resolved = resolver()
            .resolve(&raw(r#"[{"bn":"x","t":4,"v":4},{"v":1},{"v":2},{"t":3,"v":3}]"#))
            .unwrap();

        let values: Vec<_> = resolved.iter().filter_map(|r| r.value).collect();
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_equal_times_keep_input_order() {
        let resolved = resolver()
            .resolve(&raw(
                r#"[{"bn":"x","bt":1300000000,"t":1,"v":1},{"t":0,"v":2},{"t":1,"v":3},{"t":0,"v":4}]"#,
            ))
            .unwrap();

        let values: Vec<_> = resolved.iter().filter_map(|r| r.value).collect();
        assert_eq!(values, [2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn test_base_state_tracks_presence() {
        let mut base = BaseState::default();
        base.update(&RawRecord {
            base_value: Some(0.0),
            ..Default::default()
        });
        assert_eq!(base.value, Some(0.0));

        base.update(&RawRecord::default());
        assert_eq!(base.value, Some(0.0));
    }
}
