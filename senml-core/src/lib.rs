//! # SenML Core - resolving Sensor Measurement Lists
//!
//! The data model and resolution engine for
//! [RFC 8428](https://tools.ietf.org/html/rfc8428) Sensor Measurement Lists.
//!
//! A SenML pack is an ordered list of records. Base fields (`bn`, `bt`, `bu`,
//! `bv`, `bs`, `bver`) apply to the record carrying them and to every record
//! after it until replaced. Resolving a pack folds those base fields into each
//! record, anchors relative times at the current wall-clock time, checks names
//! and values against the RFC, and sorts the result chronologically.
//!
//! Wire formats live elsewhere: this crate starts from an already decoded
//! [`RawPack`] and produces a [`ResolvedPack`].
//!
//! ```rust
//! use senml_core::{RawPack, RawRecord, ResolveError};
//!
//! fn example() -> Result<(), ResolveError> {
//!     let pack: RawPack = vec![
//!         RawRecord {
//!             base_name: Some("urn:dev:ow:10e2073a01080063:".into()),
//!             base_time: Some(1_320_067_464.0),
//!             ..RawRecord::with_value("temp", 23.1).with_unit("Cel")
//!         },
//!         RawRecord::with_value("temp", 23.5).with_time(1.0),
//!     ]
//!     .into();
//!
//!     let resolved = pack.resolve()?;
//!     assert_eq!(resolved.records[1].name, "urn:dev:ow:10e2073a01080063:temp");
//!     assert_eq!(resolved.records[1].time, Some(1_320_067_465.0));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod builder;
pub mod clock;
pub mod config;
pub mod error;
pub mod name;
pub mod pack;
pub mod record;
pub mod resolve;
pub mod resolved;

// Re-export main types
pub use builder::{SenMLBuilder, TimeSeriesBuilder};
pub use clock::{Clock, FixedClock, RELATIVE_TIME_THRESHOLD, SystemClock};
pub use config::{Config, SENML_VERSION};
pub use error::{ResolveError, Result};
pub use pack::RawPack;
pub use record::{RawRecord, Value};
pub use resolve::{BaseState, Resolver, resolve};
pub use resolved::{ResolvedPack, ResolvedRecord};
