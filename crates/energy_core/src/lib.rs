//! Home energy coach domain primitives.
//!
//! This crate owns the record model, the CSV-to-record conversion, the
//! aggregate summary math, and the shape of the persisted summary row. It
//! intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod env_vars;
pub mod greeting;
pub mod item;
pub mod keys;
pub mod reading;
pub mod summary;

pub use reading::{parse_readings, readings_to_json, Appliance, EnergyReading, ReadingError};
pub use summary::{summarize, EnergySummary, SummaryError};
