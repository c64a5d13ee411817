//! Read-only configuration datasets for the transit ops backend.
//!
//! This crate provides the static reference data the engine consumes:
//! - City registry (operator metadata per deployment site)
//! - Per-city static device inventory summaries
//! - The sample device population used for predictive monitoring
//! - The canned activity-message catalog
//! - Tunable simulation constants and per-city metric baselines

pub mod cities;
pub mod inventory;
pub mod messages;
pub mod population;
pub mod tuning;

pub use cities::{CityId, CityInfo};
pub use inventory::{CityInventory, DeviceClassInventory};
pub use population::{Device, DeviceStatus, DeviceType, UsageLevel};
