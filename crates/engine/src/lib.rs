//! State and simulation engine for the transit operations dashboard.
//!
//! This crate contains:
//! - The dashboard state store and its transition messages
//! - Periodic simulators for fleet telemetry and the activity feed
//! - The bounded notification queue and the device filter projection
//! - The on-demand device analysis task and the failure supervisor

pub mod activity;
pub mod analysis;
pub mod filter;
pub mod kpi;
pub mod notification;
pub mod sim;
pub mod state;
pub mod store;
pub mod supervisor;
pub mod telemetry;

pub use state::{Action, DashboardState, Tab, Timeframe, ViewMode};
pub use store::{DashboardView, Store};
pub use supervisor::{FailureReport, Supervisor};
