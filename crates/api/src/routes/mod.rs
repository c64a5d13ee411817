//! HTTP route handlers.

pub mod cities;
pub mod dashboard;
pub mod devices;
pub mod dispatch;
pub mod health;
pub mod recovery;
