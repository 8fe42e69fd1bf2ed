//! Data models and schemas for the Smogcast API.
//!
//! Request/response models served to the dashboard, the AQI band table, and
//! the raw payload shapes consumed from the upstream sources.

pub mod api;
pub mod aqi;
pub mod upstream;
pub mod weather;

pub use api::*;
pub use aqi::*;
pub use weather::*;
