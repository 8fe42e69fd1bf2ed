//! HTTP request handlers for API endpoints.

pub mod aqi;
pub mod health;
pub mod metrics;
pub mod openapi;
pub mod version;
pub mod weather;

pub use aqi::*;
pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use version::*;
pub use weather::*;
