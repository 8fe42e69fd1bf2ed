//! Business logic and service layer modules.
//!
//! The forecast aggregator, the upstream clients, and the orchestration that
//! joins them into one dashboard response.

pub mod aggregator;
pub mod aqi;
pub mod dashboard;
pub mod http_client;
pub mod metrics;
pub mod openweather;

pub use aqi::*;
pub use dashboard::*;
pub use http_client::*;
pub use metrics::*;
pub use openweather::*;
