//! Core data model for the reservoir twin.

mod dataset;
mod forecast;
mod metrics;

pub use dataset::*;
pub use forecast::*;
pub use metrics::*;
