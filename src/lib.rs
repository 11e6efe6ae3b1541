//! Best City CLI Library
//!
//! Ranks cities for a vacation from hourly weather forecasts. The modules are
//! exposed for use by the binary and by integration tests.

pub mod analysis;
pub mod cli;
pub mod conditions;
pub mod data;
pub mod pipeline;
pub mod report;
