//! Forecast analysis
//!
//! Filtering to a date range and hour window, per-date and per-city scoring,
//! and ranking of the scored cities.

mod filter;
mod ranking;
mod scoring;

pub use filter::{DateRange, Filter, HourWindow, RangeError, DEFAULT_END_HOUR, DEFAULT_START_HOUR};
pub use ranking::{rank, RankedResultSet};
pub use scoring::{aggregate_dates, score_city, score_date, ScoreError};
