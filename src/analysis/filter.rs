//! Date range and hour window filtering
//!
//! Reduces a city's forecast to the days inside an inclusive date range and,
//! within each day, the hours inside an inclusive hour window. Days left
//! without hours are dropped so scoring never sees an empty day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::{FilteredCity, HourRecord, RawForecast};

/// Default first daytime hour
pub const DEFAULT_START_HOUR: u8 = 9;

/// Default last daytime hour
pub const DEFAULT_END_HOUR: u8 = 19;

/// Errors for invalid filter bounds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Start date after end date
    #[error("Start date {start} is after end date {end}")]
    InvertedDates { start: NaiveDate, end: NaiveDate },

    /// Start hour after end hour
    #[error("Start hour {start} is after end hour {end}")]
    InvertedHours { start: u8, end: u8 },

    /// Hour outside 0-23
    #[error("Hour {0} is outside 0-23")]
    HourOutOfRange(u8),

    /// Range long enough for two dates to share a `DD-MM` label
    #[error("Date range {start} to {end} must span less than a year")]
    RangeTooLong { start: NaiveDate, end: NaiveDate },
}

/// Longest allowed distance between the first and last date, in days
///
/// A date and the same day of the next year are at least 365 days apart.
const MAX_RANGE_DAYS: i64 = 364;

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvertedDates { start, end });
        }
        if (end - start).num_days() > MAX_RANGE_DAYS {
            return Err(RangeError::RangeTooLong { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Inclusive window of hours of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    start: u8,
    end: u8,
}

impl Default for HourWindow {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_HOUR,
            end: DEFAULT_END_HOUR,
        }
    }
}

impl HourWindow {
    pub fn new(start: u8, end: u8) -> Result<Self, RangeError> {
        if end > 23 {
            return Err(RangeError::HourOutOfRange(end));
        }
        if start > end {
            return Err(RangeError::InvertedHours { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    pub fn contains(&self, hour: u8) -> bool {
        self.start <= hour && hour <= self.end
    }
}

/// Filters forecasts to a date range and hour window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub range: DateRange,
    pub window: HourWindow,
}

impl Filter {
    pub fn new(range: DateRange, window: HourWindow) -> Self {
        Self { range, window }
    }

    /// Filters a raw forecast
    ///
    /// If the forecast lists a date twice, the later record with hours in the
    /// window wins.
    pub fn filter_city(&self, raw: &RawForecast) -> FilteredCity {
        self.collect(
            &raw.city,
            raw.days.iter().map(|day| (day.date, day.hours.as_slice())),
        )
    }

    /// Applies the filter to an already filtered city
    ///
    /// With the same bounds this returns an identical structure.
    pub fn refilter(&self, filtered: &FilteredCity) -> FilteredCity {
        self.collect(
            &filtered.city,
            filtered
                .dates
                .iter()
                .map(|(date, hours)| (*date, hours.as_slice())),
        )
    }

    fn collect<'a>(
        &self,
        city: &str,
        days: impl Iterator<Item = (NaiveDate, &'a [HourRecord])>,
    ) -> FilteredCity {
        let mut dates = BTreeMap::new();

        for (date, hours) in days.filter(|(date, _)| self.range.contains(*date)) {
            let kept: Vec<HourRecord> = hours
                .iter()
                .filter(|hour| self.window.contains(hour.hour))
                .cloned()
                .collect();

            if !kept.is_empty() {
                dates.insert(date, kept);
            }
        }

        FilteredCity {
            city: city.to_string(),
            dates,
        }
    }
}
