//! Core data models for Best City CLI
//!
//! This module contains the data types that flow through the ranking pipeline:
//! raw forecasts as fetched, filtered forecasts, and per-date and per-city scores.

pub mod cities;
pub mod forecast;

pub use cities::{all_cities, get_city_by_id};
pub use forecast::{
    DirectorySource, ForecastClient, ForecastError, ForecastSource, MalformedInputError,
};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Format used for date labels in output, e.g. "26-05"
pub const DATE_LABEL_FORMAT: &str = "%d-%m";

/// Formats a date as a `DD-MM` label
pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// A supported city with its forecast location and display names
#[derive(Debug, Clone, Copy)]
pub struct City {
    /// Unique identifier for the city (e.g., "MOSCOW")
    pub id: &'static str,
    /// URL of the city's forecast document
    pub url: &'static str,
    /// English display name
    pub name_en: &'static str,
    /// Russian display name
    pub name_ru: &'static str,
}

/// Weather for a single hour of a forecast day
///
/// Temperature and condition are optional since the provider may send `null`
/// for either of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourRecord {
    /// Hour of day (0-23)
    pub hour: u8,
    /// Temperature in Celsius, if reported
    pub temp: Option<i64>,
    /// Condition label (e.g., "light-rain"), if reported
    pub condition: Option<String>,
}

/// One forecast day with its hourly records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub hours: Vec<HourRecord>,
}

/// One city's complete fetched forecast, validated at the parse boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawForecast {
    /// City identifier the forecast was fetched for
    pub city: String,
    /// Forecast days in provider order
    pub days: Vec<DayRecord>,
}

/// A city's forecast restricted to a date range and an hour window
///
/// Every date key lies within the range and maps to a non-empty list of hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredCity {
    pub city: String,
    pub dates: BTreeMap<NaiveDate, Vec<HourRecord>>,
}

impl FilteredCity {
    /// Whether no date survived filtering
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Date labels in chronological order
    pub fn labels(&self) -> Vec<String> {
        self.dates.keys().copied().map(date_label).collect()
    }
}

/// Score for a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateScore {
    /// Rounded mean temperature, `None` when no hour had a temperature
    pub avg_temp: Option<i64>,
    /// Number of hours with a known, non-adverse condition
    pub cond_hours: u32,
}

/// Per-date scores keyed by date, serialized with `DD-MM` keys in date order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateScores(pub BTreeMap<NaiveDate, DateScore>);

impl Serialize for DateScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (date, score) in &self.0 {
            map.serialize_entry(&date_label(*date), score)?;
        }
        map.end()
    }
}

/// City-level averages
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CityAverages {
    /// Mean of the per-date temperatures, one decimal
    pub avg_temp: f64,
    /// Mean of the per-date non-adverse hour counts, one decimal
    pub cond_hours: f64,
}

/// Aggregated score of one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityScore {
    pub city_name: String,
    pub dates: DateScores,
    #[serde(rename = "AVG")]
    pub averages: CityAverages,
    /// Sum of the two city-level averages, used as the ranking key
    #[serde(skip)]
    pub total_score: f64,
    /// Rank, assigned once by the ranker
    pub rating: Option<u32>,
}

/// Outcome of scoring one city
#[derive(Debug, Clone, PartialEq)]
pub enum CityOutcome {
    /// The city has at least one qualifying date
    Scored(CityScore),
    /// No date of the city falls inside the requested interval
    NoData(String),
}

impl CityOutcome {
    /// Identifier of the city this outcome belongs to
    pub fn city(&self) -> &str {
        match self {
            CityOutcome::Scored(score) => &score.city_name,
            CityOutcome::NoData(city) => city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_label_format() {
        assert_eq!(date_label(date(2022, 5, 17)), "17-05");
        assert_eq!(date_label(date(2022, 6, 1)), "01-06");
    }

    #[test]
    fn test_date_scores_serialize_in_date_order() {
        let mut scores = BTreeMap::new();
        scores.insert(
            date(2022, 6, 1),
            DateScore {
                avg_temp: Some(20),
                cond_hours: 4,
            },
        );
        scores.insert(
            date(2022, 5, 31),
            DateScore {
                avg_temp: None,
                cond_hours: 2,
            },
        );

        let json = serde_json::to_string(&DateScores(scores)).unwrap();

        assert_eq!(
            json,
            r#"{"31-05":{"avg_temp":null,"cond_hours":2},"01-06":{"avg_temp":20,"cond_hours":4}}"#
        );
    }

    #[test]
    fn test_city_score_uses_stable_keys() {
        let score = CityScore {
            city_name: "MOSCOW".to_string(),
            dates: DateScores::default(),
            averages: CityAverages {
                avg_temp: 15.0,
                cond_hours: 4.0,
            },
            total_score: 19.0,
            rating: Some(1),
        };

        let value = serde_json::to_value(&score).unwrap();

        assert_eq!(value["city_name"], "MOSCOW");
        assert_eq!(value["AVG"]["avg_temp"], 15.0);
        assert_eq!(value["AVG"]["cond_hours"], 4.0);
        assert_eq!(value["rating"], 1);
        assert!(value.get("total_score").is_none());
    }

    #[test]
    fn test_outcome_city_name() {
        assert_eq!(CityOutcome::NoData("ROMA".to_string()).city(), "ROMA");
    }

    #[test]
    fn test_filtered_city_labels_are_chronological() {
        let mut dates = BTreeMap::new();
        dates.insert(date(2022, 6, 1), vec![]);
        dates.insert(date(2022, 5, 30), vec![]);
        let filtered = FilteredCity {
            city: "PARIS".to_string(),
            dates,
        };

        assert_eq!(filtered.labels(), vec!["30-05", "01-06"]);
    }
}
