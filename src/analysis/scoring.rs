//! Per-date and per-city scoring
//!
//! A date scores its rounded mean temperature and the number of hours with a
//! known, non-adverse condition. A city averages those over its dates; the
//! sum of both averages is the city's total score.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::conditions::ConditionSet;
use crate::data::{CityAverages, CityOutcome, CityScore, DateScore, DateScores, FilteredCity, HourRecord};

/// Errors that can occur while scoring
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// A date was scored without any hours
    #[error("Cannot score a date without hours")]
    EmptyDate,

    /// The city has dates but none of them reported a temperature
    #[error("No temperature data for {city} in the requested interval")]
    DegenerateScore { city: String },
}

/// Rounds to the nearest integer, halves to even
fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Rounds to one decimal place, halves to even
///
/// Formatting rounds the exact binary value. Scaling by ten first would
/// turn values just below a half (3/20 is 0.1499...) into ties.
fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Scores one date's hours
///
/// Hours without a temperature are left out of the mean; if none has one,
/// the average temperature is `None`. Hours without a condition do not count
/// as non-adverse.
///
/// # Returns
/// * `Ok(DateScore)` for a non-empty list of hours
/// * `Err(ScoreError::EmptyDate)` if `hours` is empty
pub fn score_date(hours: &[HourRecord], conditions: &ConditionSet) -> Result<DateScore, ScoreError> {
    if hours.is_empty() {
        return Err(ScoreError::EmptyDate);
    }

    let temps: Vec<f64> = hours.iter().filter_map(|h| h.temp).map(|t| t as f64).collect();
    let avg_temp = mean(&temps).map(|m| round_half_even(m) as i64);

    let cond_hours = hours
        .iter()
        .filter_map(|h| h.condition.as_deref())
        .filter(|condition| !conditions.contains(condition))
        .count() as u32;

    Ok(DateScore {
        avg_temp,
        cond_hours,
    })
}

/// Averages per-date scores into city-level values
///
/// Dates without a temperature are skipped for the temperature mean but
/// still count for the condition mean. Both means are rounded to one decimal.
pub fn aggregate_dates(city: &str, dates: &DateScores) -> Result<CityAverages, ScoreError> {
    let temps: Vec<f64> = dates
        .0
        .values()
        .filter_map(|score| score.avg_temp)
        .map(|t| t as f64)
        .collect();
    let avg_temp = mean(&temps).ok_or_else(|| ScoreError::DegenerateScore {
        city: city.to_string(),
    })?;

    let conds: Vec<f64> = dates.0.values().map(|score| score.cond_hours as f64).collect();
    let cond_hours = mean(&conds).ok_or_else(|| ScoreError::DegenerateScore {
        city: city.to_string(),
    })?;

    Ok(CityAverages {
        avg_temp: round_one_decimal(avg_temp),
        cond_hours: round_one_decimal(cond_hours),
    })
}

/// Scores a filtered city
///
/// # Returns
/// * `Ok(CityOutcome::Scored)` with an unranked score
/// * `Ok(CityOutcome::NoData)` if no date survived filtering
/// * `Err(ScoreError)` if the city's data cannot be scored
pub fn score_city(filtered: &FilteredCity, conditions: &ConditionSet) -> Result<CityOutcome, ScoreError> {
    if filtered.is_empty() {
        return Ok(CityOutcome::NoData(filtered.city.clone()));
    }

    let mut scores = BTreeMap::new();
    for (date, hours) in &filtered.dates {
        scores.insert(*date, score_date(hours, conditions)?);
    }
    let dates = DateScores(scores);

    let averages = aggregate_dates(&filtered.city, &dates)?;

    Ok(CityOutcome::Scored(CityScore {
        city_name: filtered.city.clone(),
        dates,
        total_score: averages.avg_temp + averages.cond_hours,
        averages,
        rating: None,
    }))
}
