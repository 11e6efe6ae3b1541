//! Cross-city ranking
//!
//! Orders scored cities by total score and assigns dense ranks: equal totals
//! share a rank and the next lower total gets the next rank (1, 1, 2, 2, 3).

use serde_json::{json, Value};

use crate::data::{CityOutcome, CityScore};

/// Ranked cities followed by the cities without data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResultSet {
    /// Scored cities by descending total score, each with a rank
    pub ranked: Vec<CityScore>,
    /// Cities without data in the requested interval, in input order
    pub no_data: Vec<String>,
}

impl RankedResultSet {
    /// Whether no city could be ranked
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Cities sharing the first rank
    pub fn best(&self) -> Vec<&CityScore> {
        self.ranked
            .iter()
            .filter(|score| score.rating == Some(1))
            .collect()
    }

    /// The result as plain JSON with stable keys
    ///
    /// Ranked cities come first; cities without data follow with an empty
    /// `dates` map and `null` averages and rating.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut entries = self
            .ranked
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()?;

        entries.extend(self.no_data.iter().map(|city| {
            json!({
                "city_name": city,
                "dates": {},
                "AVG": null,
                "rating": null,
            })
        }));

        Ok(Value::Array(entries))
    }
}

/// Ranks city outcomes
///
/// Sorting is stable, so cities with equal totals keep their input order.
/// Totals are compared exactly.
pub fn rank(outcomes: Vec<CityOutcome>) -> RankedResultSet {
    let mut ranked = Vec::new();
    let mut no_data = Vec::new();

    for outcome in outcomes {
        match outcome {
            CityOutcome::Scored(score) => ranked.push(score),
            CityOutcome::NoData(city) => no_data.push(city),
        }
    }

    ranked.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    let mut rating = 0;
    let mut previous: Option<f64> = None;
    for score in ranked.iter_mut() {
        if previous != Some(score.total_score) {
            rating += 1;
            previous = Some(score.total_score);
        }
        score.rating = Some(rating);
    }

    RankedResultSet { ranked, no_data }
}
