//! Concurrent per-city processing
//!
//! Every city is an independent unit of work: fetch, filter, score. Units run
//! through a bounded pool; the coordinator alone collects their results,
//! restores request order and ranks the scored cities. A failing city is
//! reported and left out, it never stops the run.

use std::fmt;
use std::future::{self, Future};

use futures::stream::{self, StreamExt};
use thiserror::Error;

use crate::analysis::{rank, score_city, Filter, RankedResultSet, ScoreError};
use crate::conditions::ConditionSet;
use crate::data::{CityOutcome, ForecastError, ForecastSource};

/// Default number of cities processed at once
pub const DEFAULT_WORKERS: usize = 5;

/// Errors that abort a whole run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The run was started without any city
    #[error("No cities requested")]
    NoCities,
}

/// Why a city was left out of the ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The forecast could not be fetched
    Fetch(String),
    /// The forecast was fetched but has the wrong shape
    Malformed(String),
    /// The city has dates but no temperature data
    DegenerateScore,
    /// A date reached scoring without hours
    Precondition,
    /// The run was stopped before the city completed
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Fetch(msg) => write!(f, "fetch failed: {}", msg),
            FailureKind::Malformed(reason) => write!(f, "malformed forecast: {}", reason),
            FailureKind::DegenerateScore => write!(f, "no temperature data in the interval"),
            FailureKind::Precondition => write!(f, "empty date reached scoring"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A city excluded from the ranking
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{city}: {kind}")]
pub struct CityFailure {
    pub city: String,
    pub kind: FailureKind,
}

impl CityFailure {
    fn new(city: &str, kind: FailureKind) -> Self {
        Self {
            city: city.to_string(),
            kind,
        }
    }

    fn from_fetch(city: &str, err: ForecastError) -> Self {
        let kind = match err {
            ForecastError::Malformed(e) => FailureKind::Malformed(e.reason),
            other => FailureKind::Fetch(other.to_string()),
        };
        Self::new(city, kind)
    }

    fn from_score(city: &str, err: ScoreError) -> Self {
        let kind = match err {
            ScoreError::EmptyDate => FailureKind::Precondition,
            ScoreError::DegenerateScore { .. } => FailureKind::DegenerateScore,
        };
        Self::new(city, kind)
    }
}

/// Result of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Ranked cities and cities without data
    pub results: RankedResultSet,
    /// Cities excluded because of an error, in request order
    pub failures: Vec<CityFailure>,
}

impl RunReport {
    /// Whether at least one city could be ranked
    pub fn has_qualifying_data(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Drives fetching, filtering, scoring and ranking for a set of cities
pub struct Pipeline<S> {
    source: S,
    conditions: ConditionSet,
    filter: Filter,
    workers: usize,
}

impl<S: ForecastSource> Pipeline<S> {
    pub fn new(source: S, conditions: ConditionSet, filter: Filter) -> Self {
        Self {
            source,
            conditions,
            filter,
            workers: DEFAULT_WORKERS,
        }
    }

    /// Sets how many cities are processed at once (at least one)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Processes all `cities` and ranks them
    pub async fn run(&self, cities: &[String]) -> Result<RunReport, PipelineError> {
        self.run_until(cities, future::pending::<()>()).await
    }

    /// Like `run`, but stops once `shutdown` completes
    ///
    /// Cities still in flight at that point are reported as cancelled.
    pub async fn run_until<F>(&self, cities: &[String], shutdown: F) -> Result<RunReport, PipelineError>
    where
        F: Future<Output = ()>,
    {
        if cities.is_empty() {
            return Err(PipelineError::NoCities);
        }

        tracing::info!(
            cities = cities.len(),
            workers = self.workers,
            "starting forecast analysis"
        );

        let completed: Vec<(usize, Result<CityOutcome, CityFailure>)> =
            stream::iter(cities.iter().enumerate())
                .map(|(index, city)| async move { (index, self.process_city(city).await) })
                .buffer_unordered(self.workers)
                .take_until(shutdown)
                .collect()
                .await;

        if completed.len() < cities.len() {
            tracing::warn!(
                completed = completed.len(),
                requested = cities.len(),
                "run stopped before all cities completed"
            );
        }

        let mut slots: Vec<Option<Result<CityOutcome, CityFailure>>> = vec![None; cities.len()];
        for (index, result) in completed {
            slots[index] = Some(result);
        }

        let mut outcomes = Vec::new();
        let mut failures = Vec::new();
        for (city, slot) in cities.iter().zip(slots) {
            match slot {
                Some(Ok(outcome)) => outcomes.push(outcome),
                Some(Err(failure)) => failures.push(failure),
                None => failures.push(CityFailure::new(city, FailureKind::Cancelled)),
            }
        }

        for failure in &failures {
            tracing::warn!(city = %failure.city, reason = %failure.kind, "city excluded from ranking");
        }

        let results = rank(outcomes);
        tracing::info!(
            ranked = results.ranked.len(),
            no_data = results.no_data.len(),
            failed = failures.len(),
            "ranking complete"
        );

        Ok(RunReport { results, failures })
    }

    async fn process_city(&self, city: &str) -> Result<CityOutcome, CityFailure> {
        let raw = self
            .source
            .fetch(city)
            .await
            .map_err(|e| CityFailure::from_fetch(city, e))?;
        tracing::info!(city, days = raw.days.len(), "got forecast");

        let filtered = self.filter.filter_city(&raw);
        let outcome =
            score_city(&filtered, &self.conditions).map_err(|e| CityFailure::from_score(city, e))?;

        match &outcome {
            CityOutcome::Scored(score) => {
                tracing::debug!(city, total = score.total_score, "city scored");
            }
            CityOutcome::NoData(_) => {
                tracing::warn!(city, "no days found in the requested interval");
            }
        }

        Ok(outcome)
    }
}
