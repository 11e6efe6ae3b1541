//! Forecast retrieval
//!
//! Provides the `ForecastSource` abstraction used by the pipeline, an HTTP
//! implementation fetching the published forecast documents, and a directory
//! implementation reading the same documents from disk.
//!
//! `RawForecast::from_json` is the only place where the provider's JSON is
//! validated; everything downstream works on typed records.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::cities::{forecast_file_name, get_city_by_id};
use super::{DayRecord, HourRecord, RawForecast};

/// Timeout for a single forecast request
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Date format used by the provider
const FORECAST_DATE_FORMAT: &str = "%Y-%m-%d";

/// A forecast document that does not have the expected shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed forecast for {city}: {reason}")]
pub struct MalformedInputError {
    /// City the document was fetched for
    pub city: String,
    /// What was wrong with it
    pub reason: String,
}

impl MalformedInputError {
    fn new(city: &str, reason: impl Into<String>) -> Self {
        Self {
            city: city.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when fetching a forecast
#[derive(Debug, Error)]
pub enum ForecastError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Reading a local forecast document failed
    #[error("Failed to read forecast for {city}: {source}")]
    Io {
        city: String,
        #[source]
        source: std::io::Error,
    },

    /// The city has no known forecast location
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// The document was fetched but could not be understood
    #[error(transparent)]
    Malformed(#[from] MalformedInputError),
}

/// Something that can produce a city's raw forecast
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<RawForecast, ForecastError>;
}

/// Forecast document as published by the provider
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    forecasts: Option<Vec<ForecastDay>>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    date: Option<String>,
    hours: Option<Vec<ForecastHour>>,
}

#[derive(Debug, Deserialize)]
struct ForecastHour {
    hour: Option<HourValue>,
    temp: Option<i64>,
    condition: Option<String>,
}

/// The provider sends hours as strings ("9"), but numbers are accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HourValue {
    Number(i64),
    Text(String),
}

impl RawForecast {
    /// Parses and validates a forecast document for `city`
    ///
    /// # Returns
    /// * `Ok(RawForecast)` - typed forecast with every date and hour checked
    /// * `Err(MalformedInputError)` - if the JSON is invalid, `forecasts` is
    ///   missing, or a day or hour cannot be interpreted
    pub fn from_json(city: &str, text: &str) -> Result<Self, MalformedInputError> {
        let response: ForecastResponse = serde_json::from_str(text)
            .map_err(|e| MalformedInputError::new(city, e.to_string()))?;

        let forecasts = response
            .forecasts
            .ok_or_else(|| MalformedInputError::new(city, "missing forecasts list"))?;

        let days = forecasts
            .into_iter()
            .map(|day| parse_day(city, day))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            city: city.to_string(),
            days,
        })
    }
}

fn parse_day(city: &str, day: ForecastDay) -> Result<DayRecord, MalformedInputError> {
    let date_str = day
        .date
        .ok_or_else(|| MalformedInputError::new(city, "forecast day without date"))?;
    let date = NaiveDate::parse_from_str(&date_str, FORECAST_DATE_FORMAT)
        .map_err(|_| MalformedInputError::new(city, format!("invalid date: {}", date_str)))?;

    let hours = day
        .hours
        .ok_or_else(|| MalformedInputError::new(city, format!("no hours for {}", date_str)))?
        .into_iter()
        .map(|hour| parse_hour(city, hour))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DayRecord { date, hours })
}

fn parse_hour(city: &str, hour: ForecastHour) -> Result<HourRecord, MalformedInputError> {
    let raw = hour
        .hour
        .ok_or_else(|| MalformedInputError::new(city, "hour record without hour"))?;

    let value = match &raw {
        HourValue::Number(n) => Some(*n),
        HourValue::Text(s) => s.trim().parse::<i64>().ok(),
    };

    let hour_of_day = value
        .filter(|h| (0..=23).contains(h))
        .ok_or_else(|| MalformedInputError::new(city, format!("invalid hour: {:?}", raw)))?;

    Ok(HourRecord {
        hour: hour_of_day as u8,
        temp: hour.temp,
        condition: hour.condition,
    })
}

/// Client for fetching forecast documents over HTTP
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http_client: Client,
    /// Overrides the per-city URLs (for mirrors and testing)
    base_url: Option<String>,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    /// Create a new ForecastClient with default settings
    pub fn new() -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http_client,
            base_url: None,
        }
    }

    /// Fetch documents from `base_url` instead of the built-in city URLs
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn url_for(&self, city: &str) -> Result<String, ForecastError> {
        match &self.base_url {
            Some(base) => Ok(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                forecast_file_name(city)
            )),
            None => get_city_by_id(city)
                .map(|c| c.url.to_string())
                .ok_or_else(|| ForecastError::UnknownCity(city.to_string())),
        }
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    async fn fetch(&self, city: &str) -> Result<RawForecast, ForecastError> {
        let url = self.url_for(city)?;
        tracing::debug!(city, %url, "fetching forecast");

        let text = self
            .http_client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(RawForecast::from_json(city, &text)?)
    }
}

/// Reads forecast documents named like `moscow-response.json` from a directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ForecastSource for DirectorySource {
    async fn fetch(&self, city: &str) -> Result<RawForecast, ForecastError> {
        let path = self.dir.join(forecast_file_name(city));
        tracing::debug!(city, path = %path.display(), "reading forecast");

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ForecastError::Io {
                city: city.to_string(),
                source,
            })?;

        Ok(RawForecast::from_json(city, &text)?)
    }
}
