//! Command-line interface parsing for Best City CLI
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated `RunConfig`: the vacation dates, the daytime hour window, the
//! cities to compare and where forecasts, conditions and results live.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use thiserror::Error;

use crate::analysis::{DateRange, Filter, HourWindow, RangeError, DEFAULT_END_HOUR, DEFAULT_START_HOUR};
use crate::data::{all_cities, get_city_by_id};
use crate::pipeline::DEFAULT_WORKERS;
use crate::report::{Locale, DEFAULT_OUTPUT_FILE};

/// Date format accepted on the command line
const DATE_ARG_FORMAT: &str = "%Y-%m-%d";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The date is not in YYYY-MM-DD form
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Dates or hours do not form a valid range
    #[error(transparent)]
    InvalidRange(#[from] RangeError),

    /// The city is not in the built-in table
    #[error("Unknown city: '{0}'. Valid cities: {1}")]
    UnknownCity(String, String),

    /// The locale is not supported
    #[error("Invalid locale: '{0}'. Valid locales: ru, en")]
    InvalidLocale(String),

    /// Zero workers were requested
    #[error("Worker count must be at least 1")]
    NoWorkers,
}

/// Best City CLI - Rank cities for a vacation by their weather forecast
#[derive(Parser, Debug)]
#[command(name = "bestcity")]
#[command(about = "Find the best city for a vacation from hourly weather forecasts")]
#[command(version)]
pub struct Cli {
    /// First day of the vacation (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", default_value = "2022-05-26")]
    pub start: String,

    /// Last day of the vacation (YYYY-MM-DD), inclusive
    #[arg(long, value_name = "DATE", default_value = "2022-05-29")]
    pub end: String,

    /// First daytime hour taken into account
    #[arg(long, value_name = "HOUR", default_value_t = DEFAULT_START_HOUR)]
    pub from_hour: u8,

    /// Last daytime hour taken into account, inclusive
    #[arg(long, value_name = "HOUR", default_value_t = DEFAULT_END_HOUR)]
    pub to_hour: u8,

    /// City to compare; repeat for several cities (default: all cities)
    ///
    /// Examples:
    ///   bestcity --city moscow --city cairo
    #[arg(long = "city", value_name = "CITY")]
    pub cities: Vec<String>,

    /// Adverse conditions resource (default: conditions.txt lookup)
    #[arg(long, value_name = "PATH")]
    pub conditions: Option<PathBuf>,

    /// Read forecasts from <city>-response.json files in this directory
    #[arg(long, value_name = "DIR", conflicts_with = "base_url")]
    pub data_dir: Option<PathBuf>,

    /// Fetch <city>-response.json documents from this URL instead of the defaults
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Where to write the results
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Number of cities processed at once
    #[arg(long, value_name = "N", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Language of the results file and verdict: ru, en
    #[arg(long, value_name = "LOCALE", default_value = "ru")]
    pub locale: String,

    /// Log debug details
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where forecasts are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// The built-in forecast URLs, or a mirror
    Http { base_url: Option<String> },
    /// Local forecast documents
    Directory(PathBuf),
}

/// Validated configuration for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub filter: Filter,
    /// City identifiers in request order
    pub cities: Vec<String>,
    pub conditions: Option<PathBuf>,
    pub source: SourceConfig,
    pub output: PathBuf,
    pub workers: usize,
    pub locale: Locale,
    pub verbose: bool,
}

/// Parses a YYYY-MM-DD date argument
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s.trim(), DATE_ARG_FORMAT).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a city argument into its canonical identifier
pub fn parse_city_arg(s: &str) -> Result<String, CliError> {
    get_city_by_id(s.trim()).map(|city| city.id.to_string()).ok_or_else(|| {
        let valid: Vec<&str> = all_cities().iter().map(|c| c.id).collect();
        CliError::UnknownCity(s.to_string(), valid.join(", "))
    })
}

/// Parses a locale argument
pub fn parse_locale_arg(s: &str) -> Result<Locale, CliError> {
    Locale::from_str(s).ok_or_else(|| CliError::InvalidLocale(s.to_string()))
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with validated ranges and canonical city identifiers
    /// * `Err(CliError)` if any argument is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let range = DateRange::new(parse_date_arg(&cli.start)?, parse_date_arg(&cli.end)?)?;
        let window = HourWindow::new(cli.from_hour, cli.to_hour)?;

        let mut cities = Vec::new();
        if cli.cities.is_empty() {
            cities.extend(all_cities().iter().map(|c| c.id.to_string()));
        } else {
            for arg in &cli.cities {
                let id = parse_city_arg(arg)?;
                // Repeated cities are compared once
                if !cities.contains(&id) {
                    cities.push(id);
                }
            }
        }

        if cli.workers == 0 {
            return Err(CliError::NoWorkers);
        }

        let source = match &cli.data_dir {
            Some(dir) => SourceConfig::Directory(dir.clone()),
            None => SourceConfig::Http {
                base_url: cli.base_url.clone(),
            },
        };

        Ok(RunConfig {
            filter: Filter::new(range, window),
            cities,
            conditions: cli.conditions.clone(),
            source,
            output: cli.output.clone(),
            workers: cli.workers,
            locale: parse_locale_arg(&cli.locale)?,
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg("2022-05-26").unwrap(), date(2022, 5, 26));
        assert!(parse_date_arg("26-05-2022").is_err());
        assert!(parse_date_arg("2022-02-30").is_err());
    }

    #[test]
    fn test_parse_city_arg_canonicalizes() {
        assert_eq!(parse_city_arg("moscow").unwrap(), "MOSCOW");
        assert_eq!(parse_city_arg("Cairo").unwrap(), "CAIRO");
    }

    #[test]
    fn test_parse_city_arg_invalid() {
        let err = parse_city_arg("atlantis").unwrap_err();
        assert!(err.to_string().contains("Unknown city"));
        assert!(err.to_string().contains("atlantis"));
        assert!(err.to_string().contains("MOSCOW"));
    }

    #[test]
    fn test_parse_locale_arg() {
        assert_eq!(parse_locale_arg("en").unwrap(), Locale::En);
        assert!(parse_locale_arg("klingon").is_err());
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["bestcity"]);
        assert_eq!(cli.start, "2022-05-26");
        assert_eq!(cli.end, "2022-05-29");
        assert_eq!(cli.from_hour, 9);
        assert_eq!(cli.to_hour, 19);
        assert!(cli.cities.is_empty());
        assert_eq!(cli.output, PathBuf::from("result.json"));
        assert_eq!(cli.workers, 5);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_repeated_cities() {
        let cli = Cli::parse_from(["bestcity", "--city", "moscow", "--city", "roma"]);
        assert_eq!(cli.cities, vec!["moscow", "roma"]);
    }

    #[test]
    fn test_cli_data_dir_conflicts_with_base_url() {
        let result = Cli::try_parse_from([
            "bestcity",
            "--data-dir",
            "fixtures",
            "--base-url",
            "http://localhost",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_config_defaults() {
        let cli = Cli::parse_from(["bestcity"]);
        let config = RunConfig::from_cli(&cli).unwrap();

        assert_eq!(config.filter.range.start(), date(2022, 5, 26));
        assert_eq!(config.filter.range.end(), date(2022, 5, 29));
        assert_eq!(config.filter.window, HourWindow::default());
        assert_eq!(config.cities.len(), all_cities().len());
        assert_eq!(config.source, SourceConfig::Http { base_url: None });
        assert_eq!(config.locale, Locale::Ru);
    }

    #[test]
    fn test_run_config_deduplicates_cities() {
        let cli = Cli::parse_from(["bestcity", "--city", "roma", "--city", "ROMA", "--city", "cairo"]);
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cities, vec!["ROMA", "CAIRO"]);
    }

    #[test]
    fn test_run_config_data_dir() {
        let cli = Cli::parse_from(["bestcity", "--data-dir", "tests/fixtures"]);
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(
            config.source,
            SourceConfig::Directory(PathBuf::from("tests/fixtures"))
        );
    }

    #[test]
    fn test_run_config_inverted_dates() {
        let cli = Cli::parse_from(["bestcity", "--start", "2022-05-29", "--end", "2022-05-26"]);
        assert!(matches!(
            RunConfig::from_cli(&cli),
            Err(CliError::InvalidRange(RangeError::InvertedDates { .. }))
        ));
    }

    #[test]
    fn test_run_config_range_over_a_year() {
        let cli = Cli::parse_from(["bestcity", "--start", "2022-05-26", "--end", "2023-05-26"]);
        assert!(matches!(
            RunConfig::from_cli(&cli),
            Err(CliError::InvalidRange(RangeError::RangeTooLong { .. }))
        ));
    }

    #[test]
    fn test_run_config_invalid_hours() {
        let cli = Cli::parse_from(["bestcity", "--from-hour", "20", "--to-hour", "10"]);
        assert!(RunConfig::from_cli(&cli).is_err());

        let cli = Cli::parse_from(["bestcity", "--to-hour", "25"]);
        assert!(RunConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn test_run_config_unknown_city() {
        let cli = Cli::parse_from(["bestcity", "--city", "atlantis"]);
        assert!(matches!(
            RunConfig::from_cli(&cli),
            Err(CliError::UnknownCity(..))
        ));
    }

    #[test]
    fn test_run_config_zero_workers() {
        let cli = Cli::parse_from(["bestcity", "--workers", "0"]);
        assert!(matches!(RunConfig::from_cli(&cli), Err(CliError::NoWorkers)));
    }
}
