//! Presentation of results
//!
//! Renames the stable result keys for display, persists the renamed results
//! and builds the final one-line verdict.

mod labels;
mod writer;

pub use labels::{rename, Labels, Locale};
pub use writer::{ResultWriter, DEFAULT_OUTPUT_FILE};

use serde_json::Value;

/// Message shown when no city could be ranked
pub const NO_DATA_MESSAGE: &str = "No data for the requested interval";

/// Names of the first-ranked cities in a renamed result list
pub fn best_cities(results: &Value, labels: &Labels) -> Vec<String> {
    let city_key = labels.label("city_name");
    let rating_key = labels.label("rating");

    results
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter(|entry| entry[rating_key].as_u64() == Some(1))
                .filter_map(|entry| entry[city_key].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// The final verdict for a list of best cities
pub fn summary_line(best: &[String]) -> String {
    match best {
        [] => NO_DATA_MESSAGE.to_string(),
        [city] => format!("The best city for a vacation is - {}", city),
        cities => format!("The best cities for a vacation are - {}", cities.join(", ")),
    }
}
