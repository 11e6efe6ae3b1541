//! Display labels for results
//!
//! Results use stable internal keys (`city_name`, `dates`, `avg_temp`,
//! `cond_hours`, `AVG`, `rating`) and city identifiers. A `Labels` table maps
//! them to presentation names for the chosen locale.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::data::all_cities;

/// Presentation language for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    /// Parses a locale name ("ru", "en"), ignoring case
    pub fn from_str(s: &str) -> Option<Locale> {
        match s.to_lowercase().as_str() {
            "ru" | "rus" | "russian" => Some(Locale::Ru),
            "en" | "eng" | "english" => Some(Locale::En),
            _ => None,
        }
    }
}

/// Field labels per locale, in the order (city_name, dates, avg_temp, cond_hours, AVG, rating)
const RU_FIELDS: [&str; 6] = [
    "Город",
    "День",
    "Температура, среднее",
    "Без осадков, часов",
    "Среднее",
    "Рейтинг",
];
const EN_FIELDS: [&str; 6] = [
    "City",
    "Day",
    "Average temperature",
    "Hours without precipitation",
    "Average",
    "Rating",
];
const FIELD_KEYS: [&str; 6] = ["city_name", "dates", "avg_temp", "cond_hours", "AVG", "rating"];

/// Mapping from internal keys to display labels
#[derive(Debug, Clone)]
pub struct Labels {
    locale: Locale,
    table: HashMap<&'static str, &'static str>,
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        let fields = match locale {
            Locale::Ru => RU_FIELDS,
            Locale::En => EN_FIELDS,
        };

        let mut table: HashMap<&'static str, &'static str> =
            FIELD_KEYS.iter().copied().zip(fields).collect();
        for city in all_cities() {
            let name = match locale {
                Locale::Ru => city.name_ru,
                Locale::En => city.name_en,
            };
            table.insert(city.id, name);
        }

        Self { locale, table }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Label for `key`, if the table has one
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.table.get(key).copied()
    }

    /// Label for `key`, or the key itself
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }
}

/// Renames keys and string values of a result structure
///
/// Object keys and string values with a label are replaced; anything else,
/// such as date keys, is kept as is.
pub fn rename(value: &Value, labels: &Labels) -> Value {
    match value {
        Value::Object(map) => {
            let renamed: Map<String, Value> = map
                .iter()
                .map(|(key, inner)| (labels.label(key).to_string(), rename(inner, labels)))
                .collect();
            Value::Object(renamed)
        }
        Value::Array(items) => Value::Array(items.iter().map(|item| rename(item, labels)).collect()),
        Value::String(s) => Value::String(labels.label(s).to_string()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn city_result() -> Value {
        json!({
            "city_name": "MOSCOW",
            "dates": {
                "26-05": {"avg_temp": 14, "cond_hours": 3},
                "27-05": {"avg_temp": 16, "cond_hours": 5}
            },
            "AVG": {"avg_temp": 15.0, "cond_hours": 4.0},
            "rating": 1
        })
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!(Locale::from_str("ru"), Some(Locale::Ru));
        assert_eq!(Locale::from_str("EN"), Some(Locale::En));
        assert_eq!(Locale::from_str("de"), None);
        assert_eq!(Locale::default(), Locale::Ru);
    }

    #[test]
    fn test_rename_russian() {
        let labels = Labels::for_locale(Locale::Ru);

        let renamed = rename(&city_result(), &labels);

        assert_eq!(renamed["Город"], "Москва");
        assert_eq!(renamed["Рейтинг"], 1);
        assert_eq!(renamed["День"]["26-05"]["Температура, среднее"], 14);
        assert_eq!(renamed["День"]["26-05"]["Без осадков, часов"], 3);
        assert_eq!(renamed["Среднее"]["Температура, среднее"], 15.0);
        assert_eq!(renamed["Среднее"]["Без осадков, часов"], 4.0);
        assert!(renamed.get("city_name").is_none());
    }

    #[test]
    fn test_rename_english() {
        let labels = Labels::for_locale(Locale::En);

        let renamed = rename(&city_result(), &labels);

        assert_eq!(renamed["City"], "Moscow");
        assert_eq!(renamed["Day"]["27-05"]["Average temperature"], 16);
        assert_eq!(renamed["Rating"], 1);
    }

    #[test]
    fn test_rename_keeps_date_order_and_unknown_keys() {
        let labels = Labels::for_locale(Locale::Ru);
        let value = json!({"dates": {"31-05": {}, "01-06": {}}, "extra": "ATLANTIS"});

        let renamed = rename(&value, &labels);

        let keys: Vec<&String> = renamed["День"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["31-05", "01-06"]);
        assert_eq!(renamed["extra"], "ATLANTIS");
    }

    #[test]
    fn test_rename_arrays_and_nulls() {
        let labels = Labels::for_locale(Locale::Ru);
        let value = json!([{"city_name": "ROMA", "rating": null}]);

        let renamed = rename(&value, &labels);

        assert_eq!(renamed[0]["Город"], "Рим");
        assert!(renamed[0]["Рейтинг"].is_null());
    }

    #[test]
    fn test_label_falls_back_to_key() {
        let labels = Labels::for_locale(Locale::En);
        assert_eq!(labels.label("CAIRO"), "Cairo");
        assert_eq!(labels.label("26-05"), "26-05");
        assert_eq!(labels.locale(), Locale::En);
    }
}
