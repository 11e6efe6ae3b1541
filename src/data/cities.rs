//! Static table of supported cities
//!
//! Each city carries the URL of its forecast document and the names used
//! when results are presented.

use super::City;

/// Base URL under which every city's forecast document is published
pub const FORECAST_BASE_URL: &str = "https://code.s3.yandex.net/async-module";

/// Static array of all supported cities
pub static CITIES: [City; 15] = [
    City {
        id: "MOSCOW",
        url: "https://code.s3.yandex.net/async-module/moscow-response.json",
        name_en: "Moscow",
        name_ru: "Москва",
    },
    City {
        id: "PARIS",
        url: "https://code.s3.yandex.net/async-module/paris-response.json",
        name_en: "Paris",
        name_ru: "Париж",
    },
    City {
        id: "LONDON",
        url: "https://code.s3.yandex.net/async-module/london-response.json",
        name_en: "London",
        name_ru: "Лондон",
    },
    City {
        id: "BERLIN",
        url: "https://code.s3.yandex.net/async-module/berlin-response.json",
        name_en: "Berlin",
        name_ru: "Берлин",
    },
    City {
        id: "BEIJING",
        url: "https://code.s3.yandex.net/async-module/beijing-response.json",
        name_en: "Beijing",
        name_ru: "Пекин",
    },
    City {
        id: "KAZAN",
        url: "https://code.s3.yandex.net/async-module/kazan-response.json",
        name_en: "Kazan",
        name_ru: "Казань",
    },
    City {
        id: "SPETERSBURG",
        url: "https://code.s3.yandex.net/async-module/spetersburg-response.json",
        name_en: "Saint Petersburg",
        name_ru: "Санкт-Петербург",
    },
    City {
        id: "VOLGOGRAD",
        url: "https://code.s3.yandex.net/async-module/volgograd-response.json",
        name_en: "Volgograd",
        name_ru: "Волгоград",
    },
    City {
        id: "NOVOSIBIRSK",
        url: "https://code.s3.yandex.net/async-module/novosibirsk-response.json",
        name_en: "Novosibirsk",
        name_ru: "Новосибирск",
    },
    City {
        id: "KALININGRAD",
        url: "https://code.s3.yandex.net/async-module/kaliningrad-response.json",
        name_en: "Kaliningrad",
        name_ru: "Калининград",
    },
    City {
        id: "ABUDHABI",
        url: "https://code.s3.yandex.net/async-module/abudhabi-response.json",
        name_en: "Abu Dhabi",
        name_ru: "Абу Даби",
    },
    City {
        id: "WARSZAWA",
        url: "https://code.s3.yandex.net/async-module/warszawa-response.json",
        name_en: "Warsaw",
        name_ru: "Варшава",
    },
    City {
        id: "BUCHAREST",
        url: "https://code.s3.yandex.net/async-module/bucharest-response.json",
        name_en: "Bucharest",
        name_ru: "Бухарест",
    },
    City {
        id: "ROMA",
        url: "https://code.s3.yandex.net/async-module/roma-response.json",
        name_en: "Rome",
        name_ru: "Рим",
    },
    City {
        id: "CAIRO",
        url: "https://code.s3.yandex.net/async-module/cairo-response.json",
        name_en: "Cairo",
        name_ru: "Каир",
    },
];

/// Returns all supported cities
pub fn all_cities() -> &'static [City] {
    &CITIES
}

/// Get a city by its identifier, ignoring case
///
/// # Returns
///
/// Returns `Some(&City)` if found, `None` otherwise
pub fn get_city_by_id(id: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.id.eq_ignore_ascii_case(id))
}

/// File name of a city's forecast document, e.g. "moscow-response.json"
pub fn forecast_file_name(id: &str) -> String {
    format!("{}-response.json", id.to_lowercase())
}
