//! Adverse weather conditions
//!
//! Loads the set of condition labels that count against a city from a
//! newline-delimited resource such as:
//!
//! ```text
//! light-rain — небольшой дождь.
//! overcast — пасмурно.
//! ```
//!
//! Only lines whose first token is a known adverse keyword, or whose
//! description mentions rain, hail, snow, drizzle, showers or thunder, are kept.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

/// Condition labels considered adverse for a vacation
pub const ADVERSE_KEYWORDS: [&str; 15] = [
    "drizzle",
    "light-rain",
    "rain",
    "moderate-rain",
    "heavy-rain",
    "continuous-heavy-rain",
    "showers",
    "wet-snow",
    "light-snow",
    "snow",
    "snow-showers",
    "hail",
    "thunderstorm",
    "thunderstorm-with-rain",
    "thunderstorm-with-hail",
];

/// Word stems marking a condition description as adverse
const ADVERSE_STEMS: [&str; 6] = ["дожд", "град", "снег", "морось", "ливень", "гроза"];

/// Default name of the conditions resource
pub const CONDITIONS_FILE_NAME: &str = "conditions.txt";

/// Errors that can occur when loading conditions
#[derive(Debug, Error)]
pub enum ConditionsError {
    /// The resource could not be read
    #[error("Failed to read conditions from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Immutable, de-duplicated set of adverse condition labels in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionSet {
    labels: Vec<String>,
    lookup: HashSet<String>,
}

impl ConditionSet {
    /// Builds a set from labels, keeping the first occurrence of each
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for label in labels {
            set.insert(label.into());
        }
        set
    }

    /// The built-in adverse keyword list
    pub fn builtin() -> Self {
        Self::new(ADVERSE_KEYWORDS)
    }

    fn insert(&mut self, label: String) {
        if self.lookup.insert(label.clone()) {
            self.labels.push(label);
        }
    }

    /// Reads a conditions resource
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        let mut set = Self::default();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            if let Some(label) = adverse_label(&line) {
                set.insert(label.to_string());
            }
        }
        Ok(set)
    }

    /// Loads a conditions resource from `path`
    pub fn load(path: &Path) -> Result<Self, ConditionsError> {
        let io_err = |source| ConditionsError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let set = Self::from_reader(file).map_err(io_err)?;
        tracing::info!(path = %path.display(), count = set.len(), "loaded adverse conditions");
        Ok(set)
    }

    /// Whether `condition` is adverse
    pub fn contains(&self, condition: &str) -> bool {
        self.lookup.contains(condition)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in load order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Returns the condition label of `line` if the line describes an adverse condition
fn adverse_label(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace();
    let label = tokens.next()?;
    if ADVERSE_KEYWORDS.contains(&label) {
        return Some(label);
    }
    let description = line[line.find(label)? + label.len()..].to_lowercase();
    ADVERSE_STEMS
        .iter()
        .any(|stem| description.contains(stem))
        .then_some(label)
}

/// Finds the conditions resource
///
/// Checks, in order: the explicit path, `./conditions.txt`,
/// `./resources/conditions.txt` and the platform config directory.
pub fn locate_conditions_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let mut candidates = vec![
        PathBuf::from(CONDITIONS_FILE_NAME),
        Path::new("resources").join(CONDITIONS_FILE_NAME),
    ];
    if let Some(dirs) = ProjectDirs::from("", "", "bestcity") {
        candidates.push(dirs.config_dir().join(CONDITIONS_FILE_NAME));
    }

    candidates.into_iter().find(|path| path.is_file())
}

/// Loads the conditions resource, falling back to the built-in keywords
pub fn load_conditions(explicit: Option<&Path>) -> Result<ConditionSet, ConditionsError> {
    match locate_conditions_file(explicit) {
        Some(path) => ConditionSet::load(&path),
        None => {
            tracing::warn!("no conditions file found, using built-in adverse conditions");
            Ok(ConditionSet::builtin())
        }
    }
}
