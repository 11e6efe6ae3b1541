//! Result persistence
//!
//! Writes the renamed results as pretty-printed UTF-8 JSON and reads them
//! back for the final summary.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "result.json";

/// Reads and writes the results file
#[derive(Debug, Clone)]
pub struct ResultWriter {
    /// Path of the results file
    path: PathBuf,
}

impl ResultWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the parent directory of the results file exists
    fn ensure_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    /// Writes `value` to the results file, replacing any previous content
    ///
    /// Non-ASCII text is written as is.
    pub fn write(&self, value: &Value) -> io::Result<()> {
        self.ensure_dir()?;

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(&self.path, json)?;
        tracing::info!(path = %self.path.display(), "results written");
        Ok(())
    }

    /// Reads the results file back
    pub fn read(&self) -> io::Result<Value> {
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_writer(name: &str) -> (ResultWriter, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let writer = ResultWriter::new(temp_dir.path().join(name));
        (writer, temp_dir)
    }

    #[test]
    fn test_write_creates_file() {
        let (writer, temp_dir) = create_test_writer("result.json");

        writer.write(&json!([{"Город": "Москва"}])).expect("Write should succeed");

        let expected_path = temp_dir.path().join("result.json");
        assert!(expected_path.exists(), "Result file should exist");

        // Cyrillic is kept verbatim, not escaped
        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"Город\""));
        assert!(content.contains("\"Москва\""));
    }

    #[test]
    fn test_write_then_read() {
        let (writer, _temp_dir) = create_test_writer("result.json");
        let value = json!([{"city_name": "ROMA", "rating": 1}, {"city_name": "KAZAN", "rating": null}]);

        writer.write(&value).expect("Write should succeed");

        assert_eq!(writer.read().expect("Should read results"), value);
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("out").join("result.json");
        let writer = ResultWriter::new(nested.clone());

        writer.write(&json!([])).expect("Write should succeed");

        assert!(nested.exists(), "Nested result file should exist");
    }

    #[test]
    fn test_overwrite_existing_results() {
        let (writer, _temp_dir) = create_test_writer("result.json");

        writer.write(&json!({"first": 1})).expect("First write should succeed");
        writer.write(&json!({"second": 2})).expect("Second write should succeed");

        assert_eq!(writer.read().unwrap(), json!({"second": 2}));
    }

    #[test]
    fn test_read_missing_file() {
        let (writer, _temp_dir) = create_test_writer("missing.json");
        assert!(writer.read().is_err());
    }

    #[test]
    fn test_read_invalid_json() {
        let (writer, _temp_dir) = create_test_writer("broken.json");
        fs::write(writer.path(), "not json").unwrap();

        let err = writer.read().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
