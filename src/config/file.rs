//! File-based configuration source.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ConfigError;

/// A configuration file, deserialized straight into the target by field name.
///
/// Files ending in `.toml` are read as TOML; anything else as JSON. Required
/// files that don't exist cause an error; optional ones are skipped.
#[derive(Debug, Clone)]
pub(crate) struct FileSource {
    path: PathBuf,
    required: bool,
}

/// A deserialized file and the top-level keys it contained.
#[derive(Debug)]
pub(crate) struct Loaded<T> {
    pub value: T,
    pub keys: Vec<String>,
}

impl FileSource {
    pub(crate) fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }

    /// Returns `Ok(None)` if the file doesn't exist and is optional.
    pub(crate) fn load<T: DeserializeOwned>(&self) -> Result<Option<Loaded<T>>, ConfigError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if self.required {
                    return Err(ConfigError::FileNotFound(self.path.clone()));
                }
                debug!(path = %self.path.display(), "optional config file not found");
                return Ok(None);
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let loaded = if self.is_toml() {
            self.parse_toml(&contents)?
        } else {
            self.parse_json(&contents)?
        };
        debug!(path = %self.path.display(), keys = loaded.keys.len(), "loaded config file");
        Ok(Some(loaded))
    }

    fn is_toml(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
    }

    fn parse_json<T: DeserializeOwned>(&self, contents: &str) -> Result<Loaded<T>, ConfigError> {
        let err = |source| ConfigError::ParseError {
            path: self.path.clone(),
            source,
        };

        let value: serde_json::Value = serde_json::from_str(contents).map_err(err)?;
        let keys = value
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        let value = serde_json::from_value(value).map_err(err)?;
        Ok(Loaded { value, keys })
    }

    fn parse_toml<T: DeserializeOwned>(&self, contents: &str) -> Result<Loaded<T>, ConfigError> {
        let err = |source| ConfigError::TomlParseError {
            path: self.path.clone(),
            source,
        };

        let table: toml::Table = toml::from_str(contents).map_err(err)?;
        let keys = table.keys().cloned().collect();
        let value = toml::Value::Table(table).try_into().map_err(err)?;
        Ok(Loaded { value, keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Settings {
        name: String,
        port: i64,
    }

    #[test]
    fn test_file_source_loads_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "fileValue", "port": 42, "unknown": true}}"#).unwrap();

        let loaded = FileSource::new(file.path(), true)
            .load::<Settings>()
            .unwrap()
            .unwrap();

        assert_eq!(loaded.value.name, "fileValue");
        assert_eq!(loaded.value.port, 42);
        assert_eq!(loaded.keys.len(), 3);
    }

    #[test]
    fn test_file_source_missing_keys_keep_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 8080}}"#).unwrap();

        let loaded = FileSource::new(file.path(), false)
            .load::<Settings>()
            .unwrap()
            .unwrap();

        assert_eq!(loaded.value.name, "");
        assert_eq!(loaded.keys, ["port"]);
    }

    #[test]
    fn test_file_source_loads_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "name = \"toml\"\nport = 7").unwrap();

        let loaded = FileSource::new(file.path(), true)
            .load::<Settings>()
            .unwrap()
            .unwrap();

        assert_eq!(loaded.value.name, "toml");
        assert_eq!(loaded.value.port, 7);
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = FileSource::new(file.path(), true).load::<Settings>();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_file_source_required_missing() {
        let source = FileSource::new("/nonexistent/path/config.json", true);
        let result = source.load::<Settings>();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_file_source_optional_missing() {
        let source = FileSource::new("/nonexistent/path/config.json", false);
        let loaded = source.load::<Settings>().unwrap();

        assert!(loaded.is_none());
    }
}
