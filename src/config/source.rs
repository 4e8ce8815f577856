//! Configuration sources.
//!
//! The loader reads variables through [`EnvSource`] instead of `std::env`
//! directly, so the local `.env` preload is layering rather than a mutation
//! of the process environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::errors::ConfigError;

/// Key/value lookup the loader reads configuration from.
#[cfg_attr(test, automock)]
pub trait EnvSource: Send + Sync {
    /// Value for `key`, or `None` when unset.
    fn var(&self, key: &str) -> Option<String>;
}

impl<T: EnvSource + ?Sized> EnvSource for Box<T> {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values are treated as unset
        std::env::var(key).ok()
    }
}

/// Variables parsed from a local `KEY=value` file.
///
/// The file is read eagerly, so a missing or malformed file is reported
/// before any variable is looked up.
#[derive(Debug, Clone)]
pub struct DotenvFile {
    path: PathBuf,
    vars: HashMap<String, String>,
}

impl DotenvFile {
    /// Read and parse the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let env_file_error = |source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        };

        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(env_file_error)? {
            let (key, value) = item.map_err(env_file_error)?;
            // First definition wins, matching a non-overriding load
            vars.entry(key).or_insert(value);
        }

        tracing::debug!(path = %path.display(), count = vars.len(), "Env file loaded");

        Ok(Self {
            path: path.to_path_buf(),
            vars,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for DotenvFile {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Two sources stacked: `primary` is consulted first, `fallback` fills gaps.
#[derive(Debug, Clone)]
pub struct Layered<P, F> {
    primary: P,
    fallback: F,
}

impl<P: EnvSource, F: EnvSource> Layered<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: EnvSource, F: EnvSource> EnvSource for Layered<P, F> {
    fn var(&self, key: &str) -> Option<String> {
        self.primary.var(key).or_else(|| self.fallback.var(key))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_layered_prefers_primary() {
        let source = Layered::new(
            map(&[("TG_TOKEN", "from-env")]),
            map(&[("TG_TOKEN", "from-file"), ("SHEET_DB", "d1")]),
        );

        assert_eq!(source.var("TG_TOKEN").as_deref(), Some("from-env"));
        assert_eq!(source.var("SHEET_DB").as_deref(), Some("d1"));
        assert_eq!(source.var("SHEET_MSG"), None);
    }

    #[test]
    fn test_dotenv_file_parses_pairs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# local settings").unwrap();
        writeln!(file, "PSQL_HOST=db").unwrap();
        writeln!(file, "TG_TOKEN=\"quoted token\"").unwrap();
        writeln!(file, "PSQL_HOST=ignored").unwrap();

        let source = DotenvFile::from_path(file.path()).unwrap();

        assert_eq!(source.len(), 2);
        assert_eq!(source.var("PSQL_HOST").as_deref(), Some("db"));
        assert_eq!(source.var("TG_TOKEN").as_deref(), Some("quoted token"));
    }

    #[test]
    fn test_dotenv_file_comments_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing set yet").unwrap();

        let source = DotenvFile::from_path(file.path()).unwrap();

        assert!(source.is_empty());
        assert_eq!(source.var("PSQL_HOST"), None);
    }

    #[test]
    fn test_dotenv_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = DotenvFile::from_path(dir.path().join(".env")).unwrap_err();

        assert!(matches!(err, ConfigError::EnvFile { .. }));
        assert!(err.to_string().starts_with("envVar load"));
    }

    #[test]
    fn test_dotenv_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NOT A VALID LINE").unwrap();

        let err = DotenvFile::from_path(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("envVar load"));
    }
}
