//! Cache policy configuration

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Capacity used by bounded caches when none is given
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Selects between the unbounded and bounded caching policies
///
/// ```toml
/// bounded = true
/// max_size = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enforce `max_size` with insertion-order eviction
    #[serde(default)]
    pub bounded: bool,

    /// Maximum number of entries for a bounded cache
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

impl CacheConfig {
    /// Keep every computed value
    pub fn unbounded() -> Self {
        Self {
            bounded: false,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Keep at most `max_size` values
    pub fn bounded(max_size: usize) -> Self {
        Self {
            bounded: true,
            max_size,
        }
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}

fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_unbounded() {
        let config = CacheConfig::default();

        assert!(!config.bounded);
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    }

    #[test]
    fn test_parse_bounded() {
        let config = CacheConfig::from_toml_str("bounded = true\nmax_size = 10\n").unwrap();

        assert_eq!(config, CacheConfig::bounded(10));
    }

    #[test]
    fn test_parse_defaults() {
        let config = CacheConfig::from_toml_str("bounded = true").unwrap();
        assert_eq!(config.max_size, 1000);

        let config = CacheConfig::from_toml_str("").unwrap();
        assert_eq!(config, CacheConfig::unbounded());
    }

    #[test]
    fn test_parse_invalid() {
        let result = CacheConfig::from_toml_str("max_size = \"lots\"");
        assert!(matches!(result, Err(Error::Config(_))));

        let result = CacheConfig::from_toml_str("max_size = -1");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bounded = true").unwrap();
        writeln!(file, "max_size = 25").unwrap();

        let config = CacheConfig::load(file.path()).unwrap();
        assert_eq!(config, CacheConfig::bounded(25));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = CacheConfig::load(dir.path().join("missing.toml"));

        assert!(matches!(result, Err(Error::Io(_))));
    }
}
