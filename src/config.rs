use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::ledger::DEFAULT_CAPACITY;

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Slots in the ledger, Total included.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Ledger file used when none is given on the command line.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            path: None,
        }
    }
}

impl Configuration {
    pub fn load(path: &Path) -> Result<Configuration> {
        let file = File::open(path)?;
        let configuration: Configuration = serde_json::from_reader(file)?;
        configuration.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.capacity == 0 {
            return Err(anyhow!("capacity must leave room for Total"));
        }
        Ok(self)
    }

    /// The command line path wins over the configured one.
    pub fn ledger_path(&self, given: Option<&PathBuf>) -> Option<PathBuf> {
        given.or(self.path.as_ref()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(text: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        File::create(&path)?.write_all(text.as_bytes())?;
        Ok((dir, path))
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let (_dir, path) = write_config("{}")?;
        let configuration = Configuration::load(&path)?;
        assert_eq!(configuration.capacity, DEFAULT_CAPACITY);
        assert_eq!(configuration.path, None);

        Ok(())
    }

    #[test]
    fn test_values() -> Result<()> {
        let (_dir, path) = write_config(r#"{ "capacity": 25, "path": "budget.txt" }"#)?;
        let configuration = Configuration::load(&path)?;
        assert_eq!(configuration.capacity, 25);
        assert_eq!(configuration.path, Some(PathBuf::from("budget.txt")));

        Ok(())
    }

    #[test]
    fn test_rejects_zero_capacity_and_unknown_keys() -> Result<()> {
        let (_dir, path) = write_config(r#"{ "capacity": 0 }"#)?;
        assert!(Configuration::load(&path).is_err());

        let (_dir, path) = write_config(r#"{ "capcity": 5 }"#)?;
        assert!(Configuration::load(&path).is_err());

        Ok(())
    }

    #[test]
    fn test_ledger_path_precedence() {
        let configuration = Configuration {
            capacity: DEFAULT_CAPACITY,
            path: Some(PathBuf::from("configured.txt")),
        };
        let given = PathBuf::from("given.txt");
        assert_eq!(configuration.ledger_path(Some(&given)), Some(given.clone()));
        assert_eq!(
            configuration.ledger_path(None),
            Some(PathBuf::from("configured.txt"))
        );
        assert_eq!(Configuration::default().ledger_path(None), None);
    }
}
