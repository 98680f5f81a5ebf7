//! Application configuration.
//!
//! Settings are read from `.antmap.toml` in the working directory (or the
//! file given with `--config`). Every field is optional:
//!
//! ```toml
//! input_dir = "input"
//! output_dir = "output"
//! language = "pt"
//! messages = "lang/messages_pt.json"
//! max_paths = 1000
//! confirm_overwrite = true
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::lang::Language;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".antmap.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory listed when loading a map.
    pub input_dir: PathBuf,
    /// Directory that receives saved files.
    pub output_dir: PathBuf,
    /// Interface language.
    pub language: Language,
    /// Optional JSON file overriding individual messages.
    pub messages: Option<PathBuf>,
    /// Upper bound on the number of paths collected by an all-paths query.
    pub max_paths: usize,
    /// Ask before replacing an existing output file.
    pub confirm_overwrite: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            language: Language::En,
            messages: None,
            max_paths: 1000,
            confirm_overwrite: true,
        }
    }
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `.antmap.toml` in the
    /// current directory is used when present, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("can not open config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        info!("configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Writes the configuration as pretty TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        fs::write(&path, "language = \"tr\"\nmax_paths = 5\n").unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.language, Language::Tr);
        assert_eq!(config.max_paths, 5);
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert!(config.confirm_overwrite);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(dir.path().join("nope.toml").as_path())).is_err());
    }

    #[test]
    fn test_invalid_language_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        fs::write(&path, "language = \"klingon\"\n").unwrap();
        assert!(AppConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        let config = AppConfig {
            output_dir: PathBuf::from("out"),
            language: Language::Pt,
            messages: Some(PathBuf::from("lang/messages_pt.json")),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(Some(path.as_path())).unwrap(), config);
    }
}
