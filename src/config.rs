use crate::Algorithm;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = ".autocorrect.toml";

/// Effective settings after every layer has been applied
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub dictionary: Option<PathBuf>,
    pub algorithm: Algorithm,
    pub color: bool,
}

/// Contents of a single config file. Keys left out stay `None` so they never
/// override a lower-priority layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub dictionary: Option<PathBuf>,
    pub algorithm: Option<Algorithm>,
    pub color: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: None,
            algorithm: Algorithm::default(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        dictionary: Option<PathBuf>,
        algorithm: Option<Algorithm>,
        no_color: bool,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG);
        if local_path.exists() {
            config = config.merge(Self::from_file(&local_path)?);
        }

        if let Some(path) = dictionary {
            config.dictionary = Some(path);
        }
        if let Some(algorithm) = algorithm {
            config.algorithm = algorithm;
        }
        if no_color {
            config.color = false;
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(dictionary) = file.dictionary {
            self.dictionary = Some(dictionary);
        }
        if let Some(algorithm) = file.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(color) = file.color {
            self.color = color;
        }
        self
    }

    /// Word list to load: the configured one, else `words.txt` in the data directory
    pub fn dictionary_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.dictionary {
            return Ok(path.clone());
        }
        Self::data_dir()
            .map(|dir| dir.join("words.txt"))
            .context("No dictionary configured and no data directory available")
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "autocorrect").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "autocorrect").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.algorithm, Algorithm::Levenshtein);
        assert!(config.dictionary.is_none());
        assert!(config.color);
    }

    fn config_file(contents: &str) -> ConfigFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        Config::from_file(file.path()).unwrap()
    }

    #[test]
    fn test_merge_configs() {
        let merged = Config::default().merge(ConfigFile {
            algorithm: Some(Algorithm::LcsOffset),
            dictionary: Some(PathBuf::from("/tmp/words.txt")),
            ..Default::default()
        });
        assert_eq!(merged.algorithm, Algorithm::LcsOffset);
        assert_eq!(merged.dictionary, Some(PathBuf::from("/tmp/words.txt")));
        assert!(merged.color);
    }

    #[test]
    fn test_merge_keeps_unset_values() {
        let base = Config {
            algorithm: Algorithm::LcsOffset,
            dictionary: Some(PathBuf::from("words.txt")),
            color: false,
        };
        let merged = base.merge(ConfigFile::default());
        assert_eq!(merged.algorithm, Algorithm::LcsOffset);
        assert_eq!(merged.dictionary, Some(PathBuf::from("words.txt")));
        assert!(!merged.color);
    }

    #[test]
    fn test_local_file_without_color_keeps_global_color() {
        let global = config_file("color = false\n");
        let local = config_file("dictionary = \"words.txt\"\n");

        let merged = Config::default().merge(global).merge(local);
        assert!(!merged.color);
        assert_eq!(merged.dictionary, Some(PathBuf::from("words.txt")));
    }

    #[test]
    fn test_local_default_algorithm_overrides_global() {
        let global = config_file("algorithm = \"lcs-offset\"\n");
        let local = config_file("algorithm = \"levenshtein\"\n");

        let merged = Config::default().merge(global).merge(local);
        assert_eq!(merged.algorithm, Algorithm::Levenshtein);
    }

    #[test]
    fn test_from_file() {
        let file = config_file(
            "dictionary = \"/usr/share/dict/words\"\nalgorithm = \"lcs-offset\"\ncolor = false\n",
        );
        assert_eq!(file.dictionary, Some(PathBuf::from("/usr/share/dict/words")));
        assert_eq!(file.algorithm, Some(Algorithm::LcsOffset));
        assert_eq!(file.color, Some(false));
    }

    #[test]
    fn test_from_file_partial() {
        let file = config_file("algorithm = \"levenshtein\"\n");
        assert!(file.dictionary.is_none());
        assert_eq!(file.algorithm, Some(Algorithm::Levenshtein));
        assert!(file.color.is_none());
    }

    #[test]
    fn test_explicit_dictionary_path() {
        let config = Config {
            dictionary: Some(PathBuf::from("list.txt")),
            ..Default::default()
        };
        assert_eq!(config.dictionary_path().unwrap(), PathBuf::from("list.txt"));
    }
}
