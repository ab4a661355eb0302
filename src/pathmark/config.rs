use crate::error::{PathmarkError, Result};
use crate::store::DEFAULT_INDENT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DATA_FILENAME: &str = "data.json";

/// Configuration for pathmark, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathmarkConfig {
    /// Where the document lives. Defaults to `data.json` in the data dir.
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Indent width of the saved JSON (0 writes compact JSON)
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Check integrity after load and repair when it fails
    #[serde(default = "default_auto_repair")]
    pub auto_repair: bool,
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

fn default_auto_repair() -> bool {
    true
}

impl Default for PathmarkConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            indent: default_indent(),
            auto_repair: default_auto_repair(),
        }
    }
}

impl PathmarkConfig {
    pub const KEYS: [&'static str; 3] = ["data-file", "indent", "auto-repair"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PathmarkError::Io)?;
        let config: PathmarkConfig =
            serde_json::from_str(&content).map_err(PathmarkError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PathmarkError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PathmarkError::Serialization)?;
        fs::write(config_path, content).map_err(PathmarkError::Io)?;
        Ok(())
    }

    /// The document path, resolved against the data directory.
    pub fn data_file_in(&self, data_dir: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(DATA_FILENAME),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(
                self.data_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| DATA_FILENAME.to_string()),
            ),
            "indent" => Some(self.indent.to_string()),
            "auto-repair" => Some(self.auto_repair.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "data-file" => {
                let trimmed = value.trim();
                self.data_file = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
                Ok(())
            }
            "indent" => {
                self.indent = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("Invalid indent: {} (expected a number)", value))?;
                Ok(())
            }
            "auto-repair" => {
                self.auto_repair = match value.trim() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(format!("Invalid auto-repair: {} (expected true/false)", value)),
                };
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
