use crate::error::{BoltError, Result};
use crate::projection::DEFAULT_INDENT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILETYPE: &str = "boltdb";

pub const KEYS: &[&str] = &["indent", "filetype", "create-if-missing"];

/// Configuration for boltview, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoltConfig {
    /// Leading whitespace written before each entry line. Spaces and tabs only.
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Filetype set on the buffer after loading
    #[serde(default = "default_filetype")]
    pub filetype: String,

    /// Create the store file when opening a path that does not exist yet
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

fn default_filetype() -> String {
    DEFAULT_FILETYPE.to_string()
}

fn default_create_if_missing() -> bool {
    true
}

impl Default for BoltConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            filetype: default_filetype(),
            create_if_missing: default_create_if_missing(),
        }
    }
}

impl BoltConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: BoltConfig = serde_json::from_str(&content)?;
        validate_indent(&config.indent)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Display value for a config key. Whitespace in `indent` is escaped so it
    /// is visible.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "indent" => Some(self.indent.escape_default().to_string()),
            "filetype" => Some(self.filetype.clone()),
            "create-if-missing" => Some(self.create_if_missing.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "indent" => {
                let indent = unescape_indent(value);
                validate_indent(&indent)?;
                self.indent = indent;
            }
            "filetype" => {
                if value.trim().is_empty() {
                    return Err(BoltError::Api("filetype cannot be empty".to_string()));
                }
                self.filetype = value.trim().to_string();
            }
            "create-if-missing" => {
                self.create_if_missing = value.parse().map_err(|_| {
                    BoltError::Api(format!("expected true or false, got {}", value))
                })?;
            }
            _ => return Err(BoltError::Api(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

/// Accepts `\t` as typed on a command line.
fn unescape_indent(value: &str) -> String {
    value.replace("\\t", "\t")
}

fn validate_indent(indent: &str) -> Result<()> {
    if indent.is_empty() || !indent.chars().all(|c| c == ' ' || c == '\t') {
        return Err(BoltError::Api(
            "indent must be one or more spaces or tabs".to_string(),
        ));
    }
    Ok(())
}
