use serde::{Deserialize, Serialize};
use sitecraft_editor::EditorOptions;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "sitecraft.config.json";

/// Sitecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Undo levels kept per document (0 = unlimited)
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,

    /// Seed for generated ids
    #[serde(default = "default_session_name")]
    pub session_name: String,

    /// Site file used when a command is not given one
    #[serde(default = "default_output")]
    pub default_output: String,
}

fn default_undo_levels() -> usize {
    100
}

fn default_session_name() -> String {
    "sitecraft".to_string()
}

fn default_output() -> String {
    "site.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Resolve `path` (or the configured default) against `cwd`
    pub fn resolve(&self, cwd: &str, path: Option<&PathBuf>) -> PathBuf {
        match path {
            Some(path) => PathBuf::from(cwd).join(path),
            None => PathBuf::from(cwd).join(&self.default_output),
        }
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            undo_levels: self.undo_levels,
            session_name: self.session_name.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            undo_levels: default_undo_levels(),
            session_name: default_session_name(),
            default_output: default_output(),
        }
    }
}
