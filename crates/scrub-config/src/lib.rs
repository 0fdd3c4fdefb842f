use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scrub_core::RedactStyle;

/// Simple configuration for scrub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub redaction: RedactionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// How long to wait for the OCR engine before proceeding without it.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_undo_depth")]
    pub max_undo_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    #[serde(default = "default_style")]
    pub default_style: RedactStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            history: HistoryConfig::default(),
            redaction: RedactionConfig::default(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_undo_depth: default_undo_depth(),
        }
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            default_style: default_style(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    8_000
}

fn default_undo_depth() -> usize {
    50
}

fn default_style() -> RedactStyle {
    RedactStyle::Blur
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, writing defaults when missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "scrub", "scrub") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.scrub/config.toml")
        }
    }
}
