use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub search: SearchConfig,

    /// Where exported sections are written
    #[serde(default)]
    pub export: ExportConfig,

    /// Limits applied when reading input
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "plain", "json" or "tree"
    #[serde(default = "default_format")]
    pub format: String,

    /// Show line ranges next to section paths in plain listings
    #[serde(default = "default_show_lines")]
    pub show_lines: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Query applied when none is given on the command line
    #[serde(default)]
    pub default_query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Largest accepted input in bytes (default: 200 MiB)
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            show_lines: default_show_lines(),
        }
    }
}

fn default_format() -> String {
    "plain".to_string()
}

fn default_show_lines() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

fn default_export_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_max_bytes() -> u64 {
    200 * 1024 * 1024
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/fgtree/config.toml
    /// - Linux: ~/.config/fgtree/config.toml
    /// - Windows: %APPDATA%/fgtree/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fgtree").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                let contents = fs::read_to_string(&path).ok()?;
                match toml::from_str(&contents) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                        None
                    }
                }
            })
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("Could not determine config directory")?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        Ok(())
    }

    /// Size limit for input, `None` when set to 0
    pub fn max_input_bytes(&self) -> Option<u64> {
        (self.input.max_bytes > 0).then_some(self.input.max_bytes)
    }
}
