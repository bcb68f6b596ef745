//! Configuration management.
//!
//! Configuration is read from `--config <path>` or
//! `~/.config/feedpane/config.toml`. If the default file doesn't exist, one
//! with comments is created. Missing fields fall back to defaults.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::DEFAULT_TIMEOUT;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: Vec<SourceConfig>,
    pub fetch: FetchConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            fetch: FetchConfig::default(),
            colors: ColorConfig::default(),
            keybindings: KeybindingConfig::default(),
        }
    }
}

/// One feed to poll. Order in the file is the order on screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
}

impl SourceConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new(
            "Jobs DOU PHP",
            "https://jobs.dou.ua/vacancies/feeds/?category=PHP",
        ),
        SourceConfig::new(
            "Jobs DOU Golang",
            "https://jobs.dou.ua/vacancies/feeds/?category=Golang",
        ),
        SourceConfig::new(
            "Jobs DOU Architect",
            "https://jobs.dou.ua/vacancies/feeds/?category=Architect",
        ),
    ]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// Abort the whole application on the first failed fetch.
    pub fail_fast: bool,
    /// Upper bound on concurrent fetches; unset means one per source.
    pub max_concurrency: Option<usize>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            fail_fast: false,
            max_concurrency: None,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. The default path is created with
    /// commented defaults on first run. Call [`Config::validate`] once
    /// command-line overrides are applied.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("feedpane").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }

        for source in &self.sources {
            let parsed = url::Url::parse(&source.url).map_err(|e| ConfigError::InvalidSource {
                name: source.name.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidSource {
                    name: source.name.clone(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }

        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "fetch.timeout_secs must be greater than zero".into(),
            ));
        }

        let invalid = self.keybindings.invalid_bindings();
        if !invalid.is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "unknown key bindings: {}",
                invalid.join(", ")
            )));
        }

        Ok(())
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# feedpane configuration
#
# Colors are named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB", "#RGB").
#
# Keys are single characters ("j"), special keys (Enter, Tab, BackTab, Esc,
# Up, Down, PageUp, PageDown, Space, F1-F12) or combinations ("Ctrl+c").

# Sources are shown in the order they appear here.
[[sources]]
name = "Jobs DOU PHP"
url = "https://jobs.dou.ua/vacancies/feeds/?category=PHP"

[[sources]]
name = "Jobs DOU Golang"
url = "https://jobs.dou.ua/vacancies/feeds/?category=Golang"

[[sources]]
name = "Jobs DOU Architect"
url = "https://jobs.dou.ua/vacancies/feeds/?category=Architect"

[fetch]
# Give up on a feed after this many seconds
timeout_secs = 60

# Quit on the first feed that fails to load instead of marking it unavailable
fail_fast = false

# Maximum feeds fetched at once (default: all of them)
# max_concurrency = 4

[colors]
selected_row = "Red"
unselected_row = "Yellow"
cursor_bg = "DarkGray"
active_border = "Cyan"
inactive_border = "DarkGray"
header = "Green"
footer = "Gray"
error = "LightRed"

[keybindings]
quit = ["Esc", "Ctrl+c"]
select = ["Enter"]
move_up = ["Up", "k"]
move_down = ["Down", "j"]
page_up = ["PageUp"]
page_down = ["PageDown"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]
"##
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("No sources configured")]
    NoSources,

    #[error("Invalid source '{name}': {reason}")]
    InvalidSource { name: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}
