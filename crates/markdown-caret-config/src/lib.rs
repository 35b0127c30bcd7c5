use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "MARKDOWN_CARET_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid toolbar_breakpoints {breakpoints:?}: {reason}")]
    InvalidBreakpoints {
        breakpoints: Vec<f64>,
        reason: &'static str,
    },
}

/// User settings for the formatting commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ascending widths; each one starts a toolbar layout tier.
    pub toolbar_breakpoints: Vec<f64>,
    /// Characters counted as part of a word on top of letters, digits and `_`.
    pub word_chars: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toolbar_breakpoints: vec![0.0, 480.0, 768.0, 1024.0],
            word_chars: String::new(),
        }
    }
}

impl Config {
    /// Parse and validate TOML text; `origin` only labels errors.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content, path).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Load the user's config, falling back to defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    /// Write as pretty TOML, creating missing parent directories.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)
    }

    /// Write to [`Config::config_path`].
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path();
        self.write_to(&path)?;
        Ok(path)
    }

    /// `$MARKDOWN_CARET_CONFIG` (shell-expanded) if set, otherwise
    /// `~/.config/markdown-caret/config.toml`.
    pub fn config_path() -> PathBuf {
        let custom = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .and_then(|raw| shellexpand::full(&raw).ok().map(|p| p.into_owned()));
        match custom {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(shellexpand::tilde("~/.config/markdown-caret").as_ref())
                .join("config.toml"),
        }
    }

    /// Breakpoints must be non-empty, finite and ascending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidBreakpoints {
            breakpoints: self.toolbar_breakpoints.clone(),
            reason,
        };

        if self.toolbar_breakpoints.is_empty() {
            return Err(invalid("at least one breakpoint is required"));
        }
        if self.toolbar_breakpoints.iter().any(|b| !b.is_finite()) {
            return Err(invalid("breakpoints must be finite numbers"));
        }
        if self.toolbar_breakpoints.windows(2).any(|w| w[0] > w[1]) {
            return Err(invalid("breakpoints must be in ascending order"));
        }
        Ok(())
    }
}
