//! Configuration management for navtree.
//!
//! Parses `navtree.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [sidebars]
//! path = "sidebars.json"
//!
//! [validation]
//! max_depth = 3
//! unique_across_sidebars = false
//! strict = false
//! ```

use std::path::{Path, PathBuf};

use navtree_sidebar::{DEFAULT_MAX_DEPTH, Validator};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override sidebar declaration file.
    pub sidebars_path: Option<PathBuf>,
    /// Override depth warning threshold.
    pub max_depth: Option<usize>,
    /// Override cross-sidebar uniqueness.
    pub unique_across_sidebars: Option<bool>,
    /// Override strict mode.
    pub strict: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navtree.toml";

/// Default sidebar declaration filename, relative to the config directory.
const DEFAULT_SIDEBARS_FILE: &str = "sidebars.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sidebar source configuration (path is a relative string from TOML).
    sidebars: SidebarsConfigRaw,
    /// Validation configuration.
    pub validation: ValidationConfig,

    /// Resolved sidebars configuration (set after loading).
    #[serde(skip)]
    pub sidebars_resolved: SidebarsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw sidebars configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SidebarsConfigRaw {
    path: Option<String>,
}

/// Resolved sidebars configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SidebarsConfig {
    /// Sidebar declaration file.
    pub path: PathBuf,
}

/// Validation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Depth above which a warning is reported.
    pub max_depth: usize,
    /// Require leaf ids to be unique across all sidebars.
    pub unique_across_sidebars: bool,
    /// Treat warnings as errors.
    pub strict: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unique_across_sidebars: false,
            strict: false,
        }
    }
}

impl ValidationConfig {
    /// Build a [`Validator`] with these options.
    #[must_use]
    pub fn validator(&self) -> Validator {
        Validator::new()
            .with_max_depth(self.max_depth)
            .unique_across_sidebars(self.unique_across_sidebars)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navtree.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(path) = &settings.sidebars_path {
            self.sidebars_resolved.path.clone_from(path);
        }
        if let Some(max_depth) = settings.max_depth {
            self.validation.max_depth = max_depth;
        }
        if let Some(unique) = settings.unique_across_sidebars {
            self.validation.unique_across_sidebars = unique;
        }
        if let Some(strict) = settings.strict {
            self.validation.strict = strict;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.max_depth == 0 {
            return Err(ConfigError::Validation(
                "validation.max_depth must be greater than 0".to_owned(),
            ));
        }
        if self.sidebars_resolved.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sidebars.path cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            sidebars: SidebarsConfigRaw::default(),
            validation: ValidationConfig::default(),
            sidebars_resolved: SidebarsConfig {
                path: base.join(DEFAULT_SIDEBARS_FILE),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.sidebars_resolved = SidebarsConfig {
            path: config_dir.join(self.sidebars.path.as_deref().unwrap_or(DEFAULT_SIDEBARS_FILE)),
        };
    }
}
