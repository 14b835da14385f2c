//! Loading sidebar declarations from files.
//!
//! The file format is chosen by extension: `.json`, `.yaml`/`.yml`, or
//! `.toml`. Every format holds the same document shape, a map of sidebar
//! name to item list (see [`NavigationNode`](crate::NavigationNode) for item
//! shapes).

use std::path::{Path, PathBuf};

use crate::tree::NavigationTree;
use crate::validate::{ValidationError, Validator};

/// Error loading a sidebar declaration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading the file failed.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Extension not recognized.
    #[error("Unsupported sidebar file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Declaration parsed but is structurally invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Declaration file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
    /// TOML document.
    Toml,
}

impl Format {
    /// Detect format from file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse a declaration without validating it.
pub fn parse(content: &str, format: Format) -> Result<NavigationTree, LoadError> {
    let tree: NavigationTree = match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Toml => toml::from_str(content)?,
    };
    Ok(tree)
}

/// Read and parse a declaration file without validating it.
pub fn load_file(path: &Path) -> Result<NavigationTree, LoadError> {
    let format =
        Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tree = parse(&content, format)?;
    tracing::debug!(
        path = %path.display(),
        sidebars = tree.len(),
        "Loaded sidebar declarations"
    );
    Ok(tree)
}

/// Read, parse, and validate a declaration file.
pub fn load_and_validate(path: &Path, validator: &Validator) -> Result<NavigationTree, LoadError> {
    let tree = load_file(path)?;
    Ok(validator.validate(tree)?)
}
