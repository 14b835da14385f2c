//! `navtree show` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use navtree_config::{CliSettings, Config};
use navtree_sidebar::{NavigationTree, load_and_validate, render_outline};

use crate::error::CliError;
use crate::output::Output;

/// Output format for the show command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ShowFormat {
    /// Indented text outline.
    #[default]
    Outline,
    /// JSON in declaration shape.
    Json,
}

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Sidebar declaration file (default: `sidebars.path` from config).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover navtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show only this sidebar.
    #[arg(short, long)]
    sidebar: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: ShowFormat,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or validation fails, or the requested
    /// sidebar does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            sidebars_path: self.file,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let tree = load_and_validate(
            &config.sidebars_resolved.path,
            &config.validation.validator(),
        )?;

        let tree = select(tree, self.sidebar.as_deref())?;
        output.print(&render(&tree, self.format)?);
        Ok(())
    }
}

/// Keep only the named sidebar, or the whole tree if no name is given.
fn select(tree: NavigationTree, name: Option<&str>) -> Result<NavigationTree, CliError> {
    let Some(name) = name else {
        return Ok(tree);
    };
    let selected: NavigationTree = tree.into_iter().filter(|s| s.name == name).collect();
    if selected.is_empty() {
        return Err(CliError::Validation(format!("Sidebar not found: {name}")));
    }
    Ok(selected)
}

/// Render for stdout. The result has no trailing newline.
fn render(tree: &NavigationTree, format: ShowFormat) -> Result<String, CliError> {
    match format {
        ShowFormat::Outline => {
            let text = tree
                .iter()
                .map(render_outline)
                .collect::<Vec<_>>()
                .join("\n");
            Ok(text.trim_end_matches('\n').to_owned())
        }
        ShowFormat::Json => Ok(serde_json::to_string_pretty(tree)?),
    }
}
