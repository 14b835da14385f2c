//! `navtree check` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use navtree_config::{CliSettings, Config};
use navtree_sidebar::{Report, Validator, load_file};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Sidebar declaration files (default: `sidebars.path` from config).
    files: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover navtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Warn when a category nests deeper than this (overrides config).
    #[arg(long)]
    max_depth: Option<usize>,

    /// Reject document ids repeated in different sidebars.
    #[arg(long)]
    unique_across_sidebars: bool,

    /// Treat warnings as errors.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any file fails validation.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            max_depth: self.max_depth,
            unique_across_sidebars: self.unique_across_sidebars.then_some(true),
            strict: self.strict.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let validator = config.validation.validator();
        let strict = config.validation.strict;

        let files = if self.files.is_empty() {
            vec![config.sidebars_resolved.path.clone()]
        } else {
            self.files
        };

        let mut failed = 0;
        for path in &files {
            output.highlight(&path.display().to_string());
            match check_file(path, &validator) {
                Ok(report) => {
                    print_report(&output, &report);
                    if passes(&report, strict) {
                        output.success("  OK");
                    } else {
                        failed += 1;
                    }
                }
                Err(err) => {
                    output.error(&format!("  {err}"));
                    failed += 1;
                }
            }
        }

        output.info(&format!("Checked {} file(s)", files.len()));
        if failed > 0 {
            return Err(CliError::Validation(format!(
                "{failed} of {} file(s) failed validation",
                files.len()
            )));
        }
        Ok(())
    }
}

/// Load a declaration file and collect all findings.
fn check_file(path: &Path, validator: &Validator) -> Result<Report, CliError> {
    let tree = load_file(path)?;
    tracing::info!(path = %path.display(), sidebars = tree.len(), "Checking sidebars");
    Ok(validator.check(&tree))
}

/// Errors always fail a file; warnings fail it only in strict mode.
fn passes(report: &Report, strict: bool) -> bool {
    report.is_ok() && !(strict && report.has_warnings())
}

fn print_report(output: &Output, report: &Report) {
    for err in &report.errors {
        output.error(&format!("  error: {err}"));
    }
    for warning in &report.warnings {
        output.warning(&format!("  warning: {warning}"));
    }
}
