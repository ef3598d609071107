use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config_file::Settings;

/// featuretui - browse precomputed regression models by feature combination
#[derive(Parser, Debug)]
#[command(name = "featuretui")]
#[command(about = "Pick input features and inspect the matching precomputed regression model")]
#[command(version)]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Metrics CSV path or http(s) URL, overrides the settings file
    #[arg(long, global = true)]
    pub metrics: Option<PathBuf>,

    /// Artifact base directory or URL, overrides the settings file
    #[arg(long, global = true)]
    pub artifacts: Option<String>,

    /// Extension appended to plot locators (e.g. svg)
    #[arg(long, global = true)]
    pub extension: Option<String>,

    /// Log file used while the terminal UI is running
    #[arg(long, global = true, default_value = "featuretui.log")]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive feature checklist (default)
    Tui,
    /// Resolve a feature selection without the terminal UI
    Resolve {
        /// Feature indices (0-11), in any order
        #[arg(allow_hyphen_values = true)]
        features: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List combination table positions
    Table {
        /// Only list combinations with this many features
        #[arg(short, long)]
        size: Option<usize>,
    },
    /// List the selectable features
    Features,
    /// Load settings and metrics, then report whether they are usable
    Validate,
    /// Write the effective settings to a JSON file
    SaveConfig {
        /// Destination path
        path: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether this invocation runs the terminal UI
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }

    /// Apply command line overrides on top of file settings
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(metrics) = &self.metrics {
            settings.metrics_path = metrics.clone();
        }
        if let Some(base) = &self.artifacts {
            settings.artifact_base = base.clone();
        }
        if let Some(ext) = &self.extension {
            settings.artifact_extension = Some(ext.clone());
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tui() {
        let cli = Cli::parse_from(["featuretui"]);
        assert!(cli.is_tui());
        assert_eq!(cli.log_file, PathBuf::from("featuretui.log"));
    }

    #[test]
    fn test_resolve_keeps_raw_entries() {
        let cli = Cli::parse_from(["featuretui", "resolve", "--json", "3", "x", "-1"]);
        assert_eq!(
            cli.command,
            Some(Commands::Resolve {
                features: vec!["3".into(), "x".into(), "-1".into()],
                json: true,
            })
        );
        assert!(!cli.is_tui());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "featuretui",
            "--metrics",
            "m.csv",
            "--artifacts",
            "https://example.org/assets",
            "--extension",
            "svg",
            "features",
        ]);
        let settings = cli.apply_overrides(Settings::default());
        assert_eq!(settings.metrics_path, PathBuf::from("m.csv"));
        assert_eq!(settings.artifact_base, "https://example.org/assets");
        assert_eq!(settings.artifact_extension.as_deref(), Some("svg"));
    }

    #[test]
    fn test_table_size_filter() {
        let cli = Cli::parse_from(["featuretui", "table", "--size", "12"]);
        assert_eq!(cli.command, Some(Commands::Table { size: Some(12) }));
    }
}
