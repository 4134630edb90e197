//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Specgate CLI - Check specification quality before agents act on it.
#[derive(Debug, Parser)]
#[command(name = "specgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SPECGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Engine preset, replacing the configured engine settings
    #[arg(short, long, value_enum, global = true)]
    pub preset: Option<PresetArg>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (scores and verdicts only)
    Quiet,
}

/// Engine presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Built-in defaults
    Default,
    /// Higher bars everywhere
    Strict,
    /// Lower bars everywhere
    Lenient,
}

impl PresetArg {
    /// Preset name as understood by the engine
    pub fn name(&self) -> &'static str {
        match self {
            PresetArg::Default => "default",
            PresetArg::Strict => "strict",
            PresetArg::Lenient => "lenient",
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score category coverage of a specification set
    Coverage(CoverageArgs),

    /// Check a question for leading or solution bias
    Bias(BiasArgs),

    /// Detect conflicts among specifications
    Conflicts(ConflictsArgs),

    /// Compare greedy and thorough paths toward a goal
    Paths(PathsArgs),

    /// Verify a single agent operation
    Verify(VerifyArgs),

    /// Verify many operations concurrently
    Batch(BatchArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the coverage command.
#[derive(Debug, Parser)]
pub struct CoverageArgs {
    /// JSON file containing an array of specifications
    #[arg(short, long)]
    pub specs: PathBuf,
}

/// Arguments for the bias command.
#[derive(Debug, Parser)]
pub struct BiasArgs {
    /// The question to analyze
    pub question: String,
}

/// Arguments for the conflicts command.
#[derive(Debug, Parser)]
pub struct ConflictsArgs {
    /// JSON file containing the existing specifications
    #[arg(short, long)]
    pub specs: PathBuf,

    /// JSON file of proposed specifications; only pairs involving them are checked
    #[arg(long)]
    pub proposed: Option<PathBuf>,
}

/// Arguments for the paths command.
#[derive(Debug, Parser)]
pub struct PathsArgs {
    /// Goal being planned
    #[arg(short, long)]
    pub goal: String,

    /// Specification maturity score (0-100)
    #[arg(short, long)]
    pub maturity: f64,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Action name, e.g. generate_question or generate_code
    #[arg(short, long)]
    pub action: String,

    /// Requesting agent
    #[arg(long, default_value = "cli")]
    pub agent: String,

    /// JSON file containing the project specifications
    #[arg(short, long)]
    pub specs: Option<PathBuf>,

    /// JSON file containing stored conflict records
    #[arg(long)]
    pub conflicts: Option<PathBuf>,

    /// Question text for generate_question
    #[arg(short, long)]
    pub question: Option<String>,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// JSON file containing an array of verification requests
    #[arg(short, long)]
    pub requests: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Where to write it (defaults to the configuration path)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_command() {
        let cli = Cli::parse_from(["specgate", "bias", "Should we use MongoDB?"]);
        match cli.command {
            Command::Bias(args) => assert_eq!(args.question, "Should we use MongoDB?"),
            _ => panic!("Expected Bias command"),
        }
    }

    #[test]
    fn test_verify_command_defaults() {
        let cli = Cli::parse_from([
            "specgate",
            "verify",
            "--action",
            "generate_code",
            "--specs",
            "specs.json",
        ]);
        match cli.command {
            Command::Verify(args) => {
                assert_eq!(args.agent, "cli");
                assert_eq!(args.specs, Some(PathBuf::from("specs.json")));
                assert!(args.question.is_none());
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "specgate", "paths", "--goal", "checkout", "--maturity", "40", "-f", "json", "-vv",
            "--preset", "strict",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.preset, Some(PresetArg::Strict));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["specgate", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { path, force },
            }) => {
                assert!(path.is_none());
                assert!(force);
            }
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_missing_required_argument() {
        assert!(Cli::try_parse_from(["specgate", "coverage"]).is_err());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(PresetArg::Lenient.name(), "lenient");
        assert!(specgate_gatekeeper::EngineConfig::preset(PresetArg::Default.name()).is_some());
    }
}
