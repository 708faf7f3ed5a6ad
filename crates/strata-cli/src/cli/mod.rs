use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `strata` binary.
#[derive(Debug, Parser)]
#[command(
    name = "strata",
    version,
    about = "Strata - structural risk scoring and governance decisions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::{ComponentCommands, DecisionCommands, ProjectCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "strata", "--format", "raw", "--limit", "10", "--verbose", "project", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Project {
                action: ProjectCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["strata", "project", "list", "--quiet"])
            .expect("cli should parse");
        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.global_flags().quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["strata", "--format", "xml", "project", "list"]).is_err());
    }

    #[test]
    fn scale_arguments_accept_labels() {
        let cli = Cli::try_parse_from([
            "strata",
            "project",
            "create",
            "--name",
            "Harbour Hospital",
            "--type",
            "Healthcare",
            "--regulatory",
            "High",
        ])
        .expect("cli should parse");
        let Commands::Project {
            action: ProjectCommands::Create { regulatory, .. },
        } = cli.command
        else {
            panic!("expected project create");
        };
        assert_eq!(regulatory, "High");
    }

    #[test]
    fn decision_record_defaults() {
        let cli = Cli::try_parse_from(["strata", "decision", "record", "cmp-1"])
            .expect("cli should parse");
        let Commands::Decision {
            action:
                DecisionCommands::Record {
                    component,
                    decision_type,
                    mitigation,
                },
        } = cli.command
        else {
            panic!("expected decision record");
        };
        assert_eq!(component, "cmp-1");
        assert_eq!(decision_type, "Governance Decision");
        assert!(!mitigation);
    }

    #[test]
    fn component_edit_defaults_match_reference_edit() {
        let cli = Cli::try_parse_from(["strata", "component", "edit", "cmp-1", "--mitigation"])
            .expect("cli should parse");
        let Commands::Component {
            action: ComponentCommands::Edit(args),
        } = cli.command
        else {
            panic!("expected component edit");
        };
        assert_eq!(args.edit_type, "Structural Edit");
        assert!((args.span - 12.5).abs() < f64::EPSILON);
        assert!((args.cost - 75_000.0).abs() < f64::EPSILON);
        assert!((args.delay - 7.0).abs() < f64::EPSILON);
        assert!(args.mitigation);
    }

    #[test]
    fn predict_takes_eight_comma_separated_features() {
        let cli = Cli::try_parse_from(["strata", "predict", "--features", "1,2,3,4,5,6,7,8"])
            .expect("cli should parse");
        let Commands::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.features.len(), 8);
    }
}
