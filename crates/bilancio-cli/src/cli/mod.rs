use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `bilancio` binary.
#[derive(Debug, Parser)]
#[command(
    name = "bilancio",
    version,
    about = "Bilancio - balance-sheet analysis client"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Analysis backend origin (overrides configuration)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            base_url: self.base_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_defaults_to_fuzzy_matching() {
        let cli = Cli::try_parse_from(["bilancio", "analyze", "bilancio.xlsx"])
            .expect("cli should parse");

        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.file, PathBuf::from("bilancio.xlsx"));
        assert_eq!(args.matching, "fuzzy");
        assert!(args.out.is_none());
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn analyze_accepts_all_options() {
        let cli = Cli::try_parse_from([
            "bilancio",
            "analyze",
            "bilancio.xlsx",
            "--matching",
            "gpt",
            "--out",
            "exports",
            "-x",
            "json",
            "--year",
            "2023",
            "--save-response",
            "response.json",
        ])
        .expect("cli should parse");

        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.matching, "gpt");
        assert_eq!(args.out, Some(PathBuf::from("exports")));
        assert_eq!(args.export_format.as_deref(), Some("json"));
        assert_eq!(args.year.as_deref(), Some("2023"));
        assert_eq!(args.save_response, Some(PathBuf::from("response.json")));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bilancio",
            "indices",
            "--format",
            "json",
            "--quiet",
            "--base-url",
            "http://backend:8000",
        ])
        .expect("cli should parse");

        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.format, OutputFormat::Json);
        assert!(flags.quiet);
        assert_eq!(flags.base_url.as_deref(), Some("http://backend:8000"));
        assert!(matches!(cli.command, Commands::Indices));
    }

    #[test]
    fn export_requires_dataset() {
        let parsed = Cli::try_parse_from(["bilancio", "export", "response.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["bilancio", "--format", "xml", "matching"]);
        assert!(parsed.is_err());
    }
}
