//! CLI argument definitions for `leaflet`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "leaflet",
    version,
    about = "Interpret GS1 barcodes on medicine packs",
    long_about = "Interpret GS1 barcodes on medicine packs.\n\n\
                  Decodes element strings and Digital Link URIs, validates the GTIN\n\
                  check digit and evaluates the expiry date. Results are printed\n\
                  as JSON on stdout; logs go to stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: platform config dir, leaflet.toml).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interpret a scan and print the product record.
    Parse(ParseArgs),

    /// Validate a GTIN check digit.
    Gtin(GtinArgs),

    /// Normalize an expiry date and report whether it has passed.
    Expiry(ExpiryArgs),

    /// Render an ISO date (YYYY-MM-DD) the way records display it.
    FormatDate(FormatDateArgs),
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Scanned payload. Reads one payload per line from stdin when omitted.
    #[arg(value_name = "PAYLOAD")]
    pub payload: Option<String>,
}

#[derive(Debug, Args)]
pub struct GtinArgs {
    #[arg(value_name = "VALUE")]
    pub value: String,
}

#[derive(Debug, Args)]
pub struct ExpiryArgs {
    /// e.g. 250600, 2025-06-15, "15 Jun 2025", "Jun 2025"
    #[arg(value_name = "VALUE")]
    pub value: String,
}

#[derive(Debug, Args)]
pub struct FormatDateArgs {
    #[arg(value_name = "ISO_DATE")]
    pub date: String,

    /// Use full month names (June instead of Jun).
    #[arg(long = "full")]
    pub full: bool,

    /// Separator between day, month and year (default from config).
    #[arg(long = "separator", value_name = "SEP")]
    pub separator: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["leaflet", "-vv", "gtin", "09506000134352"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Gtin(ref args) if args.value == "09506000134352"));

        let cli = Cli::parse_from(["leaflet", "parse"]);
        assert!(matches!(cli.command, Command::Parse(ParseArgs { payload: None })));

        let cli = Cli::parse_from([
            "leaflet",
            "format-date",
            "2025-06-15",
            "--full",
            "--separator",
            "/",
            "--config",
            "/tmp/leaflet.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/leaflet.toml")));
        match cli.command {
            Command::FormatDate(args) => {
                assert!(args.full);
                assert_eq!(args.separator.as_deref(), Some("/"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
