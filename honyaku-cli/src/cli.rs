//! Command-line interface definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Translate Japanese text from the command line, keeping the engine
/// warm in a background worker between invocations.
#[derive(Parser, Debug)]
#[command(name = "honyaku", version, about, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Text to translate; read from stdin when omitted
    pub text: Vec<String>,

    /// Run the engine in this process and show its diagnostics,
    /// bypassing the background worker
    #[arg(short, long)]
    pub verbose: bool,

    /// Ask the background worker to finish its queue and exit
    #[arg(long)]
    pub shutdown: bool,

    /// Path to a YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Internal worker daemon entry point
    #[command(hide = true)]
    Worker,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_arguments_collect() {
        let cli = Cli::parse_from(["honyaku", "こんにちは", "世界"]);
        assert_eq!(cli.text, vec!["こんにちは", "世界"]);
        assert!(!cli.verbose);
        assert!(!cli.shutdown);
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::parse_from(["honyaku", "-v", "テスト"]);
        assert!(cli.verbose);

        let cli = Cli::parse_from(["honyaku", "--shutdown"]);
        assert!(cli.shutdown);
        assert!(cli.text.is_empty());
    }

    #[test]
    fn test_worker_subcommand() {
        let cli = Cli::parse_from(["honyaku", "worker"]);
        assert!(matches!(cli.command, Some(Commands::Worker)));
    }
}
