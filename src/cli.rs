//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "phpcheck",
    version,
    about = "Run PHP linters and merge their reports",
    long_about = "phpcheck — run php -l, phpcs and phpmd against PHP files and present one merged, line-indexed report.\n\nConfiguration precedence: CLI > phpcheck.toml > defaults.",
    after_help = "Examples:\n  phpcheck sniff src/Controller/HomeController.php\n  phpcheck sniff 'src/**/*.php' --output json\n  phpcheck sniff src/Foo.php --pick\n  phpcheck config",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current phpcheck version.")]
    Version,
    /// Analyse files with every enabled tool
    #[command(
        about = "Analyse files",
        long_about = "Run the syntax linter, style checker and complexity detector on each file and print the merged report. Exits 1 when anything is reported.",
        after_help = "Examples:\n  phpcheck sniff src/Foo.php\n  phpcheck sniff 'src/**/*.php' --no-complexity\n  phpcheck sniff src/Foo.php --on-save"
    )]
    Sniff {
        #[arg(long, help = "Directory to look up phpcheck.toml from (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show the numbered list and prompt for a finding to jump to")]
        pick: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Treat the run as save-triggered (background run, honours display.on_save)")]
        on_save: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Verbose debug logging")]
        debug: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable the syntax linter")]
        no_syntax: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable the style checker")]
        no_style: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable the complexity detector")]
        no_complexity: bool,
        #[arg(required = true, help = "Files or glob patterns")]
        paths: Vec<String>,
    },
    /// Print effective settings
    #[command(
        about = "Print effective settings",
        long_about = "Resolve phpcheck.toml|yaml with defaults and print the result as JSON."
    )]
    Config {
        #[arg(long, help = "Directory to look up phpcheck.toml from (default: current dir)")]
        repo_root: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sniff_flags() {
        let cli = Cli::try_parse_from([
            "phpcheck",
            "sniff",
            "--output",
            "json",
            "--no-complexity",
            "a.php",
            "src/*.php",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Sniff {
                output,
                no_complexity,
                no_style,
                paths,
                ..
            } => {
                assert_eq!(output.as_deref(), Some("json"));
                assert!(no_complexity);
                assert!(!no_style);
                assert_eq!(paths, vec!["a.php", "src/*.php"]);
            }
            _ => panic!("expected sniff"),
        }
    }

    #[test]
    fn test_sniff_requires_paths() {
        assert!(Cli::try_parse_from(["phpcheck", "sniff"]).is_err());
    }
}
