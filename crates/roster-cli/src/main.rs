//! Roster CLI
//!
//! Command-line interface for Roster - student record management.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use roster_core::{Config, RosterService, SlotRecordStore, SortKey};

mod commands;
mod logging;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster - student record management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file (overrides ROSTER_CONFIG and the default location)
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a student record
    #[command(alias = "create")]
    Add {
        /// Student ID (8-15 digits)
        #[arg(long)]
        id: String,
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Replace the record at a row number
    Update {
        /// Row number as shown by `list`
        number: usize,
        /// Student ID (8-15 digits)
        #[arg(long)]
        id: String,
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Edit a record interactively
    Edit {
        /// Row number as shown by `list`
        number: usize,
    },
    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Row number as shown by `list`
        number: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List all records
    #[command(alias = "ls")]
    List,
    /// Show a single record
    Show {
        /// Row number as shown by `list`
        number: usize,
    },
    /// Reorder the roster (name: bubble sort, id: selection sort)
    Sort {
        /// Sort key: name or id
        key: SortKey,
    },
    /// Search by name (case-insensitive) or id
    Search {
        /// Search query
        query: String,
    },
    /// Show storage status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, slot, on_corrupt, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config_file.as_ref();

    // Config commands don't need the roster
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    let store = SlotRecordStore::from_config(&config);
    let mut roster = RosterService::open(store).map_err(commands::explain)?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::Add { id, name, email } => {
            commands::record::add(&mut roster, id, name, email, &output)
        }
        Commands::Update {
            number,
            id,
            name,
            email,
        } => commands::record::update(&mut roster, number, id, name, email, &output),
        Commands::Edit { number } => commands::record::edit(&mut roster, number, &output),
        Commands::Delete { number, yes } => {
            commands::record::delete(&mut roster, number, yes, &output)
        }
        Commands::List => commands::record::list(&roster, &output),
        Commands::Show { number } => commands::record::show(&roster, number, &output),
        Commands::Sort { key } => commands::record::sort(&mut roster, key, &output),
        Commands::Search { query } => commands::record::search(&roster, query, &output),
        Commands::Status => commands::status::show(&roster, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::try_parse_from([
            "roster", "add", "--id", "12345678", "--name", "Zoe", "--email", "z@a.com",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { id, name, email }) => {
                assert_eq!(id, "12345678");
                assert_eq!(name, "Zoe");
                assert_eq!(email, "z@a.com");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_cli_parses_sort_key() {
        let cli = Cli::try_parse_from(["roster", "sort", "id"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Sort { key: SortKey::Id })
        ));

        assert!(Cli::try_parse_from(["roster", "sort", "email"]).is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["roster", "search", "zo", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Search { .. })));
    }

    #[test]
    fn test_cli_defaults_to_list() {
        let cli = Cli::try_parse_from(["roster"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_delete_yes() {
        let cli = Cli::try_parse_from(["roster", "rm", "2", "-y"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { number: 2, yes: true })
        ));
    }
}
