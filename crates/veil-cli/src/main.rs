use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "veil", version, about = "Alias-aware result masking and sensitive-data scanning")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rename graph and its transitive closure for a query.
    Aliases {
        /// SELECT statement to analyze
        #[arg(long)]
        sql: String,
    },

    /// Mask result rows of a query with the rules of a configuration file.
    Mask {
        /// SELECT statement the rows were produced by
        #[arg(long)]
        sql: String,

        /// JSON file holding an array of row objects
        #[arg(long)]
        rows: PathBuf,

        /// Veil configuration (YAML)
        #[arg(long, short = 'c', env = "VEIL_CONFIG", default_value = "veil.yaml")]
        config: PathBuf,

        /// Match result columns by exact name only
        #[arg(long, default_value_t = false)]
        no_alias_resolution: bool,
    },

    /// Scan a table/view of a JSON data file for sensitive values.
    Scan {
        /// JSON file mapping `[schema.]table` to `{ columns, rows }`
        #[arg(long)]
        data: PathBuf,

        /// Table or view to scan, `table` or `schema.table`
        #[arg(long)]
        table: String,

        /// Veil configuration (YAML) supplying patterns and scan settings
        #[arg(long, short = 'c', env = "VEIL_CONFIG")]
        config: Option<PathBuf>,

        /// Pattern to scan for (repeatable, appended after configured patterns)
        #[arg(long = "pattern", short = 'p')]
        patterns: Vec<String>,

        /// Maximum matching samples reported per column
        #[arg(long)]
        sample_limit: Option<usize>,
    },

    /// Validate a configuration file.
    Check {
        /// Veil configuration (YAML)
        #[arg(long, short = 'c', env = "VEIL_CONFIG", default_value = "veil.yaml")]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Aliases { sql } => commands::aliases::run(&sql)?,

        Command::Mask {
            sql,
            rows,
            config,
            no_alias_resolution,
        } => commands::mask::run(&sql, &rows, &config, no_alias_resolution)?,

        Command::Scan {
            data,
            table,
            config,
            patterns,
            sample_limit,
        } => commands::scan::run(&data, &table, config.as_deref(), patterns, sample_limit)?,

        Command::Check { config } => commands::check::run(&config)?,
    }

    Ok(())
}
