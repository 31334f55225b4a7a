//! bibsql CLI - export bibliography libraries as MySQL scripts.

use anyhow::{Context, Result};
use bibsql::export::sql::collect_fields;
use bibsql::{ExportOptions, LibraryLoader, MySQLExporter, validate_database};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "bibsql")]
#[command(about = "Export bibliography libraries as MySQL schema and insert statements")]
#[command(version)]
struct Cli {
    /// Log verbosity: debug, info, warn, error
    #[arg(long, global = true, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the MySQL script for a library
    Export {
        /// Library file (.yaml, .yml or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file; the script is written to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML file with export options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Comma separated entry ids to export (default: all entries)
        #[arg(long, value_delimiter = ',')]
        keys: Option<Vec<String>>,

        /// Use the built-in BibTeX entry types if the library declares none
        #[arg(long)]
        standard_types: bool,
    },

    /// List the field columns a library exports to, in column order
    Fields {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long)]
        standard_types: bool,
    },

    /// Report problems the export would pass through silently
    Validate {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long)]
        standard_types: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.verbosity);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Export {
            input,
            output,
            config,
            keys,
            standard_types,
        } => {
            let db = load_library(&input, standard_types)?;
            let options = match config {
                Some(path) => ExportOptions::from_toml_file(&path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?,
                None => ExportOptions::default(),
            };
            let selection: Option<HashSet<String>> = keys.map(|k| k.into_iter().collect());
            let exporter = MySQLExporter::new(options);

            let summary = match output {
                Some(path) => exporter
                    .export_to_file(&db, selection.as_ref(), &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => {
                    let stdout = std::io::stdout();
                    let mut lock = stdout.lock();
                    exporter.write_database(&db, selection.as_ref(), &mut lock)?
                }
            };
            info!(
                "Export finished: {} entries, {} groups",
                summary.entries, summary.groups
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fields {
            input,
            standard_types,
        } => {
            let db = load_library(&input, standard_types)?;
            for field in &collect_fields(&db.entry_types) {
                println!("{}", field);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate {
            input,
            standard_types,
        } => {
            let db = load_library(&input, standard_types)?;
            let report = validate_database(&db, &collect_fields(&db.entry_types));
            if report.is_clean() {
                println!("Validation successful");
                return Ok(ExitCode::SUCCESS);
            }
            for warning in &report.warnings {
                println!("warning: {}", warning);
            }
            Ok(ExitCode::from(2))
        }
    }
}

fn load_library(path: &Path, standard_types: bool) -> Result<bibsql::BibliographyDatabase> {
    LibraryLoader::new()
        .with_standard_types_fallback(standard_types)
        .load_file(path)
        .with_context(|| format!("Failed to load library {}", path.display()))
}

fn setup_logging(verbosity: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // logs go to stderr so stdout carries only the script
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
