//! crm-import CLI - map CSV exports onto CRM leads and properties
//!
//! # Main Commands
//!
//! ```bash
//! crm-import leads leads.csv              # Import leads, print the JSON report
//! crm-import properties listings.csv      # Import properties, print the JSON report
//! crm-import leads leads.csv --payload    # Print the /leads/bulk request body instead
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! crm-import parse input.csv      # Just tokenize the CSV to JSON rows
//! crm-import detect input.csv     # Show which header maps to which field
//! crm-import fields               # Show the field dictionary
//! ```
//!
//! Progress goes to stderr; `CRM_IMPORT_LOG` (info|warning|error|quiet)
//! sets the default verbosity and may come from a `.env` file.

use clap::{Parser, Subcommand, ValueEnum};
use crm_import::{
    configure_logging, csv_to_json, detect, fields_description, import_file, parse_csv_file,
    read_csv_file, CliError, CliResult, ImportKind, ImportOptions, ImportOutcome, ImportReport,
    LogConfig, LogFormat,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "crm-import")]
#[command(about = "Map CSV exports onto CRM leads and properties", long_about = None)]
struct Cli {
    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Progress output format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Import leads from a CSV file
    Leads(ImportArgs),

    /// Import properties from a CSV file
    Properties(ImportArgs),

    /// Parse a CSV file and output JSON rows
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the detected header mapping of a CSV file
    Detect {
        /// Input CSV file
        input: PathBuf,
    },

    /// Show canonical fields and their header aliases
    Fields,
}

#[derive(clap::Args)]
struct ImportArgs {
    /// Input CSV file
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the bulk-insert request body instead of the report
    #[arg(long)]
    payload: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Failed rows logged individually
    #[arg(long, default_value = "10")]
    max_logged_errors: usize,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    configure_logging(log_config(&cli));

    let result = match cli.command {
        Commands::Leads(args) => cmd_import(ImportKind::Leads, &args),
        Commands::Properties(args) => cmd_import(ImportKind::Properties, &args),
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),
        Commands::Detect { input } => cmd_detect(&input),
        Commands::Fields => cmd_fields(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Environment first, flags on top.
fn log_config(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::from_env();
    if cli.quiet {
        config.min_level = None;
    }
    if let Some(format) = cli.log_format {
        config.format = match format {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        };
    }
    config
}

fn cmd_import(kind: ImportKind, args: &ImportArgs) -> CliResult<()> {
    let options = ImportOptions {
        max_logged_errors: args.max_logged_errors,
        ..ImportOptions::default()
    };

    let outcome = import_file(&args.input, kind, &options)?;
    let success = outcome.success();
    let failed = outcome.failed();

    let json = if args.payload {
        to_json(&outcome.into_payload(), args.compact)?
    } else {
        match outcome {
            ImportOutcome::Leads(run) => to_json(&ImportReport::from(run), args.compact)?,
            ImportOutcome::Properties(run) => to_json(&ImportReport::from(run), args.compact)?,
        }
    };
    write_output(&json, args.output.as_deref())?;

    if success {
        Ok(())
    } else {
        Err(CliError::ImportFailed { failed })
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> CliResult<()> {
    eprintln!("📄 Parsing CSV: {}", input.display());
    let content = read_csv_file(input)?;
    let rows = csv_to_json(&content);
    eprintln!("✅ Parsed {} records", rows.len());

    write_output(&serde_json::to_string_pretty(&rows)?, output)
}

fn cmd_detect(input: &Path) -> CliResult<()> {
    let parsed = parse_csv_file(input)?;
    let table = detect(&parsed.headers);

    eprintln!("📋 {} columns, {} rows", parsed.headers.len(), parsed.row_count());
    let unmapped: Vec<&str> = parsed
        .headers
        .iter()
        .map(String::as_str)
        .filter(|h| table.iter().all(|m| m.csv_column != *h))
        .collect();
    if !unmapped.is_empty() {
        eprintln!("⚠️  Unmapped columns: {}", unmapped.join(", "));
    }

    let mappings: Vec<_> = table.iter().collect();
    write_output(&serde_json::to_string_pretty(&mappings)?, None)
}

fn cmd_fields() -> CliResult<()> {
    println!("{}", fields_description());
    Ok(())
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn write_output(content: &str, path: Option<&Path>) -> CliResult<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
