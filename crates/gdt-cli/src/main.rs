use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gdt_core::{Document, FieldDesc, FieldId, FieldType, Report, build_report, catalog};
use glob::glob;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gdt")]
#[command(version)]
#[command(
    about = "Decoder for GDT device interchange files.",
    long_about = None,
    after_help = "Examples:\n  gdt dump result.gdt -o report.json\n  gdt dump result.gdt --stdout --pretty\n  gdt field result.gdt 3101"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a file and write a JSON report of every line.
    Dump {
        /// Path to a .gdt file (a glob matching one file is accepted)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Print the value of a field.
    Field {
        /// Path to a .gdt file (a glob matching one file is accepted)
        input: PathBuf,

        /// Four-digit field identifier, e.g. 3101
        id: u32,

        /// Print every occurrence instead of the first
        #[arg(long)]
        all: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Dump {
            input,
            report,
            stdout,
            pretty,
            quiet,
        } => cmd_dump(input, report, stdout, pretty, quiet),
        Commands::Field { input, id, all } => cmd_field(input, FieldId(id), all),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_dump(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    let document = load_document(&input)?;
    let meta = fs::metadata(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let rep = build_report(&input.display().to_string(), meta.len(), &document);
    let json = serialize_report(&rep, pretty)?;

    if stdout {
        println!("{}", json);
        return Ok(());
    }

    let report = report.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report or --stdout".to_string()),
        )
    })?;
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn cmd_field(input: PathBuf, id: FieldId, all: bool) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    let document = load_document(&input)?;
    let desc = catalog::lookup(id)
        .cloned()
        .unwrap_or_else(|| FieldDesc::new(id, FieldType::TEXT));

    if all {
        let values = document
            .fields(&desc)
            .map_err(|err| CliError::new(format!("field {id}: {err}"), None))?;
        for value in values {
            println!("{value}");
        }
        return Ok(());
    }

    let value = document.field(&desc).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("use `gdt dump --stdout` to list the fields present".to_string()),
        )
    })?;
    println!("{value}");
    Ok(())
}

fn load_document(input: &PathBuf) -> Result<Document, CliError> {
    validate_input_file(input)?;
    gdt_core::read_file(input)
        .with_context(|| format!("GDT decoding failed: {}", input.display()))
        .map_err(Into::into)
}

fn serialize_report(rep: &Report, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass the path of a .gdt file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the path of a .gdt file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        n => {
            let listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let more = if n > 3 { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{pattern}' ({n} matches); matches: {listed}{more}"
                ),
                Some("pass a single file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
