//! `enumcheck` CLI — validate JSON documents against an `enum` constraint.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a subject from stdin against a schema file
//! echo '"green"' | enumcheck validate --schema color.schema.json
//!
//! # Inline permitted values instead of a schema file
//! enumcheck validate --values '["red","green","blue"]' -i subject.json
//!
//! # Validate one location inside a larger document
//! enumcheck validate --schema color.schema.json --pointer /palette/0 -i doc.json
//!
//! # Print the deduplicated `enum` descriptor
//! enumcheck describe --values '[1, 1.0, "x"]'
//! ```
//!
//! `validate` prints `valid` and exits 0 on a match. On a mismatch the error
//! (`<pointer>: <subject> is not a valid enum value`) goes to stderr and the
//! exit code is 1. Any other failure exits with 2.
//!
//! Logs go to stderr. `-v` enables debug output, `-vv` trace output, and
//! `RUST_LOG` overrides both.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use enum_schema::schema::{pointer_fragment, ROOT_POINTER};
use enum_schema::EnumSchema;
use serde_json::Value;
use std::io::{self, Read};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "enumcheck",
    version,
    about = "Validate JSON against JSON Schema enum constraints"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a JSON document is one of the permitted values
    Validate {
        #[command(flatten)]
        source: SchemaSource,
        /// Subject file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// JSON Pointer selecting the subject inside the input document
        #[arg(long)]
        pointer: Option<String>,
    },
    /// Print the deduplicated `enum` descriptor as JSON
    Describe {
        #[command(flatten)]
        source: SchemaSource,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Where the permitted values come from: a schema file or an inline array.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct SchemaSource {
    /// Schema file containing an "enum" keyword
    #[arg(long)]
    schema: Option<String>,
    /// Inline JSON array of permitted values
    #[arg(long)]
    values: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Validate {
            source,
            input,
            pointer,
        } => {
            let schema = load_schema(&source)?;
            let text = read_input(input.as_deref())?;
            let document: Value =
                serde_json::from_str(&text).context("Failed to parse subject as JSON")?;

            let (subject, location) = match pointer.as_deref() {
                Some(path) => {
                    let subject = document
                        .pointer(path)
                        .with_context(|| format!("No value at pointer: {}", path))?;
                    (subject, pointer_fragment(path))
                }
                None => (&document, ROOT_POINTER.to_string()),
            };

            tracing::debug!(location = %location, permitted = schema.len(), "validating subject");
            match schema.validate_at(subject, &location) {
                Ok(()) => {
                    println!("valid");
                    Ok(0)
                }
                Err(err) => {
                    eprintln!("{}", err);
                    Ok(1)
                }
            }
        }
        Commands::Describe { source, output } => {
            let schema = load_schema(&source)?;
            let pretty = serde_json::to_string_pretty(&schema)?;
            write_output(output.as_deref(), &pretty)?;
            Ok(0)
        }
    }
}

/// Build the schema from `--schema FILE` or `--values JSON`.
fn load_schema(source: &SchemaSource) -> Result<EnumSchema> {
    if let Some(path) = source.schema.as_deref() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file: {}", path))?;
        return text
            .parse::<EnumSchema>()
            .with_context(|| format!("Invalid enum schema: {}", path));
    }

    let raw = source.values.as_deref().unwrap_or("[]");
    let values: Value = serde_json::from_str(raw).context("Failed to parse --values as JSON")?;
    match values {
        Value::Array(items) => Ok(EnumSchema::new(items)),
        _ => anyhow::bail!("--values must be a JSON array"),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
