//! CLI tool for table data files.
//!
//! Provides commands for:
//! - Importing a JSON data file and reporting the stored row count
//! - Re-exporting a data file through the table engine
//! - Looking up rows by secondary index

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use memtable_core::schema::TableSchema;
use memtable_core::table::Table;
use memtable_core::types::Record;

/// Command-line arguments for the table tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Table schema file (JSON)
    #[arg(short, long)]
    schema: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a data file and print the number of stored rows
    Import {
        /// JSON array of row objects
        #[arg(short, long)]
        data: PathBuf,

        /// Skip rows whose primary key is already stored
        #[arg(long)]
        ignore_existing: bool,
    },

    /// Load a data file and write it back out as JSON
    Export {
        /// JSON array of row objects
        #[arg(short, long)]
        data: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the rows matching an index key
    Lookup {
        /// JSON array of row objects
        #[arg(short, long)]
        data: PathBuf,

        /// Index name
        #[arg(short, long)]
        index: String,

        /// Index field values as field=value (repeatable)
        #[arg(short, long = "key", required = true)]
        keys: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let schema: TableSchema = serde_json::from_reader(BufReader::new(
        File::open(&cli.schema)
            .with_context(|| format!("Failed to open schema {}", cli.schema.display()))?,
    ))
    .with_context(|| format!("Invalid schema {}", cli.schema.display()))?;

    match cli.command {
        Commands::Import {
            data,
            ignore_existing,
        } => {
            let (_, stored) = load_table(&schema, &data, ignore_existing)?;
            println!("{stored}");
        }
        Commands::Export { data, output } => {
            let (table, _) = load_table(&schema, &data, false)?;
            let written = match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    table.write_json(BufWriter::new(file))?
                }
                None => {
                    let written = table.write_json(io::stdout().lock())?;
                    println!();
                    written
                }
            };
            tracing::info!("Exported {} rows from table {}", written, table.name());
        }
        Commands::Lookup { data, index, keys } => {
            let (table, _) = load_table(&schema, &data, false)?;
            let filter = parse_filter(&keys)?;
            let mut stdout = io::stdout().lock();
            for row in table.get_by_index(&index, &filter)? {
                serde_json::to_writer(&mut stdout, &row)?;
                writeln!(stdout)?;
            }
        }
    }

    Ok(())
}

/// Builds the table and loads a data file into it.
///
/// Compute fields carry no handlers here and are always taken verbatim
/// from the data file.
fn load_table(schema: &TableSchema, data: &Path, ignore_existing: bool) -> anyhow::Result<(Table, usize)> {
    let mut table = schema.build(&HashMap::new())?;
    let file = File::open(data).with_context(|| format!("Failed to open {}", data.display()))?;
    let stored = table
        .read_json(BufReader::new(file), ignore_existing)
        .with_context(|| format!("Failed to load {}", data.display()))?;
    Ok((table, stored))
}

/// Parses `field=value` pairs into an index filter.
fn parse_filter(pairs: &[String]) -> anyhow::Result<Record> {
    let mut filter = Record::new();
    for pair in pairs {
        let Some((field, value)) = pair.split_once('=') else {
            bail!("Expected field=value, got '{pair}'");
        };
        filter.insert(field.trim(), value);
    }
    Ok(filter)
}
