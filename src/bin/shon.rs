//! `shon` CLI: convert and format SHON files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # SHON → pretty JSON
//! shon to-json -i people.shon -o people.json
//!
//! # JSON → SHON (also writes a people.shos schema placeholder)
//! shon from-json -i people.json -o people.shon --sort
//!
//! # CSV → SHON with dictionary extraction
//! shon from-csv -i people.csv -o people.shon --ns people
//!
//! # Reformat (stdin → stdout when no paths are given)
//! shon fmt -i people.shon --indent 2 --trailing-commas
//!
//! # Minify
//! shon fmt -i people.shon --minify
//! ```
//!
//! Exit code 0 on success; any engine error exits nonzero with the error on
//! stderr. Output files are written atomically: a failed conversion leaves
//! an existing output file untouched.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::debug;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shon", version, about = "Conversion and formatting for SHON files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Trace pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert SHON to pretty-printed JSON
    ToJson {
        /// Input SHON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output JSON file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert JSON to SHON
    FromJson {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output SHON file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Name of the primary block
        #[arg(long, default_value = "data")]
        ns: String,
        #[command(flatten)]
        fmt: FormatArgs,
    },
    /// Convert CSV to SHON with dictionary extraction
    FromCsv {
        /// Input CSV file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output SHON file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Name of the primary block
        #[arg(long, default_value = "data")]
        ns: String,
        #[command(flatten)]
        fmt: FormatArgs,
    },
    /// Reformat or minify SHON
    Fmt {
        /// Input SHON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output SHON file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        fmt: FormatArgs,
    },
}

#[derive(Args)]
struct FormatArgs {
    /// Spaces per indentation level
    #[arg(short = 'n', long, default_value_t = 4)]
    indent: usize,

    /// Sort object keys alphabetically
    #[arg(short, long)]
    sort: bool,

    /// Render arrays of flat objects one per line
    #[arg(long)]
    compact_arrays: bool,

    /// End multi-line entry lists with a comma
    #[arg(long)]
    trailing_commas: bool,

    /// Collapse output to a single line and drop comments
    #[arg(short, long)]
    minify: bool,

    /// Inject a $type annotation on the primary block
    #[arg(long)]
    type_annotation: Option<String>,
}

impl FormatArgs {
    fn to_options(&self) -> shon::ShonOptions {
        let mut options = shon::ShonOptions::new()
            .with_indent(self.indent)
            .with_sort_keys(self.sort)
            .with_compact_arrays(self.compact_arrays)
            .with_trailing_commas(self.trailing_commas)
            .with_minify(self.minify);
        if let Some(annotation) = &self.type_annotation {
            options = options.with_type_annotation(annotation.clone());
        }
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::ToJson { input, output } => {
            let text = read_input(input.as_deref())?;
            debug!("parsing SHON input ({} bytes)", text.len());
            let doc = shon::parse(&text)?;
            debug!("exporting {} block(s) to JSON", doc.blocks.len());
            let json = shon::to_json_string(&doc)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::FromJson {
            input,
            output,
            ns,
            fmt,
        } => {
            let text = read_input(input.as_deref())?;
            debug!("importing JSON input ({} bytes)", text.len());
            let mut doc = shon::from_json_str(&text, &ns)?;
            if let Some(out_path) = output.as_deref() {
                if let Some(schema) = schema_name(Some(out_path)) {
                    write_schema_placeholder(out_path, &schema)?;
                    doc.schema = Some(schema);
                }
            }
            debug!("serializing block '{ns}'");
            let out = shon::to_string_with_options(&doc, &fmt.to_options());
            write_output(output.as_deref(), &out)?;
        }
        Commands::FromCsv {
            input,
            output,
            ns,
            fmt,
        } => {
            let text = read_input(input.as_deref())?;
            debug!("importing CSV input ({} bytes)", text.len());
            let doc = shon::from_csv_str(&text, &ns)?;
            debug!(
                "extracted {} dictionary block(s)",
                doc.blocks.len().saturating_sub(1)
            );
            let out = shon::to_string_with_options(&doc, &fmt.to_options());
            write_output(output.as_deref(), &out)?;
        }
        Commands::Fmt { input, output, fmt } => {
            let text = read_input(input.as_deref())?;
            debug!("reformatting {} bytes", text.len());
            let out = shon::format(&text, &fmt.to_options())?;
            write_output(output.as_deref(), &out)?;
        }
    }

    debug!("done");
    Ok(())
}

/// Schema placeholder name derived from the output file stem; none when
/// writing to stdout.
fn schema_name(output: Option<&Path>) -> Option<String> {
    let stem = output?.file_stem()?.to_string_lossy();
    Some(format!("{stem}.shos"))
}

/// The `.shos` sibling is an uninterpreted collaborator artifact; the engine
/// only carries its name in `$schema`.
fn write_schema_placeholder(output: &Path, schema: &str) -> Result<()> {
    let path = output.with_file_name(schema);
    atomic_write(&path, "// schema placeholder\n")
        .with_context(|| format!("Failed to write schema placeholder: {}", path.display()))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => atomic_write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display())),
        None => {
            print!("{content}");
            io::stdout().flush().context("Failed to write to stdout")
        }
    }
}

/// Write the full buffer to a temporary sibling, then rename into place, so
/// a failed conversion never leaves a partially-written output file.
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
