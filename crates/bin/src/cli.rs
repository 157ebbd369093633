//! CLI argument definitions for the dataview binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Document file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    /// TOML configuration file
    Toml,
    /// JSON document
    Json,
}

impl FileFormat {
    /// Guess the format from a file extension, defaulting to TOML
    pub fn detect(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }
}

/// Inspect and convert hierarchical data documents
#[derive(Parser, Debug)]
#[command(name = "dataview")]
#[command(about = "Dataview: path-addressable views over TOML and JSON documents")]
#[command(version)]
pub struct Cli {
    /// Output as JSON instead of human-readable text
    #[arg(long, global = true, env = "DATAVIEW_JSON")]
    pub json: bool,

    /// Separator used to split paths given on the command line
    #[arg(short, long, global = true, default_value = ".", env = "DATAVIEW_SEPARATOR")]
    pub separator: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the keys of a document or one of its views
    Keys(KeysArgs),
    /// Print the value stored at a path
    Get(GetArgs),
    /// Convert a document between TOML and JSON
    Convert(ConvertArgs),
}

/// Input file shared by every command
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Document to read
    pub file: PathBuf,

    /// Input format; detected from the file extension when omitted
    #[arg(short, long, env = "DATAVIEW_FORMAT")]
    pub format: Option<FileFormat>,
}

impl InputArgs {
    pub fn format(&self) -> FileFormat {
        self.format.unwrap_or_else(|| FileFormat::detect(&self.file))
    }
}

/// Arguments for the keys command
#[derive(clap::Args, Debug)]
pub struct KeysArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// View to list; the whole document when omitted
    #[arg(short, long)]
    pub path: Option<String>,

    /// Include the keys of every nested view
    #[arg(short, long)]
    pub deep: bool,
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Path of the value to print
    pub path: String,
}

/// Arguments for the convert command
#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Target format
    #[arg(short, long)]
    pub to: FileFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
