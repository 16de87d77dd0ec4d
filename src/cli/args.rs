//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::devexp::Language;
use crate::export::ExportFormat;

/// Carmelia - plain-text HTTP request documents
#[derive(Parser, Debug, Clone)]
#[command(name = "carmelia", version, about, long_about = None)]
pub struct Args {
    /// Verbose logging on stderr (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log output format: text (default) or json (JSON Lines)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, global = true, default_value_t)]
    pub log_format: LogFormat,

    /// Project directory
    #[arg(short = 'C', long = "project", value_name = "DIR", global = true, default_value = ".")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a request document and print it as JSON
    Parse {
        /// Request file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Convert a curl command into a request document
    #[command(name = "import-curl")]
    ImportCurl {
        /// The curl command, or `-` for stdin
        #[arg(value_name = "COMMAND")]
        command: String,

        /// Save under the project's requests directory instead of printing
        #[arg(long, value_name = "PATH")]
        save: Option<PathBuf>,
    },

    /// Substitute variables into a request document
    Resolve {
        /// Request file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: String,

        /// Environment to load from .carmelia/envs
        #[arg(short, long, value_name = "NAME")]
        env: Option<String>,

        /// Override a variable (repeatable)
        #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        set: Vec<(String, String)>,

        /// Print the resolved document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the project's requests as a collection
    Export {
        #[arg(short, long, value_name = "FORMAT", value_parser = parse_export_format)]
        format: ExportFormat,

        /// Collection name (defaults to the project directory name)
        #[arg(short, long, value_name = "NAME")]
        name: Option<String>,

        /// Output file, or directory to write the default file name into
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Generate a code snippet for a request document
    Generate {
        /// Request file, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: String,

        #[arg(short, long, value_name = "LANG", value_parser = parse_language)]
        lang: Language,
    },

    /// List the project's environments
    Envs,

    /// Print the effective project config
    Config,
}

/// Log format for structured output
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {:?}", s)),
    }
}

fn parse_export_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: crate::errors::CarmeliaError| e.to_string())
}

fn parse_language(s: &str) -> Result<Language, String> {
    s.parse().map_err(|e: crate::errors::CarmeliaError| e.to_string())
}
