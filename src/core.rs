//! Command dispatch for the `carmelia` binary

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, LogFormat};
use crate::config::Config;
use crate::devexp::{curl_to_http, generate_code};
use crate::document::{parse_document, render, Document};
use crate::envfile;
use crate::errors::{CarmeliaError, Result};
use crate::export::{collect_requests, export_filename, generate_export, ExportFormat, ExportedRequest};
use crate::resolver::{resolve_document, VariableSources, Variables};
use crate::status::ExitStatus;

/// Stdin marker for file arguments
const STDIN_ARG: &str = "-";

/// Fallback collection name when the project directory has none
const DEFAULT_COLLECTION_NAME: &str = "collection";

/// Main entry point for the CLI.
///
/// Parses arguments, sets up logging and dispatches to the command handler.
pub fn run(args: Vec<String>) -> ExitStatus {
    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_logging(parsed.debug, parsed.log_format);
    debug!(?parsed, "Parsed arguments");

    match program(parsed) {
        Ok(status) => status,
        Err(e) => handle_error(e),
    }
}

/// Install the stderr subscriber
///
/// `RUST_LOG` wins; otherwise `debug` with `--debug` and `warn` without.
pub fn init_logging(debug: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    // A subscriber may already be set when run() is called more than once in-process
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

pub fn program(args: Args) -> Result<ExitStatus> {
    let project = args.project.as_path();

    match args.command {
        Command::Parse { file } => {
            let doc = read_document(&file)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Command::ImportCurl { command, save } => {
            let command = if command == STDIN_ARG { read_stdin()? } else { command };
            let text = curl_to_http(&command)?;
            match save {
                Some(rel) => {
                    let path = save_request(project, &rel, &text)?;
                    eprintln!("Saved {}", path.display());
                }
                None => print!("{}", text),
            }
        }
        Command::Resolve { file, env, set, json } => {
            let doc = read_document(&file)?;
            let environment = match env {
                Some(name) => envfile::load_env(project, &name)?,
                None => Variables::new(),
            };
            let overrides: Variables = set.into_iter().collect();
            let resolved = resolve_document(&doc, &VariableSources::new(overrides, environment));

            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                println!("{}", render(&resolved));
            }
        }
        Command::Export { format, name, output } => {
            export(project, format, name, output)?;
        }
        Command::Generate { file, lang } => {
            let doc = read_document(&file)?;
            println!("{}", generate_code(lang, &doc));
        }
        Command::Envs => {
            for name in envfile::list_envs(project)? {
                println!("{}", name);
            }
        }
        Command::Config => {
            print!("{}", Config::load(project)?.to_yaml()?);
        }
    }

    Ok(ExitStatus::Success)
}

fn handle_error(error: CarmeliaError) -> ExitStatus {
    eprintln!("carmelia: error: {}", error);
    ExitStatus::Error
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Read a file argument, `-` meaning stdin
fn read_input(file: &str) -> Result<String> {
    if file == STDIN_ARG {
        read_stdin()
    } else {
        Ok(fs::read_to_string(file)?)
    }
}

fn read_document(file: &str) -> Result<Document> {
    Ok(parse_document(&read_input(file)?))
}

/// Write an imported request under the requests dir, adding `.http` if missing
fn save_request(project: &Path, rel: &Path, text: &str) -> Result<PathBuf> {
    if rel.is_absolute() || rel.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(CarmeliaError::Argument(format!(
            "--save path must stay inside the requests directory: {}",
            rel.display()
        )));
    }

    let config = Config::load(project)?;
    let mut path = config.requests_dir(project).join(rel);
    if path.extension().is_none() {
        path.set_extension(crate::export::collect::REQUEST_EXTENSION);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, text)?;
    info!(path = %path.display(), "Saved imported request");
    Ok(path)
}

fn collection_name(project: &Path) -> String {
    project
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string())
}

fn export(project: &Path, format: ExportFormat, name: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load(project)?;
    let root = config.requests_dir(project);

    let requests: Vec<ExportedRequest> = if root.is_dir() {
        collect_requests(&root)?
    } else {
        debug!(root = %root.display(), "Requests directory does not exist");
        Vec::new()
    };

    let name = name.unwrap_or_else(|| collection_name(project));
    let text = generate_export(&name, &requests, format.key())?;

    match output {
        None => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
        Some(path) => {
            let path = if path.is_dir() {
                path.join(export_filename(&name, format.key()))
            } else {
                path
            };
            fs::write(&path, &text)?;
            eprintln!("Exported {} requests to {}", requests.len(), path.display());
        }
    }

    Ok(())
}
