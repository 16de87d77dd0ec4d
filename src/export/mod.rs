//! Collection export
//!
//! Serializes a set of request documents into formats other API tools
//! import:
//!
//! - `postman` - Postman Collection v2.1 JSON
//! - `insomnia` - Insomnia v4 export JSON
//! - `openapi` - OpenAPI 3.0 YAML skeleton
//!
//! Exports work on the unresolved documents, so `{{var}}` placeholders are
//! carried over as written.

pub mod collect;
mod insomnia;
mod openapi;
mod postman;

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::document::Document;
use crate::errors::{CarmeliaError, Result};

pub use collect::collect_requests;
pub use openapi::extract_path;

/// One document in an export, with its place in the collection
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedRequest {
    /// Slash-joined folder path, empty for the collection root
    pub folder: String,
    /// Display name (file name without extension)
    pub name: String,
    pub document: Document,
}

impl ExportedRequest {
    pub fn new(folder: impl Into<String>, name: impl Into<String>, document: Document) -> Self {
        Self {
            folder: folder.into(),
            name: name.into(),
            document,
        }
    }
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Postman,
    Insomnia,
    OpenApi,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Postman, ExportFormat::Insomnia, ExportFormat::OpenApi];

    /// Format key as used on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ExportFormat::Postman => "postman",
            ExportFormat::Insomnia => "insomnia",
            ExportFormat::OpenApi => "openapi",
        }
    }

    /// Suffix appended to the collection's file-safe name
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ExportFormat::Postman => ".postman_collection.json",
            ExportFormat::Insomnia => ".insomnia.json",
            ExportFormat::OpenApi => ".openapi.yaml",
        }
    }

    /// File-picker label and pattern
    pub fn file_filter(&self) -> (&'static str, &'static str) {
        match self {
            ExportFormat::Postman | ExportFormat::Insomnia => ("JSON Files (*.json)", "*.json"),
            ExportFormat::OpenApi => ("YAML Files (*.yaml)", "*.yaml"),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExportFormat {
    type Err = CarmeliaError;

    fn from_str(s: &str) -> Result<Self> {
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| CarmeliaError::UnsupportedFormat(s.to_string()))
    }
}

/// Serialize requests into the given format
///
/// Fails on an unknown format key or an empty request list.
pub fn generate_export(name: &str, requests: &[ExportedRequest], format: &str) -> Result<String> {
    let format: ExportFormat = format.parse()?;

    if requests.is_empty() {
        return Err(CarmeliaError::EmptyCollection {
            format: format.key().to_string(),
        });
    }

    let output = match format {
        ExportFormat::Postman => postman::export(name, requests)?,
        ExportFormat::Insomnia => insomnia::export(name, requests)?,
        ExportFormat::OpenApi => openapi::export(name, requests),
    };

    info!(format = %format, requests = requests.len(), bytes = output.len(), "Generated export");
    Ok(output)
}

/// Lower-cased collection name with spaces replaced by hyphens
fn file_safe_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Default output file name for an export
pub fn export_filename(name: &str, format: &str) -> String {
    let suffix = format
        .parse::<ExportFormat>()
        .map(|f| f.file_suffix())
        .unwrap_or(".json");
    format!("{}{}", file_safe_name(name), suffix)
}

/// File-picker label and pattern for a format
pub fn export_file_filter(format: &str) -> (&'static str, &'static str) {
    format
        .parse::<ExportFormat>()
        .map(|f| f.file_filter())
        .unwrap_or(("All Files", "*.*"))
}
