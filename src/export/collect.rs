//! Gather request documents from a directory tree

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::ExportedRequest;
use crate::document::parse_document;
use crate::errors::Result;

/// File extension of request documents
pub const REQUEST_EXTENSION: &str = "http";

/// Walk `root` and parse every `.http` file into an [`ExportedRequest`]
///
/// Entries are visited in name order. Hidden entries are skipped and
/// symlinked directories are not followed. Subdirectories and files that
/// can't be read are logged and left out; only an unreadable `root` fails.
pub fn collect_requests(root: &Path) -> Result<Vec<ExportedRequest>> {
    let mut requests = Vec::new();
    walk(root, "", &mut requests)?;
    debug!(root = %root.display(), count = requests.len(), "Collected requests");
    Ok(requests)
}

fn walk(dir: &Path, folder: &str, out: &mut Vec<ExportedRequest>) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if file_name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if file_type.is_dir() {
            let child = if folder.is_empty() {
                file_name.to_string()
            } else {
                format!("{}/{}", folder, file_name)
            };
            if let Err(e) = walk(&path, &child, out) {
                warn!(path = %path.display(), error = %e, "Skipping unreadable directory");
            }
            continue;
        }

        let Some(name) = file_name.strip_suffix(&format!(".{}", REQUEST_EXTENSION)) else {
            continue;
        };

        match fs::read_to_string(&path) {
            Ok(content) => out.push(ExportedRequest::new(folder, name, parse_document(&content))),
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable request file"),
        }
    }

    Ok(())
}
