//! Curl command generation
//!
//! Converts request documents to equivalent curl commands for sharing
//! and debugging.

use crate::devexp::shell::shell_escape;
use crate::document::Document;
use crate::http::method;

/// Line continuation between the parts of a generated command
const CONTINUATION: &str = " \\\n  ";

/// Generate an equivalent curl command from the document
///
/// The output imports back into the same method, URL, headers and body.
pub fn generate_curl(doc: &Document) -> String {
    let mut parts: Vec<String> = vec!["curl".to_string()];

    // Add method if not GET
    if !doc.method.is_empty() && doc.method != method::GET {
        parts.push(format!("-X {}", doc.method));
    }

    parts.push(shell_escape(&doc.url));

    for (name, value) in &doc.headers {
        parts.push(format!("-H {}", shell_escape(&format!("{}: {}", name, value))));
    }

    if doc.has_body() {
        parts.push(format!("-d {}", shell_escape(&doc.body)));
    }

    parts.join(CONTINUATION)
}
