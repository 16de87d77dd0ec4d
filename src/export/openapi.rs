//! OpenAPI 3.0 export
//!
//! The output is written as literal text rather than through a YAML
//! encoder. Every string value is a single-quoted scalar.

use std::collections::BTreeMap;
use std::fmt::Write;

use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use tracing::warn;
use url::Url;

use super::ExportedRequest;

/// Single-quoted YAML scalar escaping: quotes are doubled, nothing else changes
fn escape_yaml(s: &str) -> String {
    s.replace('\'', "''")
}

/// Extract the URL path used to group operations
///
/// URLs that start with a placeholder (`{{base_url}}/users`) or lack a scheme
/// (`localhost:8080/users`) have no usable parsed path, so the path is located
/// by hand: first `/` after a `//`, else the first `/`, else `/`.
pub fn extract_path(raw: &str) -> String {
    if let Some(url) = Url::parse(raw).ok().filter(|url| !url.cannot_be_a_base()) {
        let path = percent_decode_str(url.path()).decode_utf8_lossy();
        if !path.is_empty() {
            return path.into_owned();
        }
    }

    if let Some(idx) = raw.find('/') {
        if let Some((_, after)) = raw.split_once("//") {
            if let Some(slash) = after.find('/') {
                return after[slash..].to_string();
            }
        }
        return raw[idx..].to_string();
    }

    "/".to_string()
}

pub(super) fn export(name: &str, requests: &[ExportedRequest]) -> String {
    // path -> lower-cased method -> request, methods in collection order
    let mut paths: BTreeMap<String, IndexMap<String, &ExportedRequest>> = BTreeMap::new();

    for req in requests {
        let method = req.document.method.to_lowercase();
        if method.is_empty() {
            warn!(request = %req.name, "Skipping request without a method");
            continue;
        }

        let path = extract_path(&req.document.url);
        let ops = paths.entry(path).or_default();
        if ops.contains_key(&method) {
            warn!(request = %req.name, method = %method, "Duplicate operation, keeping the first");
            continue;
        }
        ops.insert(method, req);
    }

    let mut out = String::new();
    out.push_str("openapi: '3.0.0'\n");
    out.push_str("info:\n");
    writeln!(out, "  title: '{}'", escape_yaml(name)).ok();
    out.push_str("  version: '1.0.0'\n");
    out.push_str("paths:\n");

    for (path, ops) in &paths {
        writeln!(out, "  '{}':", escape_yaml(path)).ok();
        for (method, req) in ops {
            writeln!(out, "    {}:", method).ok();
            write_operation(&mut out, req);
        }
    }

    out
}

fn write_operation(out: &mut String, req: &ExportedRequest) {
    let doc = &req.document;
    let docs = &doc.docs;

    let summary = docs
        .summary
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(&req.name);
    writeln!(out, "      summary: '{}'", escape_yaml(summary)).ok();

    if let Some(description) = docs.description.as_deref().filter(|d| !d.is_empty()) {
        writeln!(out, "      description: '{}'", escape_yaml(description)).ok();
    }

    if !req.folder.is_empty() {
        out.push_str("      tags:\n");
        writeln!(out, "        - '{}'", escape_yaml(&req.folder)).ok();
    }

    if !docs.params.is_empty() {
        out.push_str("      parameters:\n");
        for param in &docs.params {
            writeln!(out, "        - name: '{}'", escape_yaml(&param.name)).ok();
            writeln!(out, "          in: '{}'", escape_yaml(&param.location)).ok();
            if !param.description.is_empty() {
                writeln!(out, "          description: '{}'", escape_yaml(&param.description)).ok();
            }
            out.push_str("          schema:\n");
            out.push_str("            type: string\n");
        }
    }

    if doc.has_body() {
        let content_type = doc
            .header("Content-Type")
            .filter(|ct| !ct.is_empty())
            .unwrap_or("application/json");
        out.push_str("      requestBody:\n");
        out.push_str("        content:\n");
        writeln!(out, "          '{}':", escape_yaml(content_type)).ok();
        out.push_str("            schema:\n");
        out.push_str("              type: object\n");
    }

    out.push_str("      responses:\n");
    out.push_str("        '200':\n");
    out.push_str("          description: Successful response\n");
}
