//! Variable resolution
//!
//! Two placeholder syntaxes are substituted into the URL, header values and
//! body of a document:
//!
//! - `{{name}}` looks in the per-invocation overrides first, then in the
//!   active environment; unknown names are left as written.
//! - `${NAME}` reads the process environment; unset or empty variables are
//!   left as written.
//!
//! When overrides are given and the resolved body is a JSON object, every
//! override whose key already exists at the top level replaces that field
//! with a typed value (see [`coerce_override`]) and the body is re-serialized
//! with two-space indentation.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

use crate::document::Document;

/// Regex for `{{name}}` placeholders
static TEMPLATE_VAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("Invalid template var regex")
});

/// Regex for `${NAME}` placeholders
static PROCESS_VAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("Invalid process var regex")
});

/// Variable name to value
pub type Variables = HashMap<String, String>;

/// Where `{{name}}` placeholders get their values
#[derive(Debug, Clone, Default)]
pub struct VariableSources {
    /// Per-invocation values (`--set key=value`), highest precedence
    pub overrides: Variables,
    /// Values from the active environment file
    pub environment: Variables,
}

impl VariableSources {
    pub fn new(overrides: Variables, environment: Variables) -> Self {
        Self { overrides, environment }
    }

    /// Look a template variable up, overrides first
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.overrides
            .get(name)
            .or_else(|| self.environment.get(name))
            .map(String::as_str)
    }
}

/// Substitute both placeholder syntaxes in a piece of text
pub fn resolve_text(text: &str, sources: &VariableSources) -> String {
    resolve_text_with(text, sources, process_var)
}

/// Like [`resolve_text`] with a custom `${NAME}` lookup
pub fn resolve_text_with<F>(text: &str, sources: &VariableSources, env_lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let templated = TEMPLATE_VAR_RE.replace_all(text, |caps: &Captures| {
        match sources.lookup(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        }
    });

    PROCESS_VAR_RE
        .replace_all(&templated, |caps: &Captures| {
            expand_process_var(&caps[1], &env_lookup).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Expand `${NAME}` placeholders only
pub fn expand_process_vars(text: &str) -> String {
    PROCESS_VAR_RE
        .replace_all(text, |caps: &Captures| {
            expand_process_var(&caps[1], &process_var).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn expand_process_var<F>(name: &str, env_lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env_lookup(name).filter(|v| !v.is_empty())
}

fn process_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve every placeholder in a document, returning a new document
pub fn resolve_document(doc: &Document, sources: &VariableSources) -> Document {
    resolve_document_with(doc, sources, process_var)
}

/// Like [`resolve_document`] with a custom `${NAME}` lookup
pub fn resolve_document_with<F>(doc: &Document, sources: &VariableSources, env_lookup: F) -> Document
where
    F: Fn(&str) -> Option<String>,
{
    let resolve = |text: &str| resolve_text_with(text, sources, &env_lookup);

    let headers = doc
        .headers
        .iter()
        .map(|(k, v)| (k.clone(), resolve(v)))
        .collect();

    let mut body = String::new();
    if doc.has_body() {
        body = resolve(&doc.body);
        if !sources.overrides.is_empty() {
            if let Some(patched) = apply_overrides_to_json(&body, &sources.overrides) {
                body = patched;
            }
        }
    }

    Document {
        method: doc.method.clone(),
        url: resolve(&doc.url),
        headers,
        body,
        comments: doc.comments.clone(),
        docs: doc.docs.clone(),
    }
}

/// Replace existing top-level fields of a JSON object body
///
/// Returns `None` when the body is not a JSON object. Keys that are not
/// already present are never added.
pub fn apply_overrides_to_json(body: &str, overrides: &Variables) -> Option<String> {
    let mut object = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => {
            debug!("Body is not a JSON object, skipping overrides");
            return None;
        }
    };

    for (key, value) in overrides {
        if let Some(slot) = object.get_mut(key) {
            *slot = coerce_override(value);
        }
    }

    serde_json::to_string_pretty(&Value::Object(object)).ok()
}

/// Type an override value for a JSON body
///
/// `true`/`false` become booleans, `null` becomes null, anything that parses
/// as a finite number becomes a number, everything else stays a string.
pub fn coerce_override(value: &str) -> Value {
    match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => match value.parse::<f64>() {
            Ok(n) if n.is_finite() => number_value(n),
            _ => Value::String(value.to_string()),
        },
    }
}

/// Integral values print without a fractional part
fn number_value(n: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}
