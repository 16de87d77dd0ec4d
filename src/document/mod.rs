//! Request documents
//!
//! A request document is the plain-text definition of one HTTP request:
//!
//! ```http
//! # @summary List users
//! # @param page query Page number
//! GET {{base_url}}/users
//! Accept: application/json
//!
//! {"filter": "active"}
//! ```
//!
//! [`parser::parse_document`] turns that text into a [`Document`] and
//! [`render`] writes it back out.

pub mod parser;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use parser::parse_document;

/// Header map preserving insertion order; re-inserting a key keeps its slot
pub type Headers = IndexMap<String, String>;

/// A `@param` annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,
    /// Where the parameter lives (`query`, `path`, `header`, ...)
    pub location: String,
    #[serde(default)]
    pub description: String,
}

/// Structured annotations collected from the leading comment block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDocs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDoc>,
}

/// A parsed request document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Upper-case HTTP method, empty when no request line was found
    pub method: String,
    /// Request URL (may contain `{{var}}` / `${VAR}` placeholders)
    pub url: String,
    /// Request headers, keys as written
    #[serde(default)]
    pub headers: Headers,
    /// Request body, trailing blank lines stripped
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// Raw comment text, annotation lines included
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub docs: RequestDocs,
}

impl Document {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

/// Render a document back into its text form
///
/// The output re-parses to the same method, URL, headers and body.
pub fn render(doc: &Document) -> String {
    let mut lines: Vec<String> = Vec::new();

    for comment in &doc.comments {
        lines.push(format!("# {}", comment));
    }
    if !doc.comments.is_empty() {
        lines.push(String::new());
    }

    lines.push(format!("{} {}", doc.method, doc.url));

    for (key, value) in &doc.headers {
        lines.push(format!("{}: {}", key, value));
    }

    if doc.has_body() {
        lines.push(String::new());
        lines.push(doc.body.clone());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("X-Trace".to_string(), "{{trace}}".to_string());
        Document {
            method: "POST".to_string(),
            url: "{{base_url}}/users".to_string(),
            headers,
            body: "{\n  \"name\": \"John\"\n}".to_string(),
            comments: vec!["@summary Create user".to_string(), "plain note".to_string()],
            docs: RequestDocs {
                summary: Some("Create user".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_render_layout() {
        let text = render(&sample());
        assert_eq!(
            text,
            "# @summary Create user\n# plain note\n\nPOST {{base_url}}/users\n\
             Content-Type: application/json\nX-Trace: {{trace}}\n\n{\n  \"name\": \"John\"\n}"
        );
    }

    #[test]
    fn test_render_without_body_or_comments() {
        let doc = Document {
            method: "GET".to_string(),
            url: "https://example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(render(&doc), "GET https://example.com");
    }

    #[test]
    fn test_round_trip() {
        let doc = sample();
        let parsed = parse_document(&render(&doc));
        assert_eq!(parsed.method, doc.method);
        assert_eq!(parsed.url, doc.url);
        assert_eq!(parsed.headers, doc.headers);
        assert_eq!(parsed.body, doc.body);
        assert_eq!(parsed.comments, doc.comments);
        assert_eq!(parsed.docs, doc.docs);
    }

    #[test]
    fn test_round_trip_keeps_header_order() {
        let mut doc = sample();
        doc.headers.shift_remove("Content-Type");
        doc.headers.insert("Accept".to_string(), "*/*".to_string());
        doc.headers.insert("Content-Type".to_string(), "text/plain".to_string());

        let parsed = parse_document(&render(&doc));
        let keys: Vec<&str> = parsed.headers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["X-Trace", "Accept", "Content-Type"]);
    }

    #[test]
    fn test_round_trip_empty_header_value() {
        let mut doc = sample();
        doc.headers.insert("X-A".to_string(), String::new());
        doc.headers.insert("X-B".to_string(), "after".to_string());

        let parsed = parse_document(&render(&doc));
        assert_eq!(parsed.headers, doc.headers);
        assert_eq!(parsed.body, doc.body);
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let doc = sample();
        assert_eq!(doc.header("content-type"), Some("application/json"));
        assert_eq!(doc.header("Authorization"), None);
    }

    #[test]
    fn test_serialize_skips_empty_body() {
        let doc = Document {
            method: "GET".to_string(),
            url: "/".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("body").is_none());
        assert_eq!(json["docs"], serde_json::json!({}));
    }
}
