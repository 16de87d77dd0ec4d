//! Line-oriented parser for request documents
//!
//! The scan walks the text once, moving through four phases:
//! leading comments, the request line, headers, then the body.
//! Malformed input never fails; missing parts are left empty.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{Document, Headers, ParamDoc, RequestDocs};

static REQUEST_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(GET|POST|PUT|DELETE|PATCH|HEAD|OPTIONS)\s+(.+)$")
        .expect("Invalid request line regex")
});

static HEADER_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)\s*:\s*(.*)$").expect("Invalid header line regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Comments,
    RequestLine,
    Headers,
    Body,
}

/// Parse request document text
pub fn parse_document(content: &str) -> Document {
    let mut comments = Vec::new();
    let mut docs = RequestDocs::default();
    let mut method = String::new();
    let mut url = String::new();
    let mut headers = Headers::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut phase = Phase::Comments;

    for line in content.split('\n') {
        let trimmed = line.trim();

        if phase == Phase::Comments {
            if trimmed.is_empty() {
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix('#') {
                let text = rest.trim();
                apply_annotation(text, &mut docs);
                comments.push(text.to_string());
                continue;
            }
            phase = Phase::RequestLine;
        }

        match phase {
            Phase::Comments | Phase::RequestLine => {
                if let Some(caps) = REQUEST_LINE_RE.captures(trimmed) {
                    method = caps[1].to_uppercase();
                    url = caps[2].trim().to_string();
                    phase = Phase::Headers;
                }
            }
            Phase::Headers => {
                if trimmed.is_empty() {
                    phase = Phase::Body;
                } else if let Some(caps) = HEADER_LINE_RE.captures(trimmed) {
                    headers.insert(caps[1].to_string(), caps[2].trim().to_string());
                } else {
                    phase = Phase::Body;
                    body_lines.push(line);
                }
            }
            Phase::Body => body_lines.push(line),
        }
    }

    while body_lines.last().is_some_and(|l| l.trim().is_empty()) {
        body_lines.pop();
    }

    if method.is_empty() {
        debug!(lines = content.split('\n').count(), "No request line found in document");
    }

    Document {
        method,
        url,
        headers,
        body: body_lines.join("\n"),
        comments,
        docs,
    }
}

/// Record `@summary`, `@description` and `@param` annotations
fn apply_annotation(text: &str, docs: &mut RequestDocs) {
    if let Some(summary) = text.strip_prefix("@summary ") {
        docs.summary = Some(summary.trim().to_string());
    } else if let Some(description) = text.strip_prefix("@description ") {
        docs.description = Some(description.trim().to_string());
    } else if let Some(param) = text.strip_prefix("@param ") {
        let parts: Vec<&str> = param.split_whitespace().collect();
        if let [name, location, rest @ ..] = parts.as_slice() {
            docs.params.push(ParamDoc {
                name: name.to_string(),
                location: location.to_string(),
                description: rest.join(" "),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_get() {
        let doc = parse_document("GET https://example.com/users");
        assert_eq!(doc.method, "GET");
        assert_eq!(doc.url, "https://example.com/users");
        assert!(doc.headers.is_empty());
        assert!(doc.body.is_empty());
    }

    #[test]
    fn test_lowercase_method_is_normalized() {
        let doc = parse_document("post   /items  ");
        assert_eq!(doc.method, "POST");
        assert_eq!(doc.url, "/items");
    }

    #[test]
    fn test_headers_and_body() {
        let content = "POST https://api.example.com/users\n\
                       Content-Type: application/json\n\
                       Authorization :  Bearer {{token}}\n\
                       \n\
                       {\n  \"name\": \"John\"\n}\n\n\n";
        let doc = parse_document(content);
        assert_eq!(doc.headers.len(), 2);
        assert_eq!(doc.headers["Content-Type"], "application/json");
        assert_eq!(doc.headers["Authorization"], "Bearer {{token}}");
        assert_eq!(doc.body, "{\n  \"name\": \"John\"\n}");
    }

    #[test]
    fn test_header_value_keeps_later_colons() {
        let doc = parse_document("GET /\nX-Url: http://a:8080/b");
        assert_eq!(doc.headers["X-Url"], "http://a:8080/b");
    }

    #[test]
    fn test_empty_header_value() {
        let doc = parse_document("GET /\nX-Empty:\nX-Blank:   \nAccept: */*");
        assert_eq!(doc.headers["X-Empty"], "");
        assert_eq!(doc.headers["X-Blank"], "");
        assert_eq!(doc.headers["Accept"], "*/*");
        assert!(doc.body.is_empty());
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let doc = parse_document("GET /\nX-A: 1\nX-B: 2\nX-A: 3");
        assert_eq!(doc.headers["X-A"], "3");
        let keys: Vec<&str> = doc.headers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["X-A", "X-B"]);
    }

    #[test]
    fn test_non_header_line_starts_body() {
        let doc = parse_document("POST /form\nContent-Type: text/plain\nhello world\nsecond line");
        assert_eq!(doc.headers.len(), 1);
        assert_eq!(doc.body, "hello world\nsecond line");
    }

    #[test]
    fn test_blank_lines_inside_body_are_kept() {
        let doc = parse_document("POST /\n\nline one\n\n  \nline two\n   \n");
        assert_eq!(doc.body, "line one\n\n  \nline two");
    }

    #[test]
    fn test_comments_and_annotations() {
        let content = "# Users endpoint\n\
                       \n\
                       # @summary List users\n\
                       #@description Returns every user\n\
                       # @param page query Page number to fetch\n\
                       # @param id path\n\
                       # @param broken\n\
                       GET /users";
        let doc = parse_document(content);
        assert_eq!(
            doc.comments,
            vec![
                "Users endpoint",
                "@summary List users",
                "@description Returns every user",
                "@param page query Page number to fetch",
                "@param id path",
                "@param broken",
            ]
        );
        assert_eq!(doc.docs.summary.as_deref(), Some("List users"));
        assert_eq!(doc.docs.description.as_deref(), Some("Returns every user"));
        assert_eq!(doc.docs.params.len(), 2);
        assert_eq!(doc.docs.params[0].name, "page");
        assert_eq!(doc.docs.params[0].location, "query");
        assert_eq!(doc.docs.params[0].description, "Page number to fetch");
        assert_eq!(doc.docs.params[1].description, "");
    }

    #[test]
    fn test_annotation_without_text_is_plain_comment() {
        let doc = parse_document("# @summary\nGET /");
        assert_eq!(doc.docs.summary, None);
        assert_eq!(doc.comments, vec!["@summary"]);
    }

    #[test]
    fn test_invalid_lines_before_request_line_are_skipped() {
        let doc = parse_document("# note\nnot a request\nFETCH /x\nPUT /things/1\nAccept: */*");
        assert_eq!(doc.method, "PUT");
        assert_eq!(doc.url, "/things/1");
        assert_eq!(doc.headers["Accept"], "*/*");
    }

    #[test]
    fn test_comments_after_request_line_are_not_comments() {
        let doc = parse_document("GET /\n# not a header\nX-A: 1");
        assert!(doc.comments.is_empty());
        assert!(doc.headers.is_empty());
        assert_eq!(doc.body, "# not a header\nX-A: 1");
    }

    #[test]
    fn test_no_request_line_degrades_to_empty() {
        let doc = parse_document("# only a comment\nthis is not http\n");
        assert_eq!(doc.method, "");
        assert_eq!(doc.url, "");
        assert!(doc.headers.is_empty());
        assert!(doc.body.is_empty());
        assert_eq!(doc.comments, vec!["only a comment"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_document(""), Document::default());
    }

    #[test]
    fn test_crlf_input() {
        let doc = parse_document("GET https://example.com\r\nAccept: text/html\r\n\r\nbody\r\n\r\n");
        assert_eq!(doc.method, "GET");
        assert_eq!(doc.url, "https://example.com");
        assert_eq!(doc.headers["Accept"], "text/html");
        assert_eq!(doc.body, "body\r");
    }
}
