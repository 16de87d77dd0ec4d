//! cURL command import
//!
//! Parses a pasted curl command and converts it into a request document.
//!
//! # Example
//!
//! ```
//! use carmelia::devexp::curl_to_http;
//!
//! let text = curl_to_http(r#"curl -X POST https://a/b -H "X: 1" -d '{"a":1}'"#).unwrap();
//! assert_eq!(text, "POST https://a/b\nX: 1\n\n{\"a\":1}\n");
//! ```
//!
//! Only the flags that map onto a document are interpreted. Everything else
//! is skipped: known boolean flags consume nothing, known value flags consume
//! their argument, and unknown flags consume the next word unless it looks
//! like another flag.

use tracing::{debug, warn};

use crate::devexp::shell::tokenize;
use crate::document::{render, Document, Headers};
use crate::errors::{CarmeliaError, Result};
use crate::http::method;

/// Flags that never take an argument
const BOOLEAN_FLAGS: &[&str] = &[
    "-L", "--location", "--location-trusted",
    "-s", "--silent", "-S", "--show-error",
    "-k", "--insecure",
    "-v", "--verbose", "-i", "--include",
    "-f", "--fail", "--fail-with-body",
    "-g", "--globoff", "-N", "--no-buffer",
    "-O", "--remote-name", "-J", "--remote-header-name",
    "-#", "--progress-bar",
    "--compressed", "--raw", "--tr-encoding", "--path-as-is",
    "-0", "--http1.0", "--http1.1", "--http2", "--http2-prior-knowledge", "--http3",
    "-4", "--ipv4", "-6", "--ipv6",
    "--basic", "--digest", "--ntlm", "--negotiate", "--anyauth",
    "--ssl", "--ssl-reqd", "--no-keepalive", "--tcp-nodelay",
    "-I", "--head", "-G", "--get",
];

/// Short flags that may be bundled together (`-sSL`)
const BUNDLEABLE_SHORT_FLAGS: &[char] = &[
    's', 'S', 'L', 'v', 'k', 'I', 'i', 'O', 'J', 'f', 'g', 'G', 'N', '0', '4', '6', '#',
];

/// Flags that take an argument but have no counterpart in a document
const IGNORED_VALUE_FLAGS: &[&str] = &[
    "-o", "--output", "-m", "--max-time", "--connect-timeout", "--max-redirs",
    "-x", "--proxy", "-U", "--proxy-user",
    "-E", "--cert", "--key", "--cacert", "--capath",
    "-c", "--cookie-jar", "-w", "--write-out", "-T", "--upload-file",
    "-r", "--range", "--retry", "--retry-delay", "--resolve", "--connect-to",
    "-F", "--form", "--form-string", "--data-urlencode",
    "--limit-rate", "--interface", "-K", "--config",
];

/// Parsed curl command structure
#[derive(Debug, Default)]
pub struct ParsedCurl {
    /// Method given with `-X`
    pub method: Option<String>,
    /// Method implied by `-I` or `-G`
    pub implied_method: Option<&'static str>,
    pub url: Option<String>,
    pub headers: Headers,
    pub body: Option<String>,
}

impl ParsedCurl {
    /// Assemble the document, defaulting the method from the body
    pub fn into_document(self) -> Result<Document> {
        let url = self.url.ok_or(CarmeliaError::NoUrlFound)?;
        let body = self.body.unwrap_or_default();

        let method = match (self.method, self.implied_method) {
            (Some(explicit), _) => explicit,
            (None, Some(implied)) => implied.to_string(),
            (None, None) => method::infer(!body.is_empty()).to_string(),
        };

        Ok(Document {
            method,
            url,
            headers: self.headers,
            body,
            ..Default::default()
        })
    }
}

/// Parse a curl command string into a ParsedCurl structure
pub fn parse_curl_command(cmd: &str) -> Result<ParsedCurl> {
    let tokens = tokenize(cmd)?;
    parse_tokens(&tokens)
}

/// Parse tokenized curl command
pub fn parse_tokens(tokens: &[String]) -> Result<ParsedCurl> {
    if tokens.is_empty() {
        return Err(CarmeliaError::EmptyCommand);
    }

    let tokens = match tokens.first() {
        Some(first) if first.eq_ignore_ascii_case("curl") => &tokens[1..],
        _ => tokens,
    };

    let mut parsed = ParsedCurl::default();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i].as_str();
        let value = tokens.get(i + 1);

        match token {
            "-X" | "--request" => {
                if let Some(v) = value {
                    // Unrecognized verbs leave the method to be inferred
                    match method::normalize(v) {
                        Some(m) => parsed.method = Some(m.to_string()),
                        None => warn!(method = %v, "Ignoring non-standard method in curl command"),
                    }
                }
                i += 1;
            }
            "-H" | "--header" => {
                if let Some(v) = value {
                    match parse_header(v) {
                        Some((name, value)) => {
                            parsed.headers.insert(name, value);
                        }
                        None => debug!(header = %v, "Discarding malformed header"),
                    }
                }
                i += 1;
            }
            "-d" | "--data" | "--data-raw" | "--data-binary" => {
                if let Some(v) = value {
                    parsed.body = Some(v.clone());
                }
                i += 1;
            }
            "--json" => {
                if let Some(v) = value {
                    parsed.body = Some(v.clone());
                    insert_if_absent(&mut parsed.headers, "Content-Type", "application/json");
                    insert_if_absent(&mut parsed.headers, "Accept", "application/json");
                }
                i += 1;
            }
            "-u" | "--user" => {
                // Credentials are carried verbatim, not base64-encoded
                if let Some(v) = value {
                    parsed.headers.insert("Authorization".to_string(), format!("Basic {}", v));
                }
                i += 1;
            }
            "-A" | "--user-agent" => {
                if let Some(v) = value {
                    parsed.headers.insert("User-Agent".to_string(), v.clone());
                }
                i += 1;
            }
            "-e" | "--referer" => {
                if let Some(v) = value {
                    parsed.headers.insert("Referer".to_string(), v.clone());
                }
                i += 1;
            }
            "-b" | "--cookie" => {
                if let Some(v) = value {
                    parsed.headers.insert("Cookie".to_string(), v.clone());
                }
                i += 1;
            }
            "--url" => {
                if let Some(v) = value {
                    parsed.url = Some(v.clone());
                }
                i += 1;
            }
            flag if BOOLEAN_FLAGS.contains(&flag) => {
                apply_boolean_flag(&mut parsed, flag);
            }
            flag if is_bundled_short_flags(flag) => {
                for c in flag.chars().skip(1) {
                    apply_boolean_flag(&mut parsed, &format!("-{}", c));
                }
            }
            flag if IGNORED_VALUE_FLAGS.contains(&flag) => {
                debug!(flag, "Skipping curl flag with no request counterpart");
                i += 1;
            }
            positional if !positional.starts_with('-') => {
                if parsed.url.is_none() {
                    parsed.url = Some(positional.to_string());
                } else {
                    debug!(arg = positional, "Ignoring extra positional argument");
                }
            }
            unknown => {
                // Best effort: take the next word as its argument unless it is a flag
                let takes_value = value.is_some_and(|v| !v.starts_with('-'));
                debug!(flag = unknown, takes_value, "Skipping unknown curl flag");
                if takes_value {
                    i += 1;
                }
            }
        }

        i += 1;
    }

    Ok(parsed)
}

fn apply_boolean_flag(parsed: &mut ParsedCurl, flag: &str) {
    match flag {
        "-I" | "--head" => parsed.implied_method = Some(method::HEAD),
        "-G" | "--get" => parsed.implied_method = Some(method::GET),
        _ => {}
    }
}

fn is_bundled_short_flags(token: &str) -> bool {
    token.len() > 2
        && token.starts_with('-')
        && !token.starts_with("--")
        && token.chars().skip(1).all(|c| BUNDLEABLE_SHORT_FLAGS.contains(&c))
}

/// Parse a header string "Name: Value"
///
/// Names must be a token of letters, digits, `-` or `_` so the header
/// survives a trip through document text.
fn parse_header(header: &str) -> Option<(String, String)> {
    let (name, value) = header.split_once(':')?;
    let name = name.trim();
    let is_token = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !is_token {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

fn insert_if_absent(headers: &mut Headers, name: &str, value: &str) {
    if !headers.keys().any(|k| k.eq_ignore_ascii_case(name)) {
        headers.insert(name.to_string(), value.to_string());
    }
}

/// Convert a token sequence into a document
pub fn import_tokens(tokens: &[String]) -> Result<Document> {
    parse_tokens(tokens)?.into_document()
}

/// Parse and convert a curl command to a document in one step
pub fn import_curl(cmd: &str) -> Result<Document> {
    let parsed = parse_curl_command(cmd)?;
    let doc = parsed.into_document()?;
    debug!(method = %doc.method, url = %doc.url, headers = doc.headers.len(), "Imported curl command");
    Ok(doc)
}

/// Convert a curl command straight into document text
pub fn curl_to_http(cmd: &str) -> Result<String> {
    let doc = import_curl(cmd)?;
    Ok(format!("{}\n", render(&doc)))
}
