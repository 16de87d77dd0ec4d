//! Code snippet generation for various languages
//!
//! Generates equivalent client code in Python, Node.js and Go from a
//! request document.

use std::str::FromStr;

use crate::devexp::curl::generate_curl;
use crate::document::Document;
use crate::errors::CarmeliaError;

/// Supported languages for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Curl,
    Python,
    Node,
    Go,
}

impl FromStr for Language {
    type Err = CarmeliaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "curl" => Ok(Language::Curl),
            "python" | "py" => Ok(Language::Python),
            "node" | "nodejs" | "js" | "javascript" => Ok(Language::Node),
            "go" | "golang" => Ok(Language::Go),
            _ => Err(CarmeliaError::Argument(format!(
                "Unknown language '{}'. Supported: curl, python, node, go",
                s
            ))),
        }
    }
}

/// Generate code snippet for the specified language
pub fn generate_code(language: Language, doc: &Document) -> String {
    match language {
        Language::Curl => generate_curl(doc),
        Language::Python => generate_python(doc),
        Language::Node => generate_node(doc),
        Language::Go => generate_go(doc),
    }
}

/// Generate Python code (using requests library)
fn generate_python(doc: &Document) -> String {
    let mut lines = vec!["import requests".to_string(), String::new()];

    if !doc.headers.is_empty() {
        lines.push("headers = {".to_string());
        for (name, value) in &doc.headers {
            lines.push(format!("    \"{}\": \"{}\",", escape_string(name), escape_string(value)));
        }
        lines.push("}".to_string());
        lines.push(String::new());
    }

    if doc.has_body() {
        lines.push(format!("payload = '''{}'''", escape_python_body(&doc.body)));
        lines.push(String::new());
    }

    let method = doc.method.to_lowercase();
    let mut call_args = vec![format!("\"{}\"", escape_string(&doc.url))];
    if !doc.headers.is_empty() {
        call_args.push("headers=headers".to_string());
    }
    if doc.has_body() {
        call_args.push(if method == "get" { "params=payload" } else { "data=payload" }.to_string());
    }

    lines.push(format!("response = requests.{}({})", method, call_args.join(", ")));
    lines.push("print(response.status_code)".to_string());
    lines.push("print(response.text)".to_string());

    lines.join("\n")
}

/// Generate Node.js code (using fetch)
fn generate_node(doc: &Document) -> String {
    let mut options = vec![format!("  method: \"{}\"", doc.method)];

    if !doc.headers.is_empty() {
        let header_lines: Vec<String> = doc
            .headers
            .iter()
            .map(|(k, v)| format!("    \"{}\": \"{}\"", escape_string(k), escape_string(v)))
            .collect();
        options.push(format!("  headers: {{\n{}\n  }}", header_lines.join(",\n")));
    }

    if doc.has_body() {
        options.push(format!("  body: `{}`", escape_template_literal(&doc.body)));
    }

    let lines = [
        format!("const response = await fetch(\"{}\", {{", escape_string(&doc.url)),
        options.join(",\n"),
        "});".to_string(),
        String::new(),
        "const data = await response.text();".to_string(),
        "console.log(data);".to_string(),
    ];

    lines.join("\n")
}

/// Generate Go code (using net/http)
fn generate_go(doc: &Document) -> String {
    let mut lines: Vec<String> = vec![
        "package main".to_string(),
        String::new(),
        "import (".to_string(),
        "\t\"fmt\"".to_string(),
        "\t\"io\"".to_string(),
        "\t\"net/http\"".to_string(),
    ];
    if doc.has_body() {
        lines.push("\t\"strings\"".to_string());
    }
    lines.push(")".to_string());
    lines.push(String::new());
    lines.push("func main() {".to_string());

    let method = escape_string(&doc.method);
    let url = escape_string(&doc.url);
    if doc.has_body() {
        lines.push(format!("\tbody := strings.NewReader(`{}`)", doc.body.replace('`', "` + \"`\" + `")));
        lines.push(format!("\treq, err := http.NewRequest(\"{}\", \"{}\", body)", method, url));
    } else {
        lines.push(format!("\treq, err := http.NewRequest(\"{}\", \"{}\", nil)", method, url));
    }

    lines.push("\tif err != nil {".to_string());
    lines.push("\t\tpanic(err)".to_string());
    lines.push("\t}".to_string());

    for (name, value) in &doc.headers {
        lines.push(format!("\treq.Header.Set(\"{}\", \"{}\")", escape_string(name), escape_string(value)));
    }

    lines.extend(
        [
            "",
            "\tresp, err := http.DefaultClient.Do(req)",
            "\tif err != nil {",
            "\t\tpanic(err)",
            "\t}",
            "\tdefer resp.Body.Close()",
            "",
            "\tdata, _ := io.ReadAll(resp.Body)",
            "\tfmt.Println(string(data))",
            "}",
        ]
        .iter()
        .map(|s| s.to_string()),
    );

    lines.join("\n")
}

/// Escape a string for use in double-quoted literals
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Escape a body for a Python triple-quoted string
fn escape_python_body(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape a body for a JavaScript template literal
fn escape_template_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}
