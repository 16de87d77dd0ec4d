//! Developer Experience features
//!
//! This module moves requests between request documents and the shell:
//!
//! - **Curl Import**: turn a pasted curl command into a request document
//! - **Curl Generation**: turn a request document into a curl command
//! - **Code Generation**: Python, Node.js and Go snippets for a document
//!
//! # Curl Import
//!
//! ```bash
//! carmelia import-curl "curl -X POST -H 'Content-Type: application/json' -d '{\"name\":\"John\"}' https://api.example.com/users"
//!
//! # Output:
//! # POST https://api.example.com/users
//! # Content-Type: application/json
//! #
//! # {"name":"John"}
//! ```
//!
//! # Code Generation
//!
//! ```bash
//! carmelia generate users/create.http --lang python
//! ```

pub mod codegen;
pub mod curl;
pub mod curl_import;
pub mod shell;

pub use codegen::{generate_code, Language};
pub use curl::generate_curl;
pub use curl_import::{curl_to_http, import_curl, import_tokens, parse_curl_command, ParsedCurl};
pub use shell::{shell_escape, tokenize};
