//! Carmelia library interface
//!
//! Plain-text HTTP request documents: parse them, import them from curl,
//! substitute variables, and export collections for other API tools.
//!
//! # Module Organization
//!
//! - [`document`] - Request document model, parser and renderer
//! - [`devexp`] - Shell tokenizer, curl import, curl and code generation
//! - [`resolver`] - `{{var}}` and `${VAR}` substitution, JSON body overrides
//! - [`envfile`] - Project environment files
//! - [`export`] - Postman, Insomnia and OpenAPI export
//! - [`config`] - Project configuration
//! - [`errors`] - Error types (CarmeliaError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Command dispatch

pub mod cli;
pub mod config;
pub mod core;
pub mod devexp;
pub mod document;
pub mod envfile;
pub mod errors;
pub mod export;
pub mod http;
pub mod resolver;
pub mod status;
