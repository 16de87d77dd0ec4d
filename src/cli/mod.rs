//! CLI argument parsing

pub mod args;

pub use args::{Args, Command, LogFormat};
