//! Common test utilities for carmelia integration tests
//!
//! - CLI invocation helpers
//! - Temporary project fixtures
//! - Output parsing helpers

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Exit status codes matching the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

impl CliResponse {
    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, self.stdout))
    }

    /// Parse stdout as YAML
    pub fn yaml(&self) -> serde_yaml::Value {
        serde_yaml::from_str(&self.stdout).unwrap_or_else(|e| panic!("stdout is not YAML ({}): {}", e, self.stdout))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }

    pub fn assert_success(&self) -> &Self {
        assert_eq!(self.exit_status, ExitStatus::Success, "stderr: {}", self.stderr);
        self
    }

    pub fn assert_error(&self) -> &Self {
        assert_eq!(self.exit_status, ExitStatus::Error, "stdout: {}", self.stdout);
        self
    }
}

impl std::ops::Deref for CliResponse {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.stdout
    }
}

/// A throwaway project directory
pub struct TestProject {
    dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp project dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default requests directory
    pub fn requests_dir(&self) -> PathBuf {
        self.path().join(".carmelia/requests")
    }

    /// Write a file relative to the project root
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write a request document under the requests directory
    pub fn request(&self, rel: &str, content: &str) -> PathBuf {
        self.write(&format!(".carmelia/requests/{}", rel), content)
    }

    /// Write an environment file
    pub fn env(&self, name: &str, content: &str) -> PathBuf {
        self.write(&format!(".carmelia/envs/{}.yaml", name), content)
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel)).expect("Failed to read file")
    }

    /// Run the CLI with `-C <project>` prepended
    pub fn run(&self, args: &[&str]) -> CliResponse {
        let project = self.path().to_string_lossy().to_string();
        let mut full = vec!["-C", project.as_str()];
        full.extend_from_slice(args);
        carmelia(&full)
    }
}

/// Run the CLI with the given arguments (excluding the program name)
pub fn carmelia(args: &[&str]) -> CliResponse {
    run_cli(args, None, &[])
}

/// Run the CLI with stdin content
pub fn carmelia_with_stdin(args: &[&str], stdin: &str) -> CliResponse {
    run_cli(args, Some(stdin.as_bytes()), &[])
}

/// Run the CLI with extra environment variables
pub fn carmelia_with_env(args: &[&str], env: &[(&str, &str)]) -> CliResponse {
    run_cli(args, None, env)
}

fn run_cli(args: &[&str], stdin: Option<&[u8]>, env: &[(&str, &str)]) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_carmelia"));
    cmd.args(args);
    cmd.env_remove("RUST_LOG");
    for (key, value) in env {
        cmd.env(key, value);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = match stdin {
        Some(data) => {
            cmd.stdin(Stdio::piped());
            let mut child = cmd.spawn().expect("Failed to spawn command");
            child
                .stdin
                .as_mut()
                .expect("Failed to open stdin")
                .write_all(data)
                .expect("Failed to write to stdin");
            child.wait_with_output().expect("Failed to wait for command")
        }
        None => {
            cmd.stdin(Stdio::null());
            cmd.output().expect("Failed to execute command")
        }
    };

    parse_output(output)
}

fn parse_output(output: Output) -> CliResponse {
    let exit_code = output.status.code().unwrap_or(1);
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}
