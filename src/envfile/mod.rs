//! Project environment files
//!
//! Environments live as flat YAML maps under `.carmelia/envs/<name>.yaml`
//! (`.yml` is accepted too):
//!
//! ```yaml
//! base_url: https://api.example.com
//! token: ${API_TOKEN}
//! retries: 3
//! ```
//!
//! Non-string scalars are stringified and `${NAME}` placeholders are
//! expanded from the process environment when the file is loaded.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_yaml::Value;
use tracing::debug;

use crate::errors::{CarmeliaError, Result};
use crate::resolver::{expand_process_vars, Variables};

/// Environments directory relative to the project root
pub const ENVS_DIR: &str = ".carmelia/envs";

/// Get the environments directory for a project
pub fn envs_dir(project: &Path) -> PathBuf {
    project.join(ENVS_DIR)
}

/// List environment names, sorted
pub fn list_envs(project: &Path) -> Result<Vec<String>> {
    let dir = envs_dir(project);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(CarmeliaError::Io(e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if let Some(name) = file_name
            .strip_suffix(".yaml")
            .or_else(|| file_name.strip_suffix(".yml"))
        {
            names.push(name.to_string());
        }
    }

    names.sort();
    names.dedup();
    Ok(names)
}

/// Load an environment by name
pub fn load_env(project: &Path, name: &str) -> Result<Variables> {
    let dir = envs_dir(project);
    let content = [format!("{}.yaml", name), format!("{}.yml", name)]
        .iter()
        .find_map(|file| fs::read_to_string(dir.join(file)).ok())
        .ok_or_else(|| CarmeliaError::EnvNotFound(name.to_string()))?;

    let vars = parse_env(&content)?;
    debug!(env = name, count = vars.len(), "Loaded environment");
    Ok(vars)
}

/// Parse environment file content
pub fn parse_env(content: &str) -> Result<Variables> {
    if content.trim().is_empty() {
        return Ok(Variables::new());
    }

    let raw: Option<IndexMap<String, Value>> = serde_yaml::from_str(content)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, expand_process_vars(&scalar_to_string(&value))))
        .collect())
}

/// Save an environment, creating the directory if needed
pub fn save_env(project: &Path, name: &str, vars: &Variables) -> Result<()> {
    let dir = envs_dir(project);
    fs::create_dir_all(&dir)?;

    // Sorted so that saved files diff cleanly
    let sorted: std::collections::BTreeMap<&String, &String> = vars.iter().collect();
    let yaml = serde_yaml::to_string(&sorted)?;
    fs::write(dir.join(format!("{}.yaml", name)), yaml)?;
    Ok(())
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
