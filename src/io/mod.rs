//! Filesystem helpers shared by commands and output writers.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and parse a JSON document. `-` reads stdin.
pub fn read_json(path: &Path) -> Result<Value> {
    let contents = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        read_file(path)?
    };
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_reports_path_on_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        write_file(&path, "{ not json").unwrap();

        let err = read_json(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(!file_exists(&nested));
    }
}
