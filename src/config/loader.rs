use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::LabstatsConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".labstats.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string. Tier tables, range tables and
/// precisions are validated while deserializing.
pub fn parse_config(contents: &str) -> Result<LabstatsConfig> {
    Ok(toml::from_str::<LabstatsConfig>(contents)?)
}

/// Try loading config from a discovered path; failures fall back to defaults
fn try_load_config_from_path(config_path: &Path) -> Option<LabstatsConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            Some(LabstatsConfig::default())
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, itself first, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.labstats.toml`
pub fn load_config_from(start: PathBuf) -> LabstatsConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            LabstatsConfig::default()
        })
}

/// Discover config from the current directory upward
pub fn load_config() -> LabstatsConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            LabstatsConfig::default()
        }
    }
}

/// Load an explicitly requested config file. Unlike discovery, a missing or
/// invalid file is an error.
pub fn load_config_from_path(path: &Path) -> Result<LabstatsConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::configuration(format!("cannot read {}: {}", path.display(), e), path)
    })?;
    parse_config(&contents)
        .map_err(|e| Error::configuration(format!("{}: {}", path.display(), e), path))
}
