use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::translate::DEFAULT_API_URL;

pub const CONFIG_FILE_NAME: &str = ".i18nauditrc.json";

/// Which text-search implementation scans the source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearcherKind {
    /// Spawn `rg --pcre2`.
    #[default]
    Ripgrep,
    /// Walk and match in-process.
    Native,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_src")]
    pub src: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: i64,
    #[serde(default = "default_chunk_delay")]
    pub chunk_delay: i64,
    #[serde(default)]
    pub loose: bool,
    #[serde(default)]
    pub searcher: SearcherKind,
}

fn default_src() -> Vec<String> {
    vec![".".to_string()]
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_chunk_size() -> i64 {
    10
}

fn default_chunk_delay() -> i64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src: default_src(),
            excludes: Vec::new(),
            api_url: default_api_url(),
            chunk_size: default_chunk_size(),
            chunk_delay: default_chunk_delay(),
            loose: false,
            searcher: SearcherKind::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any pattern in `excludes` is not a valid glob or
    /// `src` is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.excludes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'excludes': \"{}\"", pattern))?;
        }

        if self.src.is_empty() {
            anyhow::bail!("'src' must name at least one directory");
        }

        Ok(())
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
