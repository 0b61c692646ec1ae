use std::path::PathBuf;

use crate::api::{DEFAULT_API_BASE, DEFAULT_LIST_LIMIT};

const APP_DIR: &str = "pokedex";

/// Runtime settings resolved from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub limit: u16,
    pub prefs_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(DEFAULT_API_BASE.to_string(), DEFAULT_LIST_LIMIT, None, None)
    }
}

impl Config {
    pub fn resolve(
        api_base: String,
        limit: u16,
        prefs_path: Option<PathBuf>,
        log_path: Option<PathBuf>,
    ) -> Self {
        Self {
            api_base,
            limit,
            prefs_path: prefs_path.unwrap_or_else(|| data_dir().join("preferences.json")),
            log_path: log_path.unwrap_or_else(|| data_dir().join("pokedex.log")),
        }
    }
}

pub fn data_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
