// zapgen-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

const DEFAULT_APPS_DIR: &str = "Apps";
const DEFAULT_OUTPUT_DIR: &str = "Uninstall Scripts";
const DEFAULT_API_BASE_URL: &str = "https://formulae.brew.sh/api";

/// Runtime configuration for the generator. Loaded once, then threaded
/// explicitly through the driver; CLI flags overwrite individual fields.
#[derive(Debug, Clone)]
pub struct Config {
    pub apps_dir: PathBuf,
    pub output_dir: PathBuf,
    pub api_base_url: String,
}

impl Config {
    pub fn load() -> Self {
        debug!("Loading zapgen configuration");

        let apps_dir = env::var("ZAPGEN_APPS_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_APPS_DIR.to_string());
        let output_dir = env::var("ZAPGEN_OUTPUT_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        Self {
            apps_dir: PathBuf::from(apps_dir),
            output_dir: PathBuf::from(output_dir),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn apps_dir(&self) -> &Path {
        &self.apps_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load()
    }
}
