use std::path::{Path, PathBuf};

use livewatch_youtube::YoutubeOptions;
use serde::Deserialize;

const DEFAULT_CONFIG: &str = "lwctl.toml";

#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub youtube: YoutubeOptions,
    pub watch: WatchConfig,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct WatchConfig {
    /// Seconds between two polls
    pub interval: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { interval: 30 }
    }
}

impl Config {
    /// Load the given file, or `lwctl.toml` in the working directory if it exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        log::debug!("loading config from {}", path.display());
        let data = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&data)?;
        Ok(config)
    }
}
