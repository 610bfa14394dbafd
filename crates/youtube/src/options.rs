use std::time::Duration;

use serde::Deserialize;

use crate::resolver::YtDlpResolver;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct YoutubeOptions {
    /// Resolver executable, looked up on `PATH`
    pub program: String,

    /// Shell-style arguments passed before every invocation, e.g. `--cookies cookies.txt`
    pub extra_args: Option<String>,

    /// Deadline of a metadata query in seconds
    pub info_timeout: u64,

    /// Deadline of a stream URL query in seconds
    pub stream_timeout: u64,
}

impl Default for YoutubeOptions {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            extra_args: None,
            info_timeout: 15,
            stream_timeout: 30,
        }
    }
}

impl YoutubeOptions {
    /// At least one second, a zero timeout would fail every query.
    pub fn info_deadline(&self) -> Duration {
        Duration::from_secs(self.info_timeout.max(1))
    }

    pub fn stream_deadline(&self) -> Duration {
        Duration::from_secs(self.stream_timeout.max(1))
    }

    pub fn resolver(&self) -> anyhow::Result<YtDlpResolver> {
        let extra_args = match &self.extra_args {
            Some(args) => shlex::split(args)
                .ok_or_else(|| anyhow::anyhow!("Invalid resolver arguments: {args}"))?,
            None => Vec::new(),
        };

        Ok(YtDlpResolver::new(&self.program).with_extra_args(extra_args))
    }
}
