use std::{process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::process::Command;
use url::Url;

use crate::{error::InvocationError, model::DESCRIBE_TEMPLATE};

/// Capability that extracts metadata and playable URLs for an address.
///
/// Both calls return the raw standard output of the resolver, interpretation
/// is left to the caller.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Single line description following [`DESCRIBE_TEMPLATE`].
    async fn describe(&self, url: &Url, deadline: Duration) -> Result<String, InvocationError>;

    /// Newline separated URLs of the `best` format.
    async fn best_stream_url(
        &self,
        url: &Url,
        deadline: Duration,
    ) -> Result<String, InvocationError>;
}

/// Runs `yt-dlp` found on `PATH`, one process per call.
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    program: String,
    extra_args: Vec<String>,
}

impl Default for YtDlpResolver {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlpResolver {
    pub fn new<S>(program: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments inserted before the ones generated for each call.
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn describe_args(url: &Url) -> Vec<String> {
        [
            "--no-download",
            "--print",
            DESCRIBE_TEMPLATE,
            "--no-warnings",
            "--quiet",
            url.as_str(),
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    pub fn stream_args(url: &Url) -> Vec<String> {
        [
            "--get-url",
            "-f",
            "best",
            "--no-warnings",
            "--quiet",
            url.as_str(),
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    async fn run(&self, args: Vec<String>, deadline: Duration) -> Result<String, InvocationError> {
        let program = which::which(&self.program)?;
        log::debug!("running {} {:?} {:?}", program.display(), self.extra_args, args);

        let child = Command::new(&program)
            .args(&self.extra_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // dropping the wait future on timeout kills the process
            .kill_on_drop(true)
            .spawn()?;

        let output = match tokio::time::timeout(deadline, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                log::warn!("{} timed out after {deadline:?}", program.display());
                return Err(InvocationError::Timeout(deadline));
            }
        };

        if !output.status.success() {
            return Err(InvocationError::Exit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl Resolver for YtDlpResolver {
    async fn describe(&self, url: &Url, deadline: Duration) -> Result<String, InvocationError> {
        self.run(Self::describe_args(url), deadline).await
    }

    async fn best_stream_url(
        &self,
        url: &Url,
        deadline: Duration,
    ) -> Result<String, InvocationError> {
        self.run(Self::stream_args(url), deadline).await
    }
}
