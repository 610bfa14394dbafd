use std::path::PathBuf;

use clap::{Args, Subcommand};
use clap_handler::Handler;
use livewatch::LiveRegistry;

use crate::config::Config;

mod info;
mod platforms;
mod stream;
mod watch;

#[derive(Subcommand, Clone, Handler)]
pub enum LwctlCommand {
    Info(info::InfoCommand),
    Stream(stream::StreamCommand),
    Watch(watch::WatchCommand),
    Platforms(platforms::PlatformsCommand),
}

#[derive(Args, Clone, Default, Debug)]
pub struct PlatformOptions {
    /// Configuration file, defaults to `lwctl.toml` if present
    #[clap(short, long, env = "LWCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Resolver executable used instead of the configured one
    #[clap(long, env = "LWCTL_RESOLVER")]
    pub resolver: Option<String>,
}

impl PlatformOptions {
    pub fn load(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(resolver) = &self.resolver {
            config.youtube.program = resolver.clone();
        }
        Ok(config)
    }
}

/// Registry with every platform this binary knows about.
pub fn registry(config: &Config) -> anyhow::Result<LiveRegistry> {
    let mut registry = LiveRegistry::new();
    livewatch_youtube::register_with(&mut registry, config.youtube.clone())?;
    Ok(registry)
}
