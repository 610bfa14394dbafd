use std::time::Duration;

use clap::Parser;
use clap_handler::handler;
use livewatch::Live;

use super::PlatformOptions;

#[derive(Parser, Clone, Default)]
#[clap(name = "watch", short_flag = 'W')]
pub struct WatchCommand {
    #[clap(flatten)]
    pub platform: PlatformOptions,

    /// Seconds between two polls, overrides `watch.interval` of the config
    #[clap(short, long)]
    pub interval: Option<u64>,

    /// Exit after the first stream URL is resolved
    #[clap(long)]
    pub once_live: bool,

    /// Address of the live source
    pub url: String,
}

#[handler(WatchCommand)]
async fn handle_watch(this: WatchCommand) -> anyhow::Result<()> {
    let config = this.platform.load()?;
    let live = super::registry(&config)?.parse(&this.url)?;
    let interval = Duration::from_secs(this.interval.unwrap_or(config.watch.interval).max(1));

    log::info!(
        "Watching {} on {} every {interval:?}",
        live.url(),
        live.platform_name()
    );

    let mut was_live = None;
    loop {
        if poll(live.as_ref(), &mut was_live).await? && this.once_live {
            return Ok(());
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, stop watching");
                return Ok(());
            }
        }
    }
}

/// Returns whether a stream URL was printed.
async fn poll(live: &dyn Live, was_live: &mut Option<bool>) -> anyhow::Result<bool> {
    let info = live.info().await?;
    if *was_live != Some(info.is_live) {
        log::info!(
            "{} ({}) is {}",
            info.host_name,
            info.room_name,
            if info.is_live { "live" } else { "offline" }
        );
        *was_live = Some(info.is_live);
    }

    if !info.is_live {
        return Ok(false);
    }

    match live.stream_urls().await {
        Ok(urls) => {
            for url in urls {
                println!("{url}");
            }
            Ok(true)
        }
        Err(e) => {
            log::warn!("{} is live but not playable: {e}", info.host_name);
            Ok(false)
        }
    }
}
