use clap::Parser;
use clap_handler::handler;

use super::PlatformOptions;

#[derive(Parser, Clone, Default)]
#[clap(name = "stream", short_flag = 'S')]
pub struct StreamCommand {
    #[clap(flatten)]
    pub platform: PlatformOptions,

    /// Address of the live source
    pub url: String,
}

#[handler(StreamCommand)]
async fn handle_stream(this: StreamCommand) -> anyhow::Result<()> {
    let config = this.platform.load()?;
    let live = super::registry(&config)?.parse(&this.url)?;

    for url in live.stream_urls().await? {
        println!("{url}");
    }

    Ok(())
}
