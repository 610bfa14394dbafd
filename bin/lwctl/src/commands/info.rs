use clap::Parser;
use clap_handler::handler;

use super::PlatformOptions;

#[derive(Parser, Clone, Default)]
#[clap(name = "info", short_flag = 'I')]
pub struct InfoCommand {
    #[clap(flatten)]
    pub platform: PlatformOptions,

    /// Address of the live source
    pub url: String,
}

#[handler(InfoCommand)]
async fn handle_info(this: InfoCommand) -> anyhow::Result<()> {
    let config = this.platform.load()?;
    let live = super::registry(&config)?.parse(&this.url)?;

    let info = live.info().await?;
    println!("{}", serde_json::to_string_pretty(&info)?);

    Ok(())
}
