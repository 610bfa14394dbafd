use clap::Parser;
use clap_handler::handler;

use super::PlatformOptions;

#[derive(Parser, Clone, Default)]
#[clap(name = "platforms")]
pub struct PlatformsCommand {
    #[clap(flatten)]
    pub platform: PlatformOptions,
}

#[handler(PlatformsCommand)]
async fn handle_platforms(this: PlatformsCommand) -> anyhow::Result<()> {
    let config = this.platform.load()?;
    let registry = super::registry(&config)?;

    for domain in registry.domains() {
        let live = registry.parse(&format!("https://{domain}/"))?;
        println!("{domain}\t{}", live.platform_name());
    }

    Ok(())
}
