pub mod channel;
pub mod error;
pub mod model;
pub mod options;
pub mod resolver;

use std::sync::Arc;

use livewatch::{async_trait, Live, LiveBuilder, LiveExt, LiveInfo, LiveRegistry, LiveResult};
use parking_lot::Mutex;
use url::Url;

use channel::channel_identity;
pub use error::{InvocationError, ResolveError, ResolveResult};
pub use model::VideoDescription;
pub use options::YoutubeOptions;
pub use resolver::{Resolver, YtDlpResolver};

pub const DOMAINS: [&str; 2] = ["www.youtube.com", "youtube.com"];
pub const PLATFORM_NAME: &str = "YouTube";

/// Room name reported when the resolver could not be run.
pub const OFFLINE: &str = "offline";
/// Room name reported when the resolver output could not be understood.
pub const PARSE_ERROR: &str = "parse error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub host_name: String,
    pub room_name: String,
    pub is_live: bool,
}

impl ResolvedMetadata {
    /// Snapshot reported when the resolver could not give an answer.
    fn degraded<H, R>(host_name: H, room_name: R) -> Self
    where
        H: Into<String>,
        R: Into<String>,
    {
        Self {
            host_name: host_name.into(),
            room_name: room_name.into(),
            is_live: false,
        }
    }
}

impl From<ResolvedMetadata> for LiveInfo {
    fn from(value: ResolvedMetadata) -> Self {
        LiveInfo {
            host_name: value.host_name,
            room_name: value.room_name,
            is_live: value.is_live,
        }
    }
}

/// Identity remembered from previous polls.
///
/// Concurrent polls of the same source overwrite each other, the last one wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdapterState {
    pub last_known_host_name: Option<String>,
    pub last_known_room_name: Option<String>,
}

pub struct YoutubeLive<R = YtDlpResolver> {
    url: Url,
    resolver: R,
    options: YoutubeOptions,
    state: Mutex<AdapterState>,
}

impl YoutubeLive<YtDlpResolver> {
    pub fn new(url: Url, options: YoutubeOptions) -> anyhow::Result<Self> {
        let resolver = options.resolver()?;
        Ok(Self::with_resolver(url, resolver, options))
    }
}

impl<R> YoutubeLive<R>
where
    R: Resolver,
{
    pub fn with_resolver(url: Url, resolver: R, options: YoutubeOptions) -> Self {
        Self {
            url,
            resolver,
            options,
            state: Mutex::new(AdapterState::default()),
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn state(&self) -> AdapterState {
        self.state.lock().clone()
    }

    /// Query the resolver and parse its description, failures are returned as is.
    pub async fn describe(&self) -> ResolveResult<VideoDescription> {
        let output = self
            .resolver
            .describe(&self.url, self.options.info_deadline())
            .await?;
        Ok(VideoDescription::parse(&output)?)
    }

    /// Describe the current state of the address. Failures are reported as an
    /// offline snapshot instead of an error.
    pub async fn info(&self) -> ResolvedMetadata {
        let description = match self.describe().await {
            Ok(description) => description,
            Err(ResolveError::Invocation(e)) => {
                log::warn!("Failed to describe {}: {e}", self.url);
                let mut state = self.state.lock();
                let host_name = match state.last_known_host_name.as_deref() {
                    Some(host_name) if !host_name.is_empty() => host_name.to_string(),
                    _ => {
                        let host_name = channel_identity(&self.url);
                        state.last_known_host_name = Some(host_name.clone());
                        host_name
                    }
                };
                return ResolvedMetadata::degraded(host_name, OFFLINE);
            }
            Err(e) => {
                log::warn!("Unexpected description of {}: {e}", self.url);
                return ResolvedMetadata::degraded(channel_identity(&self.url), PARSE_ERROR);
            }
        };

        {
            let mut state = self.state.lock();
            state.last_known_host_name = Some(description.uploader.clone());
            state.last_known_room_name = Some(description.title.clone());
        }

        ResolvedMetadata {
            host_name: description.uploader,
            room_name: description.title,
            is_live: description.is_live,
        }
    }

    /// Resolve the URL of the best format. Only the first line printed by the
    /// resolver is used.
    pub async fn stream_url(&self) -> ResolveResult<Url> {
        let output = self
            .resolver
            .best_stream_url(&self.url, self.options.stream_deadline())
            .await?;

        let Some(line) = output.lines().map(str::trim).find(|l| !l.is_empty()) else {
            return Err(ResolveError::EmptyResult);
        };

        let url = Url::parse(line)?;
        log::debug!("Resolved stream of {}: {url}", self.url);
        Ok(url)
    }
}

#[async_trait]
impl<R> Live for YoutubeLive<R>
where
    R: Resolver + 'static,
{
    fn url(&self) -> &Url {
        &self.url
    }

    fn platform_name(&self) -> &'static str {
        PLATFORM_NAME
    }

    async fn info(&self) -> anyhow::Result<LiveInfo> {
        Ok(YoutubeLive::info(self).await.into())
    }

    async fn stream_urls(&self) -> anyhow::Result<Vec<Url>> {
        Ok(vec![self.stream_url().await?])
    }
}

#[derive(Debug, Default, Clone)]
pub struct YoutubeBuilder {
    options: YoutubeOptions,
}

impl YoutubeBuilder {
    pub fn new(options: YoutubeOptions) -> Self {
        Self { options }
    }
}

impl LiveBuilder for YoutubeBuilder {
    fn build(&self, url: Url) -> anyhow::Result<Box<dyn Live>> {
        Ok(YoutubeLive::new(url, self.options.clone())?.to_box())
    }
}

/// Register YouTube under all of its domains with default options.
pub fn register(registry: &mut LiveRegistry) -> LiveResult<()> {
    register_with(registry, YoutubeOptions::default())
}

pub fn register_with(registry: &mut LiveRegistry, options: YoutubeOptions) -> LiveResult<()> {
    let builder: Arc<dyn LiveBuilder> = Arc::new(YoutubeBuilder::new(options));
    for domain in DOMAINS {
        registry.register_shared(domain, builder.clone())?;
    }
    Ok(())
}
