pub mod error;
pub mod registry;

pub use async_trait::async_trait;
pub use error::{LiveError, LiveResult};
pub use registry::LiveRegistry;
pub use url::Url;

use serde::{Deserialize, Serialize};

/// Snapshot of a live source as seen by the host on one poll.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LiveInfo {
    /// Owner of the room, channel name or handle
    pub host_name: String,

    /// Title of the room or the current broadcast
    pub room_name: String,

    /// Whether the source is broadcasting right now
    pub is_live: bool,
}

#[async_trait]
pub trait Live: Send + Sync {
    /// The address this source was built from
    fn url(&self) -> &Url;

    /// Human readable name of the platform
    fn platform_name(&self) -> &'static str;

    /// Query the current state of the source
    async fn info(&self) -> anyhow::Result<LiveInfo>;

    /// Resolve playable stream URLs. Only meaningful while the source is live.
    async fn stream_urls(&self) -> anyhow::Result<Vec<Url>>;
}

pub trait LiveBuilder: Send + Sync {
    fn build(&self, url: Url) -> anyhow::Result<Box<dyn Live>>;
}

impl<F> LiveBuilder for F
where
    F: Fn(Url) -> anyhow::Result<Box<dyn Live>> + Send + Sync,
{
    fn build(&self, url: Url) -> anyhow::Result<Box<dyn Live>> {
        self(url)
    }
}

pub trait LiveExt: Live {
    fn to_box(self) -> Box<dyn Live>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<T: Live> LiveExt for T {}
