use std::time::Duration;

use livewatch::{Live, LiveRegistry};
use livewatch_youtube::{
    channel::UNKNOWN_CHANNEL, AdapterState, InvocationError, ResolveError, ResolvedMetadata,
    Resolver, YoutubeLive, YoutubeOptions, OFFLINE, PARSE_ERROR,
};
use parking_lot::Mutex;
use url::Url;

/// Replays canned outputs, `None` stands for a failed invocation.
#[derive(Default)]
struct FakeResolver {
    describe: Mutex<Vec<Option<String>>>,
    stream: Mutex<Vec<Option<String>>>,
    deadlines: Mutex<Vec<Duration>>,
}

impl FakeResolver {
    fn describing<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut outputs: Vec<_> = outputs.into_iter().map(|o| o.map(Into::into)).collect();
        outputs.reverse();
        Self {
            describe: Mutex::new(outputs),
            ..Default::default()
        }
    }

    fn streaming(output: Option<&str>) -> Self {
        Self {
            stream: Mutex::new(vec![output.map(ToString::to_string)]),
            ..Default::default()
        }
    }

    fn reply(
        queue: &Mutex<Vec<Option<String>>>,
        deadline: Duration,
    ) -> Result<String, InvocationError> {
        queue
            .lock()
            .pop()
            .flatten()
            .ok_or(InvocationError::Timeout(deadline))
    }
}

#[async_trait::async_trait]
impl Resolver for FakeResolver {
    async fn describe(&self, _url: &Url, deadline: Duration) -> Result<String, InvocationError> {
        self.deadlines.lock().push(deadline);
        Self::reply(&self.describe, deadline)
    }

    async fn best_stream_url(
        &self,
        _url: &Url,
        deadline: Duration,
    ) -> Result<String, InvocationError> {
        self.deadlines.lock().push(deadline);
        Self::reply(&self.stream, deadline)
    }
}

const LIVE_OUTPUT: &str = r#"{"title":"Foo","uploader":"Bar","is_live":True}"#;
const OFFLINE_OUTPUT: &str = r#"{"title":"Foo","uploader":"Bar","is_live":False}"#;

fn live(url: &str, resolver: FakeResolver) -> YoutubeLive<FakeResolver> {
    YoutubeLive::with_resolver(
        Url::parse(url).unwrap(),
        resolver,
        YoutubeOptions::default(),
    )
}

fn metadata(host_name: &str, room_name: &str, is_live: bool) -> ResolvedMetadata {
    ResolvedMetadata {
        host_name: host_name.to_string(),
        room_name: room_name.to_string(),
        is_live,
    }
}

#[tokio::test]
async fn test_live_description() {
    let source = live(
        "https://www.youtube.com/@somechannel/live",
        FakeResolver::describing([Some(LIVE_OUTPUT)]),
    );

    assert_eq!(source.info().await, metadata("Bar", "Foo", true));
    assert_eq!(
        source.state(),
        AdapterState {
            last_known_host_name: Some("Bar".to_string()),
            last_known_room_name: Some("Foo".to_string()),
        }
    );
}

#[tokio::test]
async fn test_is_live_follows_output() {
    let source = live(
        "https://www.youtube.com/@somechannel/live",
        FakeResolver::describing([Some(OFFLINE_OUTPUT), Some(LIVE_OUTPUT)]),
    );

    assert!(!source.info().await.is_live);
    assert!(source.info().await.is_live);
}

#[tokio::test]
async fn test_invocation_failure_derives_identity() {
    let source = live(
        "https://www.youtube.com/@somechannel",
        FakeResolver::describing([None::<&str>]),
    );

    assert_eq!(source.info().await, metadata("somechannel", OFFLINE, false));
    assert_eq!(
        source.state().last_known_host_name.as_deref(),
        Some("somechannel")
    );
}

#[tokio::test]
async fn test_invocation_failure_keeps_known_identity() {
    let source = live(
        "https://www.youtube.com/@somechannel",
        FakeResolver::describing([Some(LIVE_OUTPUT), None]),
    );

    assert_eq!(source.info().await, metadata("Bar", "Foo", true));
    assert_eq!(source.info().await, metadata("Bar", OFFLINE, false));
}

#[tokio::test]
async fn test_parse_error_ignores_known_identity() {
    let source = live(
        "https://www.youtube.com/channel/XYZ?v=123",
        FakeResolver::describing([Some(LIVE_OUTPUT), Some("NA")]),
    );

    source.info().await;
    assert_eq!(source.info().await, metadata("XYZ", PARSE_ERROR, false));
    // the last good identity is still remembered
    assert_eq!(source.state().last_known_host_name.as_deref(), Some("Bar"));
}

#[tokio::test]
async fn test_parse_error_without_identity() {
    let source = live(
        "https://www.youtube.com/",
        FakeResolver::describing([Some(r#"{"title":"Foo","#)]),
    );

    let info = source.info().await;
    assert_eq!(info, metadata(UNKNOWN_CHANNEL, PARSE_ERROR, false));
    assert!(!info.host_name.is_empty());
}

#[tokio::test]
async fn test_repeated_description_is_stable() {
    let source = live(
        "https://www.youtube.com/watch?v=abc",
        FakeResolver::describing([Some(LIVE_OUTPUT), Some(LIVE_OUTPUT)]),
    );

    let first = source.info().await;
    let state = source.state();
    assert_eq!(source.info().await, first);
    assert_eq!(source.state(), state);
}

#[tokio::test]
async fn test_deadlines() {
    let resolver = FakeResolver::describing([Some(LIVE_OUTPUT)]);
    *resolver.stream.lock() = vec![Some("https://a".to_string())];
    let source = live("https://www.youtube.com/@somechannel", resolver);

    source.info().await;
    source.stream_url().await.unwrap();

    assert_eq!(
        *source.resolver().deadlines.lock(),
        vec![Duration::from_secs(15), Duration::from_secs(30)]
    );
}

#[tokio::test]
async fn test_stream_url_first_line() {
    let source = live(
        "https://www.youtube.com/@somechannel/live",
        FakeResolver::streaming(Some(
            "https://a.example/manifest.m3u8\nhttps://b.example/manifest.m3u8\n",
        )),
    );

    let url = source.stream_url().await.unwrap();
    assert_eq!(url.as_str(), "https://a.example/manifest.m3u8");
}

#[tokio::test]
async fn test_stream_url_blank_output() {
    let source = live(
        "https://www.youtube.com/@somechannel/live",
        FakeResolver::streaming(Some("  \n\n")),
    );

    assert!(matches!(
        source.stream_url().await,
        Err(ResolveError::EmptyResult)
    ));
}

#[tokio::test]
async fn test_stream_url_invalid() {
    let source = live(
        "https://www.youtube.com/@somechannel/live",
        FakeResolver::streaming(Some("not a url\nhttps://b.example/")),
    );

    assert!(matches!(
        source.stream_url().await,
        Err(ResolveError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn test_stream_url_invocation_failure() {
    let source = live(
        "https://www.youtube.com/@somechannel/live",
        FakeResolver::streaming(None),
    );

    assert!(matches!(
        source.stream_url().await,
        Err(ResolveError::Invocation(InvocationError::Timeout(_)))
    ));
}

#[tokio::test]
async fn test_live_trait() {
    let resolver = FakeResolver::describing([Some(LIVE_OUTPUT)]);
    *resolver.stream.lock() = vec![Some("https://a.example/\nhttps://b.example/".to_string())];
    let source: Box<dyn Live> = Box::new(live("https://youtube.com/@somechannel", resolver));

    assert_eq!(source.platform_name(), "YouTube");
    assert_eq!(source.url().host_str(), Some("youtube.com"));

    let info = source.info().await.unwrap();
    assert_eq!(info.host_name, "Bar");
    assert!(info.is_live);

    let urls = source.stream_urls().await.unwrap();
    assert_eq!(urls, vec![Url::parse("https://a.example/").unwrap()]);
}

#[test]
fn test_register() {
    let mut registry = LiveRegistry::new();
    livewatch_youtube::register(&mut registry).unwrap();

    assert_eq!(registry.domains(), vec!["www.youtube.com", "youtube.com"]);

    let source = registry
        .parse("https://www.youtube.com/@somechannel/live")
        .unwrap();
    assert_eq!(source.platform_name(), "YouTube");
    assert!(registry.parse("https://m.youtube.com/@somechannel").is_err());

    // a second registration conflicts with the first one
    assert!(livewatch_youtube::register(&mut registry).is_err());
}

#[test]
fn test_register_invalid_options() {
    let mut registry = LiveRegistry::new();
    livewatch_youtube::register_with(
        &mut registry,
        YoutubeOptions {
            extra_args: Some("'unterminated".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    assert!(registry.parse("https://youtube.com/@somechannel").is_err());
}

#[tokio::test]
async fn test_describe_surfaces_errors() {
    let source = live(
        "https://www.youtube.com/@somechannel",
        FakeResolver::describing([None, Some("NA"), Some(LIVE_OUTPUT)]),
    );

    assert!(matches!(
        source.describe().await,
        Err(ResolveError::Invocation(_))
    ));
    assert!(matches!(source.describe().await, Err(ResolveError::Parse(_))));

    let description = source.describe().await.unwrap();
    assert_eq!(description.uploader, "Bar");
    // describing alone does not touch the remembered identity
    assert_eq!(source.state(), AdapterState::default());
}

#[tokio::test]
async fn test_empty_uploader_is_not_remembered() {
    let source = live(
        "https://www.youtube.com/@somechannel",
        FakeResolver::describing([
            Some(r#"{"title":"Foo","uploader":"","is_live":False}"#),
            None,
        ]),
    );

    assert_eq!(source.info().await, metadata("", "Foo", false));
    assert_eq!(
        source.info().await,
        metadata("somechannel", OFFLINE, false)
    );
    assert_eq!(
        source.state().last_known_host_name.as_deref(),
        Some("somechannel")
    );
}
