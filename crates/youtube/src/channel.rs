use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::Url;

pub const UNKNOWN_CHANNEL: &str = "unknown";

/// Best-effort owner identity derived from the address alone.
///
/// `/@handle` wins over `/channel/<id>`, which wins over the `v` query
/// parameter. Falls back to [`UNKNOWN_CHANNEL`], never returns an empty string.
pub fn channel_identity(url: &Url) -> String {
    let path = url.path();

    if let Some(rest) = path.strip_prefix("/@") {
        if let Some(handle) = first_segment(rest) {
            return handle.into_owned();
        }
    }

    if let Some(rest) = path.strip_prefix("/channel/") {
        if let Some(id) = first_segment(rest) {
            return id.into_owned();
        }
    }

    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| UNKNOWN_CHANNEL.to_string())
}

fn first_segment(path: &str) -> Option<Cow<'_, str>> {
    let segment = path.split('/').next().unwrap_or_default();
    if segment.is_empty() {
        return None;
    }

    Some(percent_decode_str(segment).decode_utf8_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(url: &str) -> String {
        channel_identity(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_handle() {
        assert_eq!(identity("https://www.youtube.com/@somechannel"), "somechannel");
        assert_eq!(
            identity("https://www.youtube.com/@somechannel/live"),
            "somechannel"
        );
    }

    #[test]
    fn test_encoded_handle() {
        assert_eq!(
            identity("https://www.youtube.com/@%E3%81%BF%E3%81%93/streams"),
            "みこ"
        );
    }

    #[test]
    fn test_channel_id() {
        assert_eq!(
            identity("https://www.youtube.com/channel/UC1opHUrw8rvnsadT-iGp7Cg/live"),
            "UC1opHUrw8rvnsadT-iGp7Cg"
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(identity("https://www.youtube.com/channel/XYZ?v=123"), "XYZ");
        assert_eq!(identity("https://www.youtube.com/@handle?v=123"), "handle");
        assert_eq!(identity("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(identity("https://www.youtube.com/"), UNKNOWN_CHANNEL);
        assert_eq!(identity("https://www.youtube.com/watch?v="), UNKNOWN_CHANNEL);
        assert_eq!(identity("https://www.youtube.com/@"), UNKNOWN_CHANNEL);
        assert_eq!(identity("https://www.youtube.com/channel/?v=abc"), "abc");
    }
}
