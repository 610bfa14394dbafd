use serde::{Deserialize, Deserializer};

/// Output template passed to `yt-dlp --print`.
///
/// `is_live` is printed bare, so yt-dlp emits Python literals for it.
pub const DESCRIBE_TEMPLATE: &str =
    r#"{"title":"%(title)s","uploader":"%(uploader)s","is_live":%(is_live)s}"#;

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct VideoDescription {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub uploader: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_live: bool,
}

impl VideoDescription {
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(&normalize_literals(raw))
    }
}

/// Rewrite Python `True`/`False`/`None` that follow a colon into JSON literals.
///
/// This is a plain substring replacement. A title or uploader containing
/// `:True` and friends is rewritten as well.
pub fn normalize_literals(raw: &str) -> String {
    raw.trim()
        .replace(":True", ":true")
        .replace(":False", ":false")
        .replace(":None", ":null")
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
