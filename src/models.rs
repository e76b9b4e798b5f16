use serde::{Deserialize, Deserializer};
use url::Url;

/// A news item as it appears in the listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSummary {
    pub id: String,
    pub headline: String,
    pub image_url: String,
    pub source: String,
    /// Already formatted for display by the backend
    pub timestamp: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelatedSource {
    pub source: String,
    pub url: String,
}

/// Full article: summary fields plus links to other outlets covering it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetail {
    pub id: String,
    pub headline: String,
    pub image_url: String,
    pub source: String,
    pub timestamp: String,
    #[serde(default)]
    pub summary: String,
    // null and missing both mean "no related sources"
    #[serde(default, deserialize_with = "null_as_empty")]
    pub related_sources: Vec<RelatedSource>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RelatedSource>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RelatedSource>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of the backend root endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WelcomeMessage {
    pub message: String,
}

/// Identifier taken from a `/news/{id}` route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteId(String);

impl RouteId {
    /// Returns `None` for identifiers that cannot address an article:
    /// blank ones and the dot segments, which would rewrite the backend path.
    /// Anything else is kept verbatim.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() || raw == "." || raw == ".." {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percent-encode `segment` so it occupies exactly one path segment.
pub fn encode_path_segment(segment: &str) -> String {
    let mut url = match Url::parse("http://localhost/") {
        Ok(url) => url,
        Err(_) => return segment.to_string(),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Frontend path of the detail page for `id`.
pub fn detail_path(id: &str) -> String {
    format!("/news/{}", encode_path_segment(id))
}
