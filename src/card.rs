use tracing::debug;
use url::Url;

use crate::models::{detail_path, NewsSummary};

/// One card in the listing grid. The whole card links to the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsCard {
    pub id: String,
    pub headline: String,
    pub image_url: String,
    pub source: String,
    pub timestamp: String,
    pub href: String,
    image_failed: bool,
}

impl NewsCard {
    pub fn new(id: &str, headline: &str, image_url: &str, source: &str, timestamp: &str) -> Self {
        Self {
            id: id.to_string(),
            headline: headline.to_string(),
            image_url: image_url.to_string(),
            source: source.to_string(),
            timestamp: timestamp.to_string(),
            href: detail_path(id),
            image_failed: false,
        }
    }

    /// Build a card, pre-failing the image when its host is not allowed.
    pub fn from_summary(summary: &NewsSummary, image_domains: &[String]) -> Self {
        let mut card = Self::new(
            &summary.id,
            &summary.headline,
            &summary.image_url,
            &summary.source,
            &summary.timestamp,
        );
        if !image_allowed(&card.image_url, image_domains) {
            card.mark_image_failed();
        }
        card
    }

    /// Record an image load failure. Permanent for this card.
    pub fn mark_image_failed(&mut self) {
        if !self.image_failed {
            debug!("Image failed to load: {}", self.image_url);
        }
        self.image_failed = true;
    }

    pub fn image_failed(&self) -> bool {
        self.image_failed
    }

    /// The image to render, or `None` when the placeholder should be shown.
    pub fn image_src(&self) -> Option<&str> {
        if self.image_failed {
            None
        } else {
            Some(&self.image_url)
        }
    }
}

fn http_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

/// Whether `url` is an absolute http(s) link safe to put in an `href`.
pub fn link_allowed(url: &str) -> bool {
    http_url(url).is_some()
}

/// Whether `image_url` may be loaded. An empty allowlist permits any
/// http(s) host.
pub fn image_allowed(image_url: &str, image_domains: &[String]) -> bool {
    let url = match http_url(image_url) {
        Some(url) => url,
        None => return false,
    };

    match url.host_str() {
        Some(host) => {
            image_domains.is_empty()
                || image_domains
                    .iter()
                    .any(|domain| domain.eq_ignore_ascii_case(host))
        }
        None => false,
    }
}
