use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Origin of the news backend, e.g. `http://localhost:8000`
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Timeout for a single backend request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Hosts images may be loaded from. Empty allows any http(s) host.
    #[serde(default = "default_image_domains")]
    pub image_domains: Vec<String>,
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_image_domains() -> Vec<String> {
    [
        "images.unsplash.com",
        "images.tagesschau.de",
        "img.zeit.de",
        "cdn.prod.www.spiegel.de",
        "bilder.t-online.de",
        "images.zeit.de",
        "www.tagesschau.de",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            listen_addr: default_listen_addr(),
            request_timeout_secs: default_request_timeout(),
            static_dir: default_static_dir(),
            image_domains: default_image_domains(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `PAPERGUM_BACKEND_URL` on top of the file settings.
    pub fn with_backend_override(mut self, backend_url: Option<String>) -> Self {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend_url = url;
        }
        self
    }
}
