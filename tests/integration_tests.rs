//! Integration tests for the Papergum frontend
//!
//! These tests run the full router against a mocked news backend and
//! follow the page shell → content fragment flow a browser goes through.

use std::io::Write;
use tempfile::NamedTempFile;

mod common {
    use std::sync::Arc;

    use axum_test::TestServer;
    use papergum::client::BackendClient;
    use papergum::config::Config;
    use papergum::routes::{self, AppState};

    /// Build a test server whose backend lives at `backend_url`
    pub fn create_server(backend_url: &str) -> TestServer {
        let config = Config {
            backend_url: backend_url.to_string(),
            request_timeout_secs: 5,
            ..Config::default()
        };
        let state = Arc::new(AppState {
            client: BackendClient::new(&config).expect("Failed to create backend client"),
            image_domains: config.image_domains.clone(),
        });

        TestServer::new(routes::router(state, &config.static_dir))
            .expect("Failed to start test server")
    }

    /// Pull the `hx-get` target out of a rendered loading shell
    pub fn hx_get_target(html: &str) -> Option<String> {
        let start = html.find("hx-get=\"")? + "hx-get=\"".len();
        let end = html[start..].find('"')? + start;
        Some(html[start..end].to_string())
    }
}

#[cfg(test)]
mod config_integration_tests {
    use super::*;
    use papergum::config::Config;

    #[test]
    fn test_load_shipped_config() {
        let config = Config::load("papergum.toml");
        assert!(config.is_ok(), "Failed to load papergum.toml: {:?}", config.err());

        let config = config.unwrap();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert!(config.request_timeout_secs > 0);
        assert!(!config.image_domains.is_empty());
    }

    #[test]
    fn test_partial_config_file() {
        let toml_content = r#"
            backend_url = "http://news-backend.internal:8000"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path())
            .unwrap()
            .with_backend_override(None);

        assert_eq!(config.backend_url, "http://news-backend.internal:8000");
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.static_dir, "static");
    }
}

#[cfg(test)]
mod listing_flow_tests {
    use super::common::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_single_item_listing() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "headline": "A", "imageUrl": "u", "source": "S", "timestamp": "t"}
            ])))
            .expect(1)
            .mount(&backend)
            .await;

        let server = create_server(&backend.uri());

        let shell = server.get("/").await;
        shell.assert_status_ok();
        let target = hx_get_target(&shell.text()).expect("loading shell has no hx-get");
        assert_eq!(target, "/partials/news");

        let content = server.get(&target).await;
        content.assert_status_ok();
        let html = content.text();

        assert_eq!(html.matches("class=\"news-card\"").count(), 1);
        assert!(html.contains("href=\"/news/1\""));
        assert!(html.contains("<h2 class=\"news-card-headline\">A</h2>"));
        // "u" is not a loadable image url
        assert!(html.contains("image-placeholder visible"));
    }

    #[tokio::test]
    async fn test_listing_failure_then_reload() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "7", "headline": "Nach dem Neuladen", "imageUrl": "https://img.zeit.de/7.jpg", "source": "Zeit Online", "timestamp": "jetzt"}
            ])))
            .mount(&backend)
            .await;

        let server = create_server(&backend.uri());

        let failed = server.get("/partials/news").await.text();
        assert!(failed.contains("Fehler beim Laden der Nachrichten"));
        assert!(failed.contains("window.location.reload()"));
        assert_eq!(failed.matches("class=\"news-card\"").count(), 0);

        // a reload runs the whole view again
        let reloaded = server.get("/partials/news").await.text();
        assert_eq!(reloaded.matches("class=\"news-card\"").count(), 1);
        assert!(reloaded.contains("Nach dem Neuladen"));
    }
}

#[cfg(test)]
mod detail_flow_tests {
    use super::common::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_card_link_leads_to_article() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "ab-12", "headline": "Wahl in Hessen", "imageUrl": "https://www.tagesschau.de/w.jpg", "source": "Tagesschau", "timestamp": "vor 3 Stunden"}
            ])))
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/news/ab-12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "ab-12",
                "headline": "Wahl in Hessen",
                "imageUrl": "https://www.tagesschau.de/w.jpg",
                "source": "Tagesschau",
                "timestamp": "vor 3 Stunden",
                "summary": "Die Auszählung läuft.",
                "relatedSources": [{"source": "Zeit Online", "url": "https://www.zeit.de/wahl"}]
            })))
            .expect(1)
            .mount(&backend)
            .await;

        let server = create_server(&backend.uri());

        let listing = server.get("/partials/news").await.text();
        assert!(listing.contains("href=\"/news/ab-12\""));

        let shell = server.get("/news/ab-12").await;
        shell.assert_status_ok();
        let shell_html = shell.text();
        assert!(shell_html.contains("Lade Artikel..."));
        let target = hx_get_target(&shell_html).expect("detail shell has no hx-get");
        assert_eq!(target, "/partials/news/ab-12");

        let article = server.get(&target).await.text();
        assert!(article.contains("Wahl in Hessen"));
        assert!(article.contains("Die Auszählung läuft."));
        assert!(article.contains("Weitere Quellen"));
        assert!(article.contains("href=\"https://www.zeit.de/wahl\""));
        assert!(article.contains("src=\"https://www.tagesschau.de/w.jpg\""));
    }

    #[tokio::test]
    async fn test_missing_identifier_makes_no_request() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&backend)
            .await;

        let server = create_server(&backend.uri());

        let page = server.get("/news/").await;
        page.assert_status_ok();
        let html = page.text();
        assert!(html.contains("Ungültige Artikel-ID"));
        assert!(html.contains("href=\"/\""));
        assert!(hx_get_target(&html).is_none());
    }
}

#[cfg(test)]
mod misc_route_tests {
    use super::common::*;

    #[tokio::test]
    async fn test_static_stylesheet_is_served() {
        let server = create_server("http://127.0.0.1:1");

        let response = server.get("/static/style.css").await;
        response.assert_status_ok();
        assert!(response.text().contains(".news-grid"));
    }

    #[tokio::test]
    async fn test_health() {
        let server = create_server("http://127.0.0.1:1");

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_welcome_without_backend() {
        let server = create_server("http://127.0.0.1:1");

        let html = server.get("/welcome").await.text();
        assert!(html.contains("Welcome to Papergum"));
        assert!(html.contains("Error connecting to backend"));
    }
}
