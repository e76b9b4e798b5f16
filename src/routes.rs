use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use crate::card::{image_allowed, link_allowed, NewsCard};
use crate::client::BackendClient;
use crate::models::{detail_path, NewsDetail, RouteId};
use crate::state::{DetailState, ViewState};

const LIST_ERROR: &str = "Fehler beim Laden der Nachrichten";
const DETAIL_ERROR: &str = "Fehler beim Laden des Artikels";
const BACKEND_UNREACHABLE: &str = "Error connecting to backend";

pub struct AppState {
    pub client: BackendClient,
    pub image_domains: Vec<String>,
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub state: ViewState<Vec<NewsCard>>,
}

#[derive(Template)]
#[template(path = "news_list.html")]
pub struct NewsListTemplate {
    pub state: ViewState<Vec<NewsCard>>,
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub state: DetailState<ArticleView>,
    pub partial_url: String,
}

#[derive(Template)]
#[template(path = "news_detail.html")]
pub struct NewsDetailTemplate {
    pub state: DetailState<ArticleView>,
    pub partial_url: String,
}

#[derive(Template)]
#[template(path = "welcome.html")]
pub struct WelcomeTemplate {
    pub message: String,
}

/// A loaded article plus the fallback state of its hero image.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleView {
    pub detail: NewsDetail,
    image_failed: bool,
}

impl ArticleView {
    /// Related sources that are not plain http(s) links are dropped.
    pub fn new(mut detail: NewsDetail, image_domains: &[String]) -> Self {
        let image_failed = !image_allowed(&detail.image_url, image_domains);
        detail
            .related_sources
            .retain(|related| link_allowed(&related.url));
        Self {
            detail,
            image_failed,
        }
    }

    pub fn image_src(&self) -> Option<&str> {
        if self.image_failed {
            None
        } else {
            Some(&self.detail.image_url)
        }
    }
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

pub fn router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/partials/news", get(news_partial))
        .route("/news", get(news_missing_id))
        .route("/news/", get(news_missing_id))
        .route("/news/:id", get(news_detail))
        .route("/partials/news/:id", get(news_detail_partial))
        .route("/welcome", get(welcome))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn detail_partial_url(id: &RouteId) -> String {
    format!("/partials{}", detail_path(id.as_str()))
}

// Route handlers
pub async fn index() -> impl IntoResponse {
    HtmlTemplate(IndexTemplate {
        state: ViewState::Loading,
    })
}

pub async fn news_partial(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    info!("Fetching news...");

    let result = state.client.fetch_news().await.map(|items| {
        info!("News data received: {} items", items.len());
        items
            .iter()
            .map(|item| NewsCard::from_summary(item, &state.image_domains))
            .collect::<Vec<_>>()
    });

    let view = ViewState::Loading.resolve(result, |err| {
        error!("Error fetching news: {}", err);
        LIST_ERROR.to_string()
    });

    HtmlTemplate(NewsListTemplate { state: view })
}

pub async fn news_missing_id() -> impl IntoResponse {
    HtmlTemplate(DetailTemplate {
        state: DetailState::InvalidId,
        partial_url: String::new(),
    })
}

/// Undecodable path segments count as a missing identifier.
fn route_id(path: Result<Path<String>, PathRejection>) -> Option<RouteId> {
    match path {
        Ok(Path(raw_id)) => RouteId::parse(&raw_id),
        Err(rejection) => {
            info!("Rejected news route: {}", rejection.body_text());
            None
        }
    }
}

pub async fn news_detail(path: Result<Path<String>, PathRejection>) -> impl IntoResponse {
    let template = match route_id(path) {
        Some(id) => DetailTemplate {
            state: DetailState::Loading,
            partial_url: detail_partial_url(&id),
        },
        None => DetailTemplate {
            state: DetailState::InvalidId,
            partial_url: String::new(),
        },
    };

    HtmlTemplate(template)
}

pub async fn news_detail_partial(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> impl IntoResponse {
    let id = match route_id(path) {
        Some(id) => id,
        None => {
            return HtmlTemplate(NewsDetailTemplate {
                state: DetailState::InvalidId,
                partial_url: String::new(),
            })
        }
    };

    info!("Fetching news detail for ID: {}", id);

    let result = state
        .client
        .fetch_news_detail(&id)
        .await
        .map(|detail| detail.map(|d| ArticleView::new(d, &state.image_domains)));

    let view = DetailState::Loading.resolve(result, |err| {
        error!("Error fetching news detail {}: {}", id, err);
        err.user_message(DETAIL_ERROR)
    });

    HtmlTemplate(NewsDetailTemplate {
        state: view,
        partial_url: detail_partial_url(&id),
    })
}

pub async fn welcome(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let message = match state.client.fetch_welcome().await {
        Ok(message) => message,
        Err(err) => {
            error!("Error fetching data: {}", err);
            BACKEND_UNREACHABLE.to_string()
        }
    };

    HtmlTemplate(WelcomeTemplate { message })
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
