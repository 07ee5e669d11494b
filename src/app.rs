use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use reqwest::Client;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::index;
use crate::news::Extractor;

const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Config {
    pub city: String,
    pub api_key: String,
    pub weather_url: String,
    pub news_url: Url,
}

// Anything that goes in here must be a handle or pointer that can be cloned.
// The underlying state itself should be shared.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub extractor: Arc<Extractor>,
}

pub fn create_app(config: Config) -> Router {
    let http = Client::builder()
        .timeout(OUTBOUND_TIMEOUT)
        .build()
        .expect("failed to create http client");

    let state = AppState {
        config: Arc::new(config),
        http,
        extractor: Arc::new(Extractor::dev_to()),
    };

    let mut app = Router::new()
        .route("/", get(index::get_index))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let assets_path = "assets";
    log::debug!("serving assets from {}", assets_path);
    let assets_service = ServeDir::new(assets_path);
    app = app.fallback_service(assets_service);
    app
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            city: "Toronto".to_string(),
            api_key: "test-key".to_string(),
            weather_url: crate::weather::OPENWEATHER_URL.to_string(),
            news_url: Url::parse("https://dev.to/").expect("listing url is valid"),
        }
    }

    #[tokio::test]
    async fn unknown_path_falls_through_to_assets() {
        let app = create_app(test_config());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/no-such-file")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("request should not fail");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
