use std::sync::Arc;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::games::backend_wheel_game::{create_router as create_wheel_game_router, TicketLedger};

mod auth;
mod config;
mod error;
mod games;
mod logging;

#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    tickets: Arc<TicketLedger>,
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
}

fn build_app(state: AppState) -> Router {
    let index = format!("{}/index.html", state.config.static_dir);
    let frontend = ServeDir::new(&state.config.static_dir).fallback(ServeFile::new(index));

    // Unknown API paths answer 404 instead of falling through to the app shell
    let api = create_wheel_game_router(state.clone())
        .route("/health", get(health_check))
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api)
        .fallback_service(frontend)
        .layer(cors_layer(&state.config.cors_origins))
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(logging::REQUEST_LEVEL))
                .on_response(DefaultOnResponse::new().level(logging::REQUEST_LEVEL)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::from_path(".env").ok();
    logging::setup()?;

    let config = AppConfig::from_env()?;
    info!("Serving {} rewards", config.rewards.len());

    let addr = config.bind_addr;
    let state = AppState {
        config: Arc::new(config),
        tickets: Arc::new(TicketLedger::default()),
    };

    let app = build_app(state);

    info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::Mutex;
    use tower::ServiceExt;
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer};
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, Registry};

    fn state() -> AppState {
        state_with_static_dir("/nonexistent".to_string())
    }

    fn state_with_static_dir(static_dir: String) -> AppState {
        let config = AppConfig::from_lookup(move |key| match key {
            "JWT_SECRET_KEY" => Some("secret".to_string()),
            "STATIC_DIR" => Some(static_dir.clone()),
            _ => None,
        })
        .unwrap();
        AppState {
            config: Arc::new(config),
            tickets: Arc::new(TicketLedger::default()),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let response = build_app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rewards_route_is_mounted() {
        let request = Request::builder().uri("/api/rewards").body(Body::empty()).unwrap();
        let response = build_app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_products_route_is_mounted() {
        let request = Request::builder().uri("/api/provisional-products").body(Body::empty()).unwrap();
        let response = build_app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_not_the_app_shell() {
        let dir = std::env::temp_dir().join(format!("wheel-static-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html>wheel</html>").unwrap();
        let app = build_app(state_with_static_dir(dir.to_string_lossy().into_owned()));

        let request = Request::builder().uri("/api/missing-collection").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "not found");

        let request = Request::builder().uri("/productos").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>wheel</html>");

        std::fs::remove_dir_all(&dir).ok();
    }

    struct TargetCapture(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for TargetCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(event.metadata().target().to_string());
        }
    }

    #[tokio::test]
    async fn test_requests_are_logged_under_default_filter() {
        let targets = Arc::new(Mutex::new(Vec::new()));
        let subscriber = Registry::default()
            .with(EnvFilter::new(logging::DEFAULT_FILTER))
            .with(TargetCapture(targets.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let response = build_app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let targets = targets.lock().unwrap();
        assert!(targets.iter().any(|t| t.starts_with("tower_http::trace::on_request")));
        assert!(targets.iter().any(|t| t.starts_with("tower_http::trace::on_response")));
    }
}
