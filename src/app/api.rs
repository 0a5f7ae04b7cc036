use crate::app::state::{AppState, ENGINE_NAME};
use crate::config::ServerConfig;
use crate::core::{charts, regions, PageFetcher, Storage};
use crate::domain::model::{FullDataResponse, ResponseMeta, StatusResponse};
use axum::{extract::State, http::HeaderValue, routing::get, Json, Router};
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub fn app_router<S, F>(state: Arc<AppState<S, F>>, server: &ServerConfig) -> Router
where
    S: Storage + 'static,
    F: PageFetcher + 'static,
{
    let mut router = Router::new()
        .route("/api/full-data", get(full_data::<S, F>))
        .route("/api/status", get(system_status::<S, F>))
        .with_state(state);

    if let Some(static_dir) = &server.static_dir {
        let index_file = Path::new(static_dir).join("index.html");
        let static_service = ServeDir::new(static_dir).fallback(ServeFile::new(index_file));
        router = router.fallback_service(static_service);
    }

    router
        .layer(cors_layer(&server.cors_allow_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed: &[String]) -> CorsLayer {
    if allowed.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("⚠️ Ignoring CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

/// Base price, regional table and charts in one payload.
async fn full_data<S, F>(State(state): State<Arc<AppState<S, F>>>) -> Json<FullDataResponse>
where
    S: Storage + 'static,
    F: PageFetcher + 'static,
{
    let start_time = Instant::now();

    let base_price = state.resolver.resolve().await;
    let states = regions::calculate_all_regions(base_price);
    let charts = charts::generate_charts(base_price);

    Json(FullDataResponse {
        status: "success".to_string(),
        timestamp: Local::now().format("%d %B %Y, %I:%M %p").to_string(),
        base_price,
        states,
        charts,
        meta: ResponseMeta {
            latency: format!("{:.2}s", start_time.elapsed().as_secs_f64()),
            source: ENGINE_NAME.to_string(),
        },
    })
}

/// Uptime probe: reports the cache without triggering a refresh.
async fn system_status<S, F>(State(state): State<Arc<AppState<S, F>>>) -> Json<StatusResponse>
where
    S: Storage + 'static,
    F: PageFetcher + 'static,
{
    let store = state.store();
    Json(StatusResponse {
        status: "online".to_string(),
        cached_price: store.load(true).await,
        cache_file_exists: store.exists().await,
    })
}
