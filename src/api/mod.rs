pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    http::HeaderValue,
    Router,
    routing::get,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::{ServerConfig, Settings},
    service::ServiceContext,
};
use state::AppState;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    settings: Arc<Settings>,
) -> Router {
    let cors = cors_layer(&settings.server);
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        .route("/api", get(handlers::root::api_info))

        .nest("/api", api_routes())

        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/announcements", get(handlers::announcements::list).post(handlers::announcements::create))
        .route("/announcements/:id", get(handlers::announcements::get))
        .route("/lost-found", get(handlers::lost_found::list).post(handlers::lost_found::create))
        .route("/lost-found/:id", get(handlers::lost_found::get))
        .route("/timetable", get(handlers::timetable::get).post(handlers::timetable::save))
        .route(
            "/complaints",
            get(handlers::complaints::list)
                .post(handlers::complaints::create)
                .put(handlers::complaints::update_status),
        )
        .route("/complaints/:id", get(handlers::complaints::get))
        .route("/skills", get(handlers::skills::list).post(handlers::skills::create))
        .route("/skills/:id", get(handlers::skills::get))
        .route("/news", get(handlers::news::list).post(handlers::news::create))
        .route("/news/:id", get(handlers::news::get))
        .route(
            "/polls",
            get(handlers::polls::list)
                .post(handlers::polls::create)
                .put(handlers::polls::vote),
        )
        .route("/polls/:id", get(handlers::polls::get))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server.cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
