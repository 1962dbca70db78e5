use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use wedding_shared::api::{ApiClient, ApiTransport};

use crate::config::Config;
use crate::handlers::{
    confirmation_handlers::{get_confirmation, get_confirmations, get_wedding_confirmations},
    countdown_handlers::{get_countdown, stream_countdown},
    page_handlers::{get_invitation, open_invitation},
    rsvp_handlers::{modify_rsvp, submit_rsvp},
};
use crate::state::AppState;

/// Creates a router talking to the configured invitation API
pub fn create_router(config: Config) -> tera::Result<Router> {
    info!("Creating router against API at {}", config.api_url);

    let client = Arc::new(ApiClient::new(config.api_url.clone()));
    let state = AppState::from_transport(config, client)?;

    Ok(create_router_with_state(state))
}

/// Creates a router over an already assembled state
pub fn create_router_with_state<T>(state: AppState<T>) -> Router
where
    T: ApiTransport + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    let page_routes = Router::new()
        .route("/", get(get_invitation::<T>))
        .route("/open", post(open_invitation::<T>))
        .route("/rsvp", post(submit_rsvp::<T>))
        .route("/rsvp/modify", post(modify_rsvp::<T>));

    let countdown_routes = Router::new()
        .route("/countdown", get(get_countdown::<T>))
        .route("/countdown/stream", get(stream_countdown::<T>));

    let confirmation_routes = Router::new()
        .route("/confirmations", get(get_confirmations::<T>))
        .route("/confirmations/:id", get(get_confirmation::<T>))
        .route(
            "/weddings/:wedding_id/confirmations",
            get(get_wedding_confirmations::<T>),
        );

    let router = page_routes
        .merge(countdown_routes)
        .merge(confirmation_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router configured with page, countdown and confirmation routes");

    router.fallback(|req: Request| async move {
        warn!("No route matched for: {} {}", req.method(), req.uri());
        (
            axum::http::StatusCode::NOT_FOUND,
            "The requested resource was not found".to_string(),
        )
    })
}
