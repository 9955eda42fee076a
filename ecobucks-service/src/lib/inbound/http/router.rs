use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::claim_disposal::claim_disposal;
use super::handlers::create_account::create_account;
use super::handlers::get_profile::get_profile;
use super::handlers::list_disposals::list_disposals;
use super::handlers::list_stations::list_stations;
use super::handlers::refresh_token::refresh_token;
use super::handlers::register_disposal::register_disposal;
use super::handlers::register_station::register_station;
use super::middleware::resolve_identity;
use super::middleware::validate_token;
use crate::domain::disposal::ports::DisposalServicePort;
use crate::domain::station::registry::StationRegistry;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub disposal_service: Arc<dyn DisposalServicePort>,
    pub station_registry: Arc<StationRegistry>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(health))
        .route("/auth", post(authenticate).put(create_account))
        .route("/auth/refresh", post(refresh_token));

    // route_layer runs the last added layer first: validate, then resolve
    let protected_routes = Router::new()
        .route("/me", get(get_profile))
        .route(
            "/me/disposals",
            get(list_disposals)
                .put(register_disposal)
                .post(claim_disposal),
        )
        .route("/stations", get(list_stations).put(register_station))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_identity,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            validate_token,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
