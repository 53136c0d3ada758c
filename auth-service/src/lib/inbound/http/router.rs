use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authorize::authorize;
use super::handlers::change_email::change_email;
use super::handlers::change_password::change_password;
use super::handlers::delete_account::delete_account;
use super::handlers::get_account::get_account;
use super::handlers::refresh::refresh;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_up::sign_up;
use super::middleware::authenticate as auth_middleware;
use crate::domain::credential::ports::AccountServicePort;
use crate::domain::credential::ports::AuthenticationServicePort;
use crate::domain::credential::ports::AuthorizationServicePort;

/// Services shared by all handlers.
///
/// Held as trait objects so the router is independent of the store adapter.
#[derive(Clone)]
pub struct AppState {
    pub authentication: Arc<dyn AuthenticationServicePort>,
    pub authorization: Arc<dyn AuthorizationServicePort>,
    pub accounts: Arc<dyn AccountServicePort>,
}

pub fn create_router(
    authentication: Arc<dyn AuthenticationServicePort>,
    authorization: Arc<dyn AuthorizationServicePort>,
    accounts: Arc<dyn AccountServicePort>,
) -> Router {
    let state = AppState {
        authentication,
        authorization,
        accounts,
    };

    let public_routes = Router::new()
        .route("/api/auth/sign-up", post(sign_up))
        .route("/api/auth/sign-in", post(sign_in))
        .route("/api/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/auth/authorize", post(authorize))
        .route("/api/accounts/me", get(get_account))
        .route("/api/accounts/me", delete(delete_account))
        .route("/api/accounts/me/email", patch(change_email))
        .route("/api/accounts/me/password", patch(change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span; they carry bearer tokens.
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
