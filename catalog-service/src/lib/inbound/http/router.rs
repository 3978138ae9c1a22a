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
use super::handlers::health::health;
use super::handlers::products::create_product;
use super::handlers::products::delete_product;
use super::handlers::products::get_product;
use super::handlers::products::list_products;
use super::handlers::products::search_products;
use super::handlers::products::update_product;
use super::handlers::register::register;
use super::middleware::authenticate_request;
use super::middleware::AuthenticationGate;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::user::ports::AuthenticationServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthenticationServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub gate: Arc<AuthenticationGate>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthenticationServicePort>,
    product_service: Arc<dyn ProductServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let gate = Arc::new(AuthenticationGate::new(
        authenticator,
        Arc::clone(&auth_service),
    ));

    let state = AppState {
        auth_service,
        product_service,
        gate,
    };

    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/authenticate", post(authenticate));

    // Authorization is enforced per handler by the RequireAuthenticated/RequireAdmin extractors
    let product_routes = Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route(
            "/:product_id",
            get(get_product).patch(update_product).delete(delete_product),
        );

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
        .route("/health", get(health))
        // Nested "/" only matches the bare prefix
        .route(
            "/api/v1/products/",
            get(list_products).post(create_product),
        )
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/products", product_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_request,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
