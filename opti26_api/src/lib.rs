pub mod admin;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod state;
pub mod store;
pub mod upload;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::Method,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    admin::results::results_handler,
    state::AppState,
    upload::{upload_form::upload_form_handler, upload_handler::upload_handler},
};

pub fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/",
            get(upload_form_handler)
                .post(upload_handler)
                .fallback(upload_form_handler),
        )
        .route(
            "/admin/results",
            get(results_handler).fallback(upload_form_handler),
        )
        .fallback(upload_form_handler)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
