// src/app.rs

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::resolver::{request_context_resolver, strip_context_headers},
};

pub fn build_router(app_state: AppState) -> Router {
    // Telas com prefixo de idioma (o resolver garante o prefixo)
    let locale_routes = Router::new()
        .route("/{locale}/context", get(handlers::pages::context_page))
        .route("/{locale}/entities", get(handlers::entities::list_entities))
        .route("/{locale}/auth/login", get(handlers::pages::login_page))
        .route("/{locale}/unauthorized", get(handlers::pages::unauthorized_page))
        .route("/{locale}/tenant-suspended", get(handlers::pages::tenant_suspended_page))
        .route("/{locale}/error", get(handlers::pages::error_page));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(locale_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::pages::not_found)
        // A última camada é a primeira a rodar: limpa os cabeçalhos, depois resolve.
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            request_context_resolver,
        ))
        .layer(axum_middleware::from_fn(strip_context_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
