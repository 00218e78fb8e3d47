// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::middleware;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Context ---
        handlers::pages::context_page,

        // --- Pages ---
        handlers::pages::login_page,

        // --- Entities ---
        handlers::entities::list_entities,
    ),
    components(
        schemas(
            // --- Context ---
            models::context::RequestContext,
            middleware::i18n::Locale,
            middleware::i18n::TextDirection,
            handlers::pages::ContextView,
            handlers::pages::StatusPage,

            // --- Tenancy ---
            models::tenancy::UserRole,
            models::tenancy::TenantStatus,

            // --- Entities ---
            models::entities::Entity,
            models::entities::EntityType,
            models::entities::EntityStatus,
        )
    ),
    tags(
        (name = "Context", description = "Contexto resolvido pelo gateway (idioma, tenant, papel)"),
        (name = "Pages", description = "Destinos dos redirecionamentos"),
        (name = "Entities", description = "Entidades KYC do tenant")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_the_tenant_scoped_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/{locale}/entities"));
        assert!(doc.paths.paths.contains_key("/{locale}/context"));
    }
}
