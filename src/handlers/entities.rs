// src/handlers/entities.rs

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::entities::{Entity, EntityFilter, EntityStatus, EntityType},
};

// ---
// 1. Filtros vindos da query string
// ---
// Valores vazios (`?status=`) significam "sem filtro".
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EntityQuery {
    /// Busca por nome ou documento.
    #[validate(length(max = 100, message = "A busca deve ter no máximo 100 caracteres."))]
    pub search: Option<String>,
    /// ACTIVE | INACTIVE
    pub status: Option<String>,
    /// INDIVIDUAL | ORGANIZATION
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
}

impl EntityQuery {
    pub fn into_filter(self) -> Result<EntityFilter, AppError> {
        let status = non_empty(self.status)
            .map(|raw| raw.parse::<EntityStatus>())
            .transpose()
            .map_err(AppError::InvalidFilter)?;

        let entity_type = non_empty(self.entity_type)
            .map(|raw| raw.parse::<EntityType>())
            .transpose()
            .map_err(AppError::InvalidFilter)?;

        Ok(EntityFilter {
            search: non_empty(self.search),
            status,
            entity_type,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---
// 2. Handler
// ---
// GET /{locale}/entities
#[utoipa::path(
    get,
    path = "/{locale}/entities",
    tag = "Entities",
    params(
        ("locale" = String, Path, description = "Idioma (en | ar)"),
        EntityQuery
    ),
    responses(
        (status = 200, description = "Entidades do tenant", body = Vec<Entity>),
        (status = 400, description = "Filtro inválido"),
        (status = 403, description = "Requisição sem tenant autorizado"),
        (status = 503, description = "Modo de desenvolvimento, sem banco")
    )
)]
pub async fn list_entities(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<EntityQuery>,
) -> Result<Json<Vec<Entity>>, AppError> {
    query.validate()?;
    let filter = query.into_filter()?;

    let repo = app_state
        .entity_repo
        .as_ref()
        .ok_or(AppError::StoreUnavailable)?;

    let entities = repo.list_entities(tenant.tenant_id, &filter).await?;

    tracing::debug!(
        tenant = %tenant.tenant_slug,
        role = %tenant.role,
        count = entities.len(),
        "Listagem de entidades"
    );

    Ok(Json(entities))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Settings;

    #[test]
    fn empty_values_mean_no_filter() {
        let query = EntityQuery {
            search: Some(" ".into()),
            status: Some(String::new()),
            entity_type: None,
        };
        assert_eq!(query.into_filter().unwrap(), EntityFilter::default());
    }

    #[test]
    fn known_values_are_parsed() {
        let query = EntityQuery {
            search: Some("acme".into()),
            status: Some("INACTIVE".into()),
            entity_type: Some("ORGANIZATION".into()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.status, Some(EntityStatus::Inactive));
        assert_eq!(filter.entity_type, Some(EntityType::Organization));
        assert_eq!(filter.search.as_deref(), Some("acme"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let query = EntityQuery {
            status: Some("PENDING".into()),
            ..EntityQuery::default()
        };
        assert!(matches!(query.into_filter(), Err(AppError::InvalidFilter(_))));
    }

    fn app() -> Router {
        Router::new()
            .route("/{locale}/entities", get(list_entities))
            .with_state(AppState::with_access(Settings::default(), None))
    }

    #[tokio::test]
    async fn requires_an_authorized_tenant() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/en/entities")
                    .header("x-tenant-slug", "acme")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn without_a_store_the_listing_is_unavailable() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/en/entities?type=INDIVIDUAL")
                    .header("x-tenant-slug", "acme")
                    .header("x-tenant-id", Uuid::new_v4().to_string())
                    .header("x-user-role", "REVIEWER")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn long_searches_fail_validation() {
        let search = "x".repeat(101);
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/en/entities?search={search}"))
                    .header("x-tenant-slug", "acme")
                    .header("x-tenant-id", Uuid::new_v4().to_string())
                    .header("x-user-role", "ADMIN")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
