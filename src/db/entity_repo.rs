// src/db/entity_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::entities::{Entity, EntityFilter};

#[derive(Clone)]
pub struct EntityRepository {
    pool: PgPool,
}

impl EntityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Entidades do tenant, mais recentes primeiro.
    pub async fn list_entities(
        &self,
        tenant_id: Uuid,
        filter: &EntityFilter,
    ) -> Result<Vec<Entity>, AppError> {
        let mut query = list_query(tenant_id, filter);
        let entities = query
            .build_query_as::<Entity>()
            .fetch_all(&self.pool)
            .await?;

        Ok(entities)
    }
}

// O filtro por tenant é sempre o primeiro predicado e nunca é opcional.
fn list_query(tenant_id: Uuid, filter: &EntityFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT id, tenant_id, type, status, name, government_id, nationality_codes, \
         created_at, updated_at FROM entities WHERE tenant_id = ",
    );
    builder.push_bind(tenant_id);

    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(search));
        builder.push(" AND (name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR government_id ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    if let Some(status) = filter.status {
        builder.push(" AND status = ");
        builder.push_bind(status);
    }

    if let Some(entity_type) = filter.entity_type {
        builder.push(" AND type = ");
        builder.push_bind(entity_type);
    }

    builder.push(" ORDER BY created_at DESC");
    builder
}

// `%` e `_` digitados pelo usuário são literais.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entities::{EntityStatus, EntityType};

    #[test]
    fn bare_listing_is_scoped_to_the_tenant() {
        let builder = list_query(Uuid::nil(), &EntityFilter::default());
        assert_eq!(
            builder.sql(),
            "SELECT id, tenant_id, type, status, name, government_id, nationality_codes, \
             created_at, updated_at FROM entities WHERE tenant_id = $1 ORDER BY created_at DESC"
        );
    }

    #[test]
    fn every_filter_adds_a_bound_predicate() {
        let filter = EntityFilter {
            search: Some("  acme ".into()),
            status: Some(EntityStatus::Active),
            entity_type: Some(EntityType::Organization),
        };
        let builder = list_query(Uuid::nil(), &filter);
        let sql = builder.sql();

        assert!(sql.contains("(name ILIKE $2 OR government_id ILIKE $3)"));
        assert!(sql.contains("AND status = $4"));
        assert!(sql.contains("AND type = $5"));
        assert!(sql.ends_with("ORDER BY created_at DESC"));
    }

    #[test]
    fn blank_search_is_ignored() {
        let filter = EntityFilter {
            search: Some("   ".into()),
            ..EntityFilter::default()
        };
        assert!(!list_query(Uuid::nil(), &filter).sql().contains("ILIKE"));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
