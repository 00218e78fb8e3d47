// src/db/tenancy_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::tenancy::{Membership, MembershipRow};

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Vínculo do utilizador com o tenant identificado pelo slug, já normalizado.
    /// Esta é a verificação de segurança de autorização mais importante.
    pub async fn find_membership(
        &self,
        user_id: Uuid,
        tenant_slug: &str,
    ) -> Result<Option<Membership>, AppError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT
                ut.user_id,
                ut.role,
                t.id     AS tenant_id,
                t.slug   AS tenant_slug,
                t.status AS tenant_status
            FROM user_tenants ut
            JOIN tenants t ON t.id = ut.tenant_id
            WHERE ut.user_id = $1 AND t.slug = $2
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(tenant_slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Membership::from))
    }

    /// Consta na lista de super administradores da plataforma?
    pub async fn is_super_admin(&self, user_id: Uuid) -> Result<bool, AppError> {
        // SELECT EXISTS: apenas 'true' ou 'false'.
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM super_admins
                WHERE user_id = $1
            )
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
