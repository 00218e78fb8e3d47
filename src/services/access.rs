// src/services/access.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TenantRepository,
    models::{auth::Session, tenancy::Membership},
    services::auth::AuthService,
};

/// O que o resolver precisa do provedor de autenticação e do banco.
/// Cada chamada é uma ida e volta independente; nada é guardado entre requisições.
#[async_trait]
pub trait AccessBackend: Send + Sync {
    /// `Ok(None)` para token ausente, inválido ou expirado.
    async fn session_from_token(&self, token: &str) -> Result<Option<Session>, AppError>;

    async fn find_membership(
        &self,
        user_id: Uuid,
        tenant_slug: &str,
    ) -> Result<Option<Membership>, AppError>;

    async fn is_super_admin(&self, user_id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgAccessBackend {
    auth_service: AuthService,
    tenant_repo: TenantRepository,
}

impl PgAccessBackend {
    pub fn new(auth_service: AuthService, tenant_repo: TenantRepository) -> Self {
        Self {
            auth_service,
            tenant_repo,
        }
    }
}

#[async_trait]
impl AccessBackend for PgAccessBackend {
    async fn session_from_token(&self, token: &str) -> Result<Option<Session>, AppError> {
        match self.auth_service.validate_token(token) {
            Ok(session) => Ok(Some(session)),
            Err(AppError::InvalidToken) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn find_membership(
        &self,
        user_id: Uuid,
        tenant_slug: &str,
    ) -> Result<Option<Membership>, AppError> {
        self.tenant_repo.find_membership(user_id, tenant_slug).await
    }

    async fn is_super_admin(&self, user_id: Uuid) -> Result<bool, AppError> {
        self.tenant_repo.is_super_admin(user_id).await
    }
}
