// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Estrutura de dados ("claims") dentro do JWT emitido pelo provedor de autenticação
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Sessão autenticada, resolvida uma única vez por requisição a partir do cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn from_claims(claims: Claims) -> Self {
        let expires_at = DateTime::from_timestamp(claims.exp as i64, 0).unwrap_or(DateTime::UNIX_EPOCH);
        Self {
            user_id: claims.sub,
            email: claims.email,
            expires_at,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
