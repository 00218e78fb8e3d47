// src/services/auth.rs

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, Session},
};

/// Valida os tokens de sessão emitidos pelo provedor de autenticação (HS256).
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<Session, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // O provedor emite `aud = "authenticated"`; não restringimos por audiência.
        validation.validate_aud = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token de sessão rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        let session = Session::from_claims(token_data.claims);

        // `decode` já checa `exp` com folga; aqui a janela é estrita.
        if !session.is_valid_at(Utc::now()) {
            return Err(AppError::InvalidToken);
        }

        Ok(session)
    }
}
