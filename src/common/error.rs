use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Filtro inválido: {0}")]
    InvalidFilter(String),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Contexto do tenant ausente")]
    MissingTenantContext,

    #[error("Armazenamento de dados não configurado")]
    StoreUnavailable,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidFilter(message) => {
                let body = Json(json!({ "error": message }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Sessão inválida ou expirada."),
            AppError::MissingTenantContext => (
                StatusCode::FORBIDDEN,
                "Esta rota exige um tenant resolvido para a requisição.",
            ),
            AppError::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "O armazenamento de dados não está configurado (modo de desenvolvimento).",
            ),

            // DatabaseError e InternalServerError viram 500; o detalhe fica só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tenant_is_forbidden() {
        let response = AppError::MissingTenantContext.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn database_errors_are_masked_as_500() {
        let response = AppError::DatabaseError(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_filter_is_bad_request() {
        let response = AppError::InvalidFilter("status".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
