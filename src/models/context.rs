// src/models/context.rs

use axum::http::{HeaderMap, HeaderValue};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::middleware::i18n::Locale;
use crate::models::tenancy::UserRole;

// Cabeçalhos que carregam o contexto para os handlers.
pub const LOCALE_HEADER: &str = "x-locale";
pub const TENANT_SLUG_HEADER: &str = "x-tenant-slug";
pub const TENANT_ID_HEADER: &str = "x-tenant-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const SUPER_ADMIN_HEADER: &str = "x-is-super-admin";
pub const DEV_MODE_HEADER: &str = "x-dev-mode";

/// Todos os cabeçalhos de contexto. Nenhum deles pode vir do cliente.
pub const CONTEXT_HEADERS: [&str; 6] = [
    LOCALE_HEADER,
    TENANT_SLUG_HEADER,
    TENANT_ID_HEADER,
    USER_ROLE_HEADER,
    SUPER_ADMIN_HEADER,
    DEV_MODE_HEADER,
];

/// Contexto derivado por requisição. Nunca é persistido.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub locale: Locale,
    pub tenant_slug: Option<String>,
    pub tenant_id: Option<Uuid>,
    pub user_role: Option<UserRole>,
    pub is_super_admin: bool,
    pub dev_mode: bool,
}

impl RequestContext {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Escreve o contexto nos cabeçalhos encaminhados, sobrescrevendo o que houver.
    pub fn apply_to(&self, headers: &mut HeaderMap) {
        for name in CONTEXT_HEADERS {
            headers.remove(name);
        }

        headers.insert(LOCALE_HEADER, HeaderValue::from_static(self.locale.code()));

        if let Some(value) = self
            .tenant_slug
            .as_deref()
            .and_then(|slug| HeaderValue::from_str(slug).ok())
        {
            headers.insert(TENANT_SLUG_HEADER, value);
        }
        if let Some(value) = self
            .tenant_id
            .and_then(|id| HeaderValue::from_str(&id.to_string()).ok())
        {
            headers.insert(TENANT_ID_HEADER, value);
        }
        if let Some(role) = self.user_role {
            headers.insert(USER_ROLE_HEADER, HeaderValue::from_static(role.as_str()));
        }
        if self.is_super_admin {
            headers.insert(SUPER_ADMIN_HEADER, HeaderValue::from_static("true"));
        }
        if self.dev_mode {
            headers.insert(DEV_MODE_HEADER, HeaderValue::from_static("true"));
        }
    }

    /// Lê de volta o que o resolver escreveu. Valores ilegíveis contam como ausentes.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let text = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());

        Self {
            locale: text(LOCALE_HEADER)
                .and_then(Locale::from_code)
                .unwrap_or_default(),
            tenant_slug: text(TENANT_SLUG_HEADER)
                .filter(|slug| !slug.is_empty())
                .map(str::to_owned),
            tenant_id: text(TENANT_ID_HEADER).and_then(|id| Uuid::parse_str(id).ok()),
            user_role: text(USER_ROLE_HEADER).and_then(|role| role.parse().ok()),
            is_super_admin: text(SUPER_ADMIN_HEADER) == Some("true"),
            dev_mode: text(DEV_MODE_HEADER) == Some("true"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_carry_the_full_context() {
        let context = RequestContext {
            locale: Locale::Ar,
            tenant_slug: Some("acme".into()),
            tenant_id: Some(Uuid::new_v4()),
            user_role: Some(UserRole::Analyst),
            is_super_admin: false,
            dev_mode: false,
        };

        let mut headers = HeaderMap::new();
        context.apply_to(&mut headers);

        assert_eq!(headers.get(USER_ROLE_HEADER).unwrap(), "ANALYST");
        assert!(headers.get(SUPER_ADMIN_HEADER).is_none());
        assert!(headers.get(DEV_MODE_HEADER).is_none());
        assert_eq!(RequestContext::from_headers(&headers), context);
    }

    #[test]
    fn apply_overwrites_stale_values() {
        let mut headers = HeaderMap::new();
        headers.insert(TENANT_ID_HEADER, HeaderValue::from_static("forged"));
        headers.insert(SUPER_ADMIN_HEADER, HeaderValue::from_static("true"));

        RequestContext::new(Locale::En).apply_to(&mut headers);

        assert!(headers.get(TENANT_ID_HEADER).is_none());
        assert!(headers.get(SUPER_ADMIN_HEADER).is_none());
        assert_eq!(headers.get(LOCALE_HEADER).unwrap(), "en");
    }

    #[test]
    fn super_admin_flag_requires_literal_true() {
        let mut headers = HeaderMap::new();
        headers.insert(SUPER_ADMIN_HEADER, HeaderValue::from_static("yes"));
        assert!(!RequestContext::from_headers(&headers).is_super_admin);
    }
}
