// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::Settings,
    models::{context::RequestContext, tenancy::UserRole},
};

// ---
// 1. Tenant a partir do host
// ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostTarget {
    /// Host da lista de super administradores: sem tenant.
    SuperAdmin,
    /// Host principal da aplicação: o tenant não vem do host.
    MainDomain,
    /// `acme.example.com` -> "acme".
    Tenant(String),
    /// Host sem subdomínio (ex.: "localhost:3000" fora da configuração) ou ausente.
    Unscoped,
}

impl HostTarget {
    pub fn tenant_slug(&self) -> Option<&str> {
        match self {
            HostTarget::Tenant(slug) => Some(slug),
            _ => None,
        }
    }
}

pub fn tenant_from_host(host: &str, settings: &Settings) -> HostTarget {
    let host = host.trim().to_ascii_lowercase();

    if settings.is_super_admin_host(&host) {
        return HostTarget::SuperAdmin;
    }

    if host == settings.main_domain {
        return HostTarget::MainDomain;
    }

    // Formato: tenant.dominio.com ou tenant.localhost:3000
    match host.split_once('.') {
        Some((slug, _)) if !slug.is_empty() => HostTarget::Tenant(slug.to_string()),
        _ => HostTarget::Unscoped,
    }
}

/// `Host` do HTTP/1.1, ou a authority da URI (HTTP/2).
pub fn request_host(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .or_else(|| parts.uri.authority().map(|authority| authority.to_string()))
}

// ---
// 2. Extratores para os handlers
// ---
// Os cabeçalhos só chegam aqui depois do resolver: os do cliente são descartados na borda.
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::from_headers(&parts.headers))
    }
}

// O tenant autorizado para a requisição: só existe após o teste de vínculo.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: Uuid,
    pub tenant_slug: String,
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = RequestContext::from_headers(&parts.headers);

        match (context.tenant_id, context.tenant_slug, context.user_role) {
            (Some(tenant_id), Some(tenant_slug), Some(role)) => Ok(TenantContext {
                tenant_id,
                tenant_slug,
                role,
            }),
            _ => Err(AppError::MissingTenantContext),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            super_admin_domains: vec!["admin.localhost:3000".into(), "admin.kyc.io".into()],
            main_domain: "kyc.io".into(),
            ..Settings::default()
        }
    }

    #[test]
    fn super_admin_hosts_have_no_tenant() {
        let settings = settings();
        for host in ["admin.localhost:3000", "admin.kyc.io", "ADMIN.kyc.io"] {
            let target = tenant_from_host(host, &settings);
            assert_eq!(target, HostTarget::SuperAdmin);
            assert_eq!(target.tenant_slug(), None);
        }
    }

    #[test]
    fn main_domain_has_no_tenant() {
        assert_eq!(tenant_from_host("kyc.io", &settings()), HostTarget::MainDomain);
    }

    #[test]
    fn subdomain_is_the_slug() {
        let settings = settings();
        assert_eq!(
            tenant_from_host("acme.example.com", &settings),
            HostTarget::Tenant("acme".into())
        );
        assert_eq!(
            tenant_from_host("globex.localhost:3000", &settings).tenant_slug(),
            Some("globex")
        );
        assert_eq!(
            tenant_from_host("a.b.c.kyc.io", &settings).tenant_slug(),
            Some("a")
        );
    }

    #[test]
    fn hosts_without_a_label_are_unscoped() {
        let settings = settings();
        assert_eq!(tenant_from_host("localhost:3000", &settings), HostTarget::Unscoped);
        assert_eq!(tenant_from_host("", &settings), HostTarget::Unscoped);
        assert_eq!(tenant_from_host(".kyc.com", &settings), HostTarget::Unscoped);
    }

    #[test]
    fn host_falls_back_to_the_uri_authority() {
        let (parts, _) = axum::http::Request::builder()
            .uri("https://acme.example.com/en/entities")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(request_host(&parts).as_deref(), Some("acme.example.com"));

        let (parts, _) = axum::http::Request::builder()
            .uri("https://other.example.com/en")
            .header(header::HOST, "acme.example.com")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(request_host(&parts).as_deref(), Some("acme.example.com"));

        let (parts, _) = axum::http::Request::builder()
            .uri("/en")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(request_host(&parts), None);
    }
}
