// src/middleware/resolver.rs
//
// O porteiro de todas as requisições: idioma, tenant, sessão e autorização,
// nesta ordem. Ou encaminha com os cabeçalhos de contexto, ou redireciona.

use axum::{
    extract::{Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    config::AppState,
    middleware::{
        i18n::{self, Locale},
        paths,
        tenancy::{self, HostTarget},
    },
    models::{
        auth::Session,
        context::{RequestContext, CONTEXT_HEADERS},
    },
    services::access::AccessBackend,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Segue sem nenhuma alteração (assets, APIs fora de /api/auth).
    PassThrough,
    /// Caminho relativo, já com o prefixo de idioma.
    Redirect(String),
    /// Segue com o contexto escrito nos cabeçalhos.
    Forward(RequestContext),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Denial {
    NotMember,
    TenantSuspended,
    NotSuperAdmin,
    LookupFailed,
}

impl Denial {
    fn target(self, locale: Locale) -> String {
        match self {
            Denial::NotMember | Denial::NotSuperAdmin => paths::unauthorized_path(locale),
            Denial::TenantSuspended => paths::tenant_suspended_path(locale),
            Denial::LookupFailed => paths::error_path(locale),
        }
    }
}

/// Borda: nenhum cabeçalho de contexto enviado pelo cliente sobrevive,
/// inclusive nas rotas que o resolver deixa passar.
pub async fn strip_context_headers(mut request: Request, next: Next) -> Response {
    let headers = request.headers_mut();
    for name in CONTEXT_HEADERS {
        headers.remove(name);
    }
    next.run(request).await
}

pub async fn request_context_resolver(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    match resolve(&app_state, &parts).await {
        Resolution::PassThrough => next.run(Request::from_parts(parts, body)).await,
        Resolution::Redirect(location) => Redirect::temporary(&location).into_response(),
        Resolution::Forward(context) => {
            context.apply_to(&mut parts.headers);
            next.run(Request::from_parts(parts, body)).await
        }
    }
}

pub async fn resolve(app_state: &AppState, parts: &Parts) -> Resolution {
    let path = parts.uri.path();

    // 1. Assets, APIs que não são de auth e arquivos
    if paths::is_bypassed(path) {
        return Resolution::PassThrough;
    }

    // 2. Idioma
    let accept_language = parts
        .headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let locale = i18n::resolve_locale(path, accept_language);

    // 3. Tenant pelo host
    let host = tenancy::request_host(parts).unwrap_or_default();
    let target = tenancy::tenant_from_host(&host, &app_state.settings);

    // 4. Prefixo de idioma antes de qualquer autorização
    if paths::needs_locale_redirect(path) {
        return Resolution::Redirect(paths::with_locale_prefix(locale, path, parts.uri.query()));
    }

    let mut context = RequestContext::new(locale);
    context.tenant_slug = target.tenant_slug().map(str::to_owned);

    // 5. Sem backend configurado, as etapas 5 a 8 não existem
    let Some(access) = app_state.access.as_deref() else {
        context.is_super_admin = target == HostTarget::SuperAdmin;
        context.dev_mode = true;
        tracing::debug!(path, "Modo de desenvolvimento: autenticação ignorada");
        return Resolution::Forward(context);
    };

    let public = paths::is_public(path);
    let session = read_session(access, &app_state.settings.session_cookie, parts).await;

    // 6. Anônimo em rota protegida
    let Some(session) = session else {
        if public {
            return Resolution::Forward(context);
        }
        return Resolution::Redirect(paths::login_path(locale, path));
    };

    // 7 e 8. Vínculo com o tenant ou lista de super administradores
    let denial = match &target {
        HostTarget::Tenant(slug) => authorize_membership(access, &session, slug, &mut context).await,
        HostTarget::SuperAdmin => authorize_super_admin(access, &session, &mut context).await,
        HostTarget::MainDomain | HostTarget::Unscoped => None,
    };

    match denial {
        None => Resolution::Forward(context),
        // As páginas de status são públicas: redirecionar de novo criaria um laço.
        Some(_) if public => Resolution::Forward(context),
        Some(denial) => Resolution::Redirect(denial.target(locale)),
    }
}

// Falha do provedor conta como "sem sessão": nunca libera a rota.
async fn read_session(
    access: &dyn AccessBackend,
    cookie_name: &str,
    parts: &Parts,
) -> Option<Session> {
    let token = CookieJar::from_headers(&parts.headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())?;

    match access.session_from_token(&token).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Falha ao obter a sessão: {}", e);
            None
        }
    }
}

async fn authorize_membership(
    access: &dyn AccessBackend,
    session: &Session,
    tenant_slug: &str,
    context: &mut RequestContext,
) -> Option<Denial> {
    match access.find_membership(session.user_id, tenant_slug).await {
        Ok(None) => {
            tracing::info!(user_id = %session.user_id, tenant_slug, "Usuário sem vínculo com o tenant");
            Some(Denial::NotMember)
        }
        Ok(Some(membership)) if !membership.tenant.is_active() => {
            tracing::info!(tenant_slug, "Tenant suspenso");
            Some(Denial::TenantSuspended)
        }
        Ok(Some(membership)) => {
            context.tenant_id = Some(membership.tenant.id);
            context.user_role = Some(membership.role);
            None
        }
        Err(e) => {
            tracing::error!("Erro ao verificar acesso ao tenant '{}': {}", tenant_slug, e);
            Some(Denial::LookupFailed)
        }
    }
}

async fn authorize_super_admin(
    access: &dyn AccessBackend,
    session: &Session,
    context: &mut RequestContext,
) -> Option<Denial> {
    match access.is_super_admin(session.user_id).await {
        Ok(true) => {
            context.is_super_admin = true;
            None
        }
        Ok(false) => {
            tracing::info!(user_id = %session.user_id, "Acesso negado ao console de super administração");
            Some(Denial::NotSuperAdmin)
        }
        Err(e) => {
            tracing::error!("Erro ao verificar super administrador: {}", e);
            Some(Denial::LookupFailed)
        }
    }
}
