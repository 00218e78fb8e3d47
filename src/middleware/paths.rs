// src/middleware/paths.rs

use crate::middleware::i18n::{locale_from_path, Locale};

// Rotas acessíveis sem sessão. Casam por segmento: "/auth" cobre "/auth/login",
// mas não "/authors".
const PUBLIC_PATHS: [&str; 13] = [
    "/auth",
    "/login",
    "/signup",
    "/forgot-password",
    "/reset-password",
    "/api/auth",
    "/_next",
    "/favicon.ico",
    "/robots.txt",
    "/sitemap.xml",
    "/unauthorized",
    "/tenant-suspended",
    "/error",
];

/// Assets do framework, APIs que não são de autenticação e arquivos estáticos
/// passam pelo resolver sem nenhum processamento.
pub fn is_bypassed(path: &str) -> bool {
    path.starts_with("/_next/")
        || (path.starts_with("/api/") && !path.starts_with("/api/auth"))
        || path.contains('.')
}

/// Remove qualquer prefixo de duas letras minúsculas (`/xx` ou `/xx/...`),
/// suportado ou não: "/fr/auth/login" -> "/auth/login".
pub fn strip_locale_prefix(path: &str) -> &str {
    let bytes = path.as_bytes();
    let has_prefix = bytes.len() >= 3
        && bytes[0] == b'/'
        && bytes[1].is_ascii_lowercase()
        && bytes[2].is_ascii_lowercase()
        && (bytes.len() == 3 || bytes[3] == b'/');

    if has_prefix { &path[3..] } else { path }
}

fn matches_public(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| {
        path == *public
            || path
                .strip_prefix(public)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

pub fn is_public(path: &str) -> bool {
    matches_public(path) || matches_public(strip_locale_prefix(path))
}

pub fn has_locale_prefix(path: &str) -> bool {
    locale_from_path(path).is_some()
}

/// Caminho precisa ganhar o prefixo de idioma antes de qualquer outra etapa?
pub fn needs_locale_redirect(path: &str) -> bool {
    !has_locale_prefix(path)
        && !path.starts_with("/_next")
        && !path.starts_with("/api")
        && !path.contains('.')
        && !is_public(path)
}

/// `/entities?x=1` -> `/en/entities?x=1`
pub fn with_locale_prefix(locale: Locale, path: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("/{}{}?{}", locale.code(), path, query),
        None => format!("/{}{}", locale.code(), path),
    }
}

/// `redirectTo` leva o caminho pedido inteiro, com o idioma: o usuário volta
/// exatamente para onde estava.
pub fn login_path(locale: Locale, redirect_to: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(redirect_to.as_bytes()).collect();
    format!("/{}/auth/login?redirectTo={}", locale.code(), encoded)
}

pub fn unauthorized_path(locale: Locale) -> String {
    format!("/{}/unauthorized", locale.code())
}

pub fn tenant_suspended_path(locale: Locale) -> String {
    format!("/{}/tenant-suspended", locale.code())
}

pub fn error_path(locale: Locale) -> String {
    format!("/{}/error", locale.code())
}
