// src/handlers/pages.rs
//
// Destinos dos redirecionamentos do resolver e a carga de contexto das telas.
// A renderização fica no front end; aqui só entregamos os dados.

use axum::{extract::Query, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    middleware::i18n::{Locale, TextDirection},
    models::context::RequestContext,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContextView {
    #[serde(flatten)]
    pub context: RequestContext,
    pub dir: TextDirection,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusPage {
    pub page: String,
    pub locale: Locale,
    pub dir: TextDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl StatusPage {
    fn new(page: &str, locale: Locale) -> Self {
        Self {
            page: page.to_string(),
            locale,
            dir: locale.direction(),
            redirect_to: None,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    /// Caminho para onde voltar depois do login.
    pub redirect_to: Option<String>,
}

// GET /{locale}/context
#[utoipa::path(
    get,
    path = "/{locale}/context",
    tag = "Context",
    params(("locale" = String, Path, description = "Idioma (en | ar)")),
    responses(
        (status = 200, description = "Contexto resolvido para a requisição", body = ContextView)
    )
)]
pub async fn context_page(context: RequestContext) -> Json<ContextView> {
    let dir = context.locale.direction();
    Json(ContextView { context, dir })
}

// GET /{locale}/auth/login
#[utoipa::path(
    get,
    path = "/{locale}/auth/login",
    tag = "Pages",
    params(("locale" = String, Path, description = "Idioma (en | ar)"), LoginQuery),
    responses((status = 200, body = StatusPage))
)]
pub async fn login_page(locale: Locale, Query(query): Query<LoginQuery>) -> Json<StatusPage> {
    let mut page = StatusPage::new("login", locale);
    // Só caminhos locais: nada de redirecionamento aberto para outro domínio.
    page.redirect_to = query.redirect_to.filter(|target| is_local_path(target));
    Json(page)
}

// "//host" e "/\host" viram URLs de outro domínio no navegador.
fn is_local_path(target: &str) -> bool {
    let mut chars = target.chars();
    chars.next() == Some('/') && !matches!(chars.next(), Some('/' | '\\'))
}

pub async fn unauthorized_page(locale: Locale) -> Json<StatusPage> {
    Json(StatusPage::new("unauthorized", locale))
}

pub async fn tenant_suspended_page(locale: Locale) -> Json<StatusPage> {
    Json(StatusPage::new("tenant-suspended", locale))
}

pub async fn error_page(locale: Locale) -> Json<StatusPage> {
    Json(StatusPage::new("error", locale))
}

pub async fn not_found(locale: Locale) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(StatusPage::new("not-found", locale)))
}
