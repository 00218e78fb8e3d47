// src/middleware/i18n.rs

use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::context::LOCALE_HEADER;

// Idiomas suportados. A ordem importa: é a ordem de preferência no desempate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code))
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Locale::En => TextDirection::Ltr,
            Locale::Ar => TextDirection::Rtl,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Prefixo de idioma suportado no caminho: `/en/...` ou exatamente `/en`.
pub fn locale_from_path(path: &str) -> Option<Locale> {
    Locale::ALL.into_iter().find(|locale| {
        let prefix = format!("/{}", locale.code());
        path == prefix || path.starts_with(&format!("{prefix}/"))
    })
}

/// Primeiro idioma suportado do `Accept-Language`, respeitando os pesos `q`.
pub fn locale_from_accept_language(header_str: &str) -> Option<Locale> {
    accept_language::parse(header_str)
        .iter()
        .find_map(|tag| {
            // "ar-EG" -> "ar"
            let primary = tag.split('-').next().unwrap_or(tag);
            Locale::from_code(primary)
        })
}

/// Caminho -> Accept-Language -> padrão.
pub fn resolve_locale(path: &str, accept_language: Option<&str>) -> Locale {
    locale_from_path(path)
        .or_else(|| accept_language.and_then(locale_from_accept_language))
        .unwrap_or_default()
}

// Extrator para os handlers: confia no `x-locale` escrito pelo resolver.
impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get(LOCALE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(Locale::from_code);

        if let Some(locale) = forwarded {
            return Ok(locale);
        }

        // Rotas ignoradas pelo resolver (ex.: /api/*) caem aqui.
        let accept = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok());

        Ok(resolve_locale(parts.uri.path(), accept))
    }
}
