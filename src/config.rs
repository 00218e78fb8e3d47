// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{EntityRepository, TenantRepository},
    services::{
        access::{AccessBackend, PgAccessBackend},
        auth::AuthService,
    },
};

const DEFAULT_SUPER_ADMIN_DOMAINS: &str = "admin.localhost:3000";
const DEFAULT_MAIN_DOMAIN: &str = "localhost:3000";
const DEFAULT_SESSION_COOKIE: &str = "sb-access-token";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

// Valores de exemplo do .env.example contam como "não configurado".
const PLACEHOLDER_DATABASE_URL: &str = "your_database_url";
const PLACEHOLDER_JWT_SECRET: &str = "your_jwt_secret";

/// Credenciais do armazenamento de dados. Ausentes => modo de desenvolvimento.
#[derive(Clone)]
pub struct AuthSettings {
    pub database_url: String,
    pub jwt_secret: String,
}

// Sem Debug derivado: não queremos o segredo nos logs.
impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("database_url", &"***")
            .field("jwt_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub auth: Option<AuthSettings>,
    pub super_admin_domains: Vec<String>,
    pub main_domain: String,
    pub session_cookie: String,
    pub bind_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth: None,
            super_admin_domains: parse_domain_list(DEFAULT_SUPER_ADMIN_DOMAINS),
            main_domain: DEFAULT_MAIN_DOMAIN.to_string(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta as configurações a partir de qualquer fonte chave -> valor.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str, placeholder: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty() && value != placeholder)
        };

        let auth = match (
            present("DATABASE_URL", PLACEHOLDER_DATABASE_URL),
            present("JWT_SECRET", PLACEHOLDER_JWT_SECRET),
        ) {
            (Some(database_url), Some(jwt_secret)) => Some(AuthSettings {
                database_url,
                jwt_secret,
            }),
            _ => None,
        };

        let defaults = Self::default();

        Self {
            auth,
            super_admin_domains: lookup("SUPER_ADMIN_DOMAINS")
                .map(|raw| parse_domain_list(&raw))
                .filter(|domains| !domains.is_empty())
                .unwrap_or(defaults.super_admin_domains),
            main_domain: lookup("MAIN_DOMAIN")
                .map(|domain| domain.trim().to_ascii_lowercase())
                .filter(|domain| !domain.is_empty())
                .unwrap_or(defaults.main_domain),
            session_cookie: lookup("SESSION_COOKIE")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.session_cookie),
            bind_addr: lookup("BIND_ADDR")
                .filter(|addr| !addr.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
        }
    }

    pub fn is_super_admin_host(&self, host: &str) -> bool {
        self.super_admin_domains.iter().any(|domain| domain == host)
    }
}

fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|domain| domain.trim().to_ascii_lowercase())
        .filter(|domain| !domain.is_empty())
        .collect()
}

// O estado compartilhado que será acessível em toda a aplicação.
// `access == None` é o modo de desenvolvimento: decidido uma vez, na inicialização.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub access: Option<Arc<dyn AccessBackend>>,
    pub entity_repo: Option<EntityRepository>,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let settings = Settings::from_env();

        let Some(auth) = settings.auth.clone() else {
            tracing::warn!(
                "⚠️ DATABASE_URL/JWT_SECRET não configurados: rodando em modo de desenvolvimento, sem autenticação"
            );
            return Ok(Self::with_access(settings, None));
        };

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&auth.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!().run(&db_pool).await?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        // --- Monta o gráfico de dependências ---
        let tenant_repo = TenantRepository::new(db_pool.clone());
        let auth_service = AuthService::new(auth.jwt_secret);
        let access: Arc<dyn AccessBackend> =
            Arc::new(PgAccessBackend::new(auth_service, tenant_repo));

        Ok(Self {
            settings: Arc::new(settings),
            access: Some(access),
            entity_repo: Some(EntityRepository::new(db_pool)),
        })
    }

    /// Estado sem banco para as listagens; usado no modo de desenvolvimento e nos testes.
    pub fn with_access(settings: Settings, access: Option<Arc<dyn AccessBackend>>) -> Self {
        Self {
            settings: Arc::new(settings),
            access,
            entity_repo: None,
        }
    }

    pub fn is_dev_mode(&self) -> bool {
        self.access.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_means_dev_mode_with_defaults() {
        let settings = settings_from(&[]);
        assert!(settings.auth.is_none());
        assert_eq!(settings.super_admin_domains, vec!["admin.localhost:3000"]);
        assert_eq!(settings.main_domain, "localhost:3000");
        assert_eq!(settings.session_cookie, "sb-access-token");
    }

    #[test]
    fn placeholders_count_as_unset() {
        let settings = settings_from(&[
            ("DATABASE_URL", "your_database_url"),
            ("JWT_SECRET", "real-secret"),
        ]);
        assert!(settings.auth.is_none());

        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/kyc"),
            ("JWT_SECRET", "your_jwt_secret"),
        ]);
        assert!(settings.auth.is_none());
    }

    #[test]
    fn both_credentials_enable_auth() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/kyc"),
            ("JWT_SECRET", "s3cret"),
        ]);
        let auth = settings.auth.expect("auth configurado");
        assert_eq!(auth.database_url, "postgres://localhost/kyc");
    }

    #[test]
    fn super_admin_domains_are_split_and_trimmed() {
        let settings = settings_from(&[(
            "SUPER_ADMIN_DOMAINS",
            "admin.kyc.io, Console.KYC.io ,,",
        )]);
        assert_eq!(
            settings.super_admin_domains,
            vec!["admin.kyc.io", "console.kyc.io"]
        );
        assert!(settings.is_super_admin_host("console.kyc.io"));
    }
}
