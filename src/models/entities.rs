// src/models/entities.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "entity_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    Individual,
    Organization,
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INDIVIDUAL" => Ok(EntityType::Individual),
            "ORGANIZATION" => Ok(EntityType::Organization),
            other => Err(format!("tipo de entidade desconhecido: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "entity_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityStatus {
    Active,
    Inactive,
}

impl FromStr for EntityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(EntityStatus::Active),
            "INACTIVE" => Ok(EntityStatus::Inactive),
            other => Err(format!("status de entidade desconhecido: {other}")),
        }
    }
}

// ---
// Entidade KYC (pessoa física ou jurídica) de um tenant
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: Uuid,
    pub tenant_id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub status: EntityStatus,
    pub name: String,
    pub government_id: Option<String>,
    pub nationality_codes: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filtros já validados da listagem. O tenant nunca faz parte do filtro:
/// ele vem sempre do contexto da requisição.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFilter {
    pub search: Option<String>,
    pub status: Option<EntityStatus>,
    pub entity_type: Option<EntityType>,
}
