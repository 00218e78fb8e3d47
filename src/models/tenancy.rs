// src/models/tenancy.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Enums do banco (tenant_status / user_role)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tenant_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TenantStatus {
    Active,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Analyst,
    Reviewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Analyst => "ANALYST",
            UserRole::Reviewer => "REVIEWER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(UserRole::Admin),
            "ANALYST" => Ok(UserRole::Analyst),
            "REVIEWER" => Ok(UserRole::Reviewer),
            other => Err(format!("papel desconhecido: {other}")),
        }
    }
}

// ---
// 2. Tenant (a "Organização" cliente)
// ---
// Somente leitura do ponto de vista do gateway: criado fora deste serviço.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub slug: String,
    pub status: TenantStatus,
}

impl Tenant {
    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }
}

// ---
// 3. Membership (Usuário <-> Tenant, com papel)
// ---
// Sempre o mesmo formato aninhado, seja qual for a consulta que o produziu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub user_id: Uuid,
    pub role: UserRole,
    pub tenant: Tenant,
}

// Linha crua do JOIN user_tenants x tenants; só existe dentro do repositório.
#[derive(Debug, FromRow)]
pub(crate) struct MembershipRow {
    pub user_id: Uuid,
    pub role: UserRole,
    pub tenant_id: Uuid,
    pub tenant_slug: String,
    pub tenant_status: TenantStatus,
}

impl From<MembershipRow> for Membership {
    fn from(row: MembershipRow) -> Self {
        Self {
            user_id: row.user_id,
            role: row.role,
            tenant: Tenant {
                id: row.tenant_id,
                slug: row.tenant_slug,
                status: row.tenant_status,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_strings_round_trip() {
        for role in [UserRole::Admin, UserRole::Analyst, UserRole::Reviewer] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn membership_row_is_nested() {
        let tenant_id = Uuid::new_v4();
        let membership = Membership::from(MembershipRow {
            user_id: Uuid::nil(),
            role: UserRole::Reviewer,
            tenant_id,
            tenant_slug: "acme".into(),
            tenant_status: TenantStatus::Suspended,
        });
        assert_eq!(membership.tenant.id, tenant_id);
        assert_eq!(membership.tenant.slug, "acme");
        assert!(!membership.tenant.is_active());
    }
}
