//! Account domain models and parameters.
//!
//! Accounts are dashboard operators. Every account carries one or more roles
//! deciding what it may read or mutate.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::model::account::AccountDto;

/// Operator role, in decreasing order of privilege.
///
/// - `Admin` - everything, including account/template/settings management
/// - `Editor` - may mutate domain data (approve, reject, adjust quotas)
/// - `Viewer` - read-only access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Editor => "EDITOR",
            Self::Viewer => "VIEWER",
        }
    }

    /// Parses a stored role string at the repository boundary.
    pub fn from_db(value: &str) -> Result<Self, DbErr> {
        match value {
            "ADMIN" => Ok(Self::Admin),
            "EDITOR" => Ok(Self::Editor),
            "VIEWER" => Ok(Self::Viewer),
            other => Err(DbErr::Custom(format!("unknown account role '{other}'"))),
        }
    }

    /// Parses a role from API input.
    ///
    /// # Returns
    /// - `Ok(Role)` - Recognized role name
    /// - `Err(String)` - The offending value, for the 400 response
    pub fn parse(value: &str) -> Result<Self, String> {
        Self::from_db(value).map_err(|_| value.to_string())
    }
}

/// Dashboard operator with granted roles.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }

    /// Whether the account may mutate domain data.
    pub fn can_edit(&self) -> bool {
        self.roles
            .iter()
            .any(|r| matches!(r, Role::Admin | Role::Editor))
    }

    /// Converts entity models to the domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Account)` - The converted domain model
    /// - `Err(DbErr)` - A stored role string is not a known role
    pub fn from_entity(
        entity: entity::account::Model,
        role_entities: Vec<entity::account_role::Model>,
    ) -> Result<Self, DbErr> {
        let roles = role_entities
            .iter()
            .map(|r| Role::from_db(&r.role))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            roles,
            created_at: entity.created_at,
            last_login_at: entity.last_login_at,
        })
    }

    pub fn into_dto(self) -> AccountDto {
        AccountDto {
            id: self.id,
            email: self.email,
            name: self.name,
            roles: self.roles.iter().map(|r| r.as_str().to_string()).collect(),
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        }
    }
}

/// Parameters for creating an account. The password arrives in clear and is
/// hashed by the service before it reaches the repository.
#[derive(Debug, Clone)]
pub struct CreateAccountParam {
    pub email: String,
    pub name: String,
    pub password: String,
    pub roles: Vec<Role>,
}

/// Partial account update; `None` fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateAccountParam {
    pub account_id: Uuid,
    pub name: Option<String>,
    pub roles: Option<Vec<Role>>,
}
